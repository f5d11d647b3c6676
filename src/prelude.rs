//! Standard APIs we use everywhere.

pub use std::{
    fs,
    path::{Path, PathBuf},
};

pub use anyhow::{Context as _, Result, anyhow, bail};
#[allow(unused_imports)]
pub use tracing::{debug, error, info, instrument, trace, warn};
