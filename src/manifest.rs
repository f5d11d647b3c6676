//! JSON manifests describing what an extraction run produced.

use serde::Serialize;

use crate::{output, prelude::*};

/// A record of one extraction run, written next to the extracted images.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExtractionManifest {
    /// The document the images came from.
    pub source: PathBuf,

    /// Paths of every image written, in extraction order.
    pub images: Vec<PathBuf>,

    /// How many images or streams were skipped because they could not be
    /// decoded or read.
    pub skipped: usize,
}

impl ExtractionManifest {
    /// Serialize into `folder` as `manifest.json` (collision-suffixed, like
    /// every other artifact).
    pub fn write(&self, folder: &Path) -> Result<PathBuf> {
        let json =
            serde_json::to_vec_pretty(self).context("failed to serialize manifest")?;
        output::write_unique(folder, "manifest.json", &json)
    }
}
