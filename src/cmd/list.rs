//! The `list` subcommand.

use clap::Args;

use crate::{
    discover::{self, DEFAULT_OUTPUT_ROOT},
    prelude::*,
};

/// Options for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListOpts {
    /// Directory holding previously extracted image folders.
    #[clap(long, default_value = DEFAULT_OUTPUT_ROOT)]
    pub output_root: PathBuf,
}

/// The `list` subcommand.
#[instrument(level = "debug", skip_all)]
pub fn cmd_list(opts: &ListOpts) -> Result<()> {
    let documents = discover::documents_in(Path::new("."))?;
    if documents.is_empty() {
        println!("no documents (.pdf/.doc/.docx) in the current directory");
    } else {
        println!("documents:");
        for (index, document) in documents.iter().enumerate() {
            println!("{:3}  {}", index + 1, document.path.display());
        }
    }

    let folders = discover::image_folders(&opts.output_root)?;
    if folders.is_empty() {
        println!("no image folders under {}", opts.output_root.display());
    } else {
        println!("image folders:");
        for (index, folder) in folders.iter().enumerate() {
            println!("{:3}  {}", index + 1, folder.display());
        }
    }
    Ok(())
}
