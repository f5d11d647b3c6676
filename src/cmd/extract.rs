//! The `extract` subcommand.

use clap::Args;

use crate::{
    discover::{self, DEFAULT_OUTPUT_ROOT},
    extract::{Document, Extraction, extract_images},
    manifest::ExtractionManifest,
    prelude::*,
};

/// Options for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractOpts {
    /// Documents to process. When omitted, every supported document in the
    /// current directory is processed.
    pub paths: Vec<PathBuf>,

    /// Directory that receives one image folder per document.
    #[clap(long, default_value = DEFAULT_OUTPUT_ROOT)]
    pub output_root: PathBuf,
}

/// The `extract` subcommand.
#[instrument(level = "debug", skip_all)]
pub fn cmd_extract(opts: &ExtractOpts) -> Result<()> {
    let documents = if opts.paths.is_empty() {
        discover::documents_in(Path::new("."))?
    } else {
        opts.paths
            .iter()
            .map(|path| Document::from_path(path.clone()))
            .collect::<Result<Vec<_>>>()?
    };
    if documents.is_empty() {
        println!("no documents (.pdf/.doc/.docx) found in the current directory");
        return Ok(());
    }

    for document in &documents {
        // One corrupt document must not abort the rest of the batch.
        if let Err(err) = extract_document(document, &opts.output_root) {
            warn!("skipping {:?}: {err:#}", document.path.display());
        }
    }
    Ok(())
}

/// Extract one document into `<output_root>/<stem>`, record a manifest, and
/// report the outcome. Shared with the interactive menu.
pub fn extract_document(document: &Document, output_root: &Path) -> Result<Extraction> {
    let folder = discover::output_folder_for(output_root, document);
    let extraction = extract_images(document, &folder)?;

    let manifest = ExtractionManifest {
        source: document.path.clone(),
        images: extraction.images.clone(),
        skipped: extraction.skipped,
    };
    manifest.write(&folder)?;

    if extraction.images.is_empty() {
        println!("no images found in {}", document.path.display());
    } else {
        println!(
            "extracted {} image(s) from {} into {}",
            extraction.images.len(),
            document.path.display(),
            folder.display()
        );
    }
    Ok(extraction)
}
