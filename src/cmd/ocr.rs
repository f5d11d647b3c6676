//! The `ocr` subcommand.

use clap::Args;

use crate::{
    ocr::{
        recognize_folder,
        tesseract::{DEFAULT_LANGUAGES, TesseractEngine},
    },
    prelude::*,
    ui::Ui,
};

/// Options for the `ocr` subcommand.
#[derive(Args, Debug)]
pub struct OcrOpts {
    /// Folder of images to recognize.
    pub folder: PathBuf,

    /// `+`-separated languages passed to the OCR engine.
    #[clap(long, default_value = DEFAULT_LANGUAGES)]
    pub languages: String,
}

/// The `ocr` subcommand.
#[instrument(level = "debug", skip_all)]
pub fn cmd_ocr(ui: &Ui, opts: &OcrOpts) -> Result<()> {
    // The OCR engine is a hard requirement; fail with install instructions
    // before touching any image.
    let banner = TesseractEngine::probe()?;
    debug!("using {banner}");

    let engine = TesseractEngine::new(&opts.languages);
    run_folder(ui, &engine, &opts.folder)
}

/// Recognize one folder and report the outcome. Shared with the interactive
/// menu.
pub fn run_folder(
    ui: &Ui,
    engine: &TesseractEngine,
    folder: &Path,
) -> Result<()> {
    match recognize_folder(ui, engine, folder)? {
        Some(written) => println!("text saved to {}", written.display()),
        None => println!("no text recognized in {}", folder.display()),
    }
    Ok(())
}
