//! The `check` subcommand.

use clap::Args;

use crate::{
    ocr::tesseract::{DEFAULT_LANGUAGES, TesseractEngine},
    prelude::*,
};

/// Options for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckOpts {
    /// `+`-separated languages the OCR step is expected to use.
    #[clap(long, default_value = DEFAULT_LANGUAGES)]
    pub languages: String,
}

/// The `check` subcommand: verify the external OCR dependency and report.
#[instrument(level = "debug", skip_all)]
pub fn cmd_check(opts: &CheckOpts) -> Result<()> {
    let banner = TesseractEngine::probe()?;
    println!("found {banner}");

    match TesseractEngine::installed_languages() {
        Ok(installed) => {
            println!("installed languages: {}", installed.join(", "));
            for language in opts.languages.split('+') {
                if !installed.iter().any(|known| known == language) {
                    warn!(
                        "language pack `{language}` is not installed; recognition \
                         with it will fail"
                    );
                }
            }
        }
        Err(err) => warn!("could not list installed languages: {err:#}"),
    }
    Ok(())
}
