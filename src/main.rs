use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing_subscriber::{
    EnvFilter, Layer as _, filter::Directive, layer::SubscriberExt,
    util::SubscriberInitExt as _,
};

use self::{discover::DEFAULT_OUTPUT_ROOT, prelude::*, ui::Ui};

mod cmd;
mod discover;
mod extract;
mod manifest;
mod ocr;
mod output;
mod prelude;
mod sniff;
mod ui;

/// Extract embedded images from documents and recognize their text.
#[derive(Debug, Parser)]
#[clap(
    version,
    after_help = r#"
Without a subcommand, an interactive menu over the documents in the current
directory is shown.

Extracted images land under `done/<document-stem>/`; recognized text is
written as `<folder>/<folder-name>.txt`. Text recognition requires the
`tesseract` binary (see the `check` subcommand).

Set RUST_LOG to control log verbosity (default: info).
"#
)]
struct Opts {
    #[clap(subcommand)]
    subcmd: Option<Cmd>,
}

/// The subcommands we support.
#[derive(Debug, Subcommand)]
enum Cmd {
    /// Extract embedded images from PDF/DOC/DOCX documents.
    Extract(cmd::extract::ExtractOpts),
    /// Recognize text in every image of a folder.
    Ocr(cmd::ocr::OcrOpts),
    /// List documents in the current directory and extracted image folders.
    List(cmd::list::ListOpts),
    /// Verify that the external OCR dependency is installed.
    Check(cmd::check::CheckOpts),
}

/// Our entry point, which can return an error. [`anyhow::Result`] will
/// automatically print a nice error message with optional backtrace.
fn main() -> Result<()> {
    let ui = Ui::init();

    // Initialize tracing.
    let directive =
        Directive::from_str("info").expect("built-in directive should be valid");
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt::layer()
        .with_writer(ui.stderr_writer())
        .with_filter(env_filter);
    tracing_subscriber::registry().with(subscriber).init();

    // Call our real `main` function now that logging is set up.
    real_main(ui)
}

/// Our real entry point.
#[instrument(level = "debug", name = "main", skip_all)]
fn real_main(ui: Ui) -> Result<()> {
    let opts = Opts::parse();
    debug!("parsed options: {:?}", opts);

    match &opts.subcmd {
        Some(Cmd::Extract(opts)) => cmd::extract::cmd_extract(opts),
        Some(Cmd::Ocr(opts)) => cmd::ocr::cmd_ocr(&ui, opts),
        Some(Cmd::List(opts)) => cmd::list::cmd_list(opts),
        Some(Cmd::Check(opts)) => cmd::check::cmd_check(opts),
        None => cmd::menu::cmd_menu(&ui, Path::new(DEFAULT_OUTPUT_ROOT)),
    }
}
