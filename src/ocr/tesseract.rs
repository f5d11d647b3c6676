//! Tesseract OCR engine, driven through the system binary.

use std::{io, process::Command};

use crate::{ocr::OcrEngine, prelude::*};

/// Default recognition languages. The tool was built for mixed
/// Russian/English scans, so both packs are requested at once.
pub const DEFAULT_LANGUAGES: &str = "rus+eng";

/// Printed when the `tesseract` binary cannot be found.
pub const INSTALL_INSTRUCTIONS: &str = "\
tesseract is required for text recognition:
  Debian/Ubuntu: sudo apt-get install tesseract-ocr tesseract-ocr-rus tesseract-ocr-eng
  macOS:         brew install tesseract tesseract-lang
  Windows:       choco install tesseract (or the UB-Mannheim installer)
Language packs for every language you recognize with must be installed too.";

/// OCR engine wrapping the `tesseract` CLI tool.
pub struct TesseractEngine {
    languages: String,
}

impl TesseractEngine {
    /// Create an engine recognizing the given `+`-separated languages.
    pub fn new(languages: impl Into<String>) -> TesseractEngine {
        TesseractEngine {
            languages: languages.into(),
        }
    }

    /// Check that the binary is reachable, returning the first line of its
    /// version banner. A missing binary fails with install instructions.
    pub fn probe() -> Result<String> {
        let output = Command::new("tesseract").arg("--version").output();
        match output {
            Ok(output) if output.status.success() => {
                // Older tesseract builds print the banner to stderr.
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                let banner = if stdout.trim().is_empty() { stderr } else { stdout };
                Ok(banner.lines().next().unwrap_or("tesseract").trim().to_owned())
            }
            Ok(output) => bail!(
                "tesseract --version failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                bail!("tesseract binary not found on PATH\n{INSTALL_INSTRUCTIONS}")
            }
            Err(err) => Err(err).context("failed to run tesseract --version"),
        }
    }

    /// Languages tesseract reports as installed.
    pub fn installed_languages() -> Result<Vec<String>> {
        let output = Command::new("tesseract")
            .arg("--list-langs")
            .output()
            .context("failed to run tesseract --list-langs")?;
        if !output.status.success() {
            bail!(
                "tesseract --list-langs failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        // The listing may go to stdout or stderr depending on the build.
        let mut listing = String::from_utf8_lossy(&output.stdout).into_owned();
        listing.push('\n');
        listing.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(parse_language_listing(&listing))
    }
}

/// Pull the language codes out of `tesseract --list-langs` output, dropping
/// the "List of available languages" header.
fn parse_language_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains(' ') && !line.ends_with(':'))
        .map(str::to_owned)
        .collect()
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    #[instrument(level = "debug", skip_all, fields(image = %image.display()))]
    fn recognize(&self, image: &Path) -> Result<String> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .args(["-l", &self.languages])
            .output();
        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(output) => bail!(
                "tesseract failed on {:?}: {}",
                image.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                bail!("tesseract binary not found on PATH\n{INSTALL_INSTRUCTIONS}")
            }
            Err(err) => Err(err)
                .with_context(|| format!("failed to run tesseract on {:?}", image.display())),
        }
    }
}
