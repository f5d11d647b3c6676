//! Embedded-image extraction from documents.

#[cfg(feature = "doc")]
pub mod doc;
pub mod docx;
pub mod pdf;

use crate::prelude::*;

/// The document formats we can pull images out of.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    /// Determine the document kind from a path's extension,
    /// case-insensitively. Returns `None` for anything we do not support.
    pub fn from_path(path: &Path) -> Option<DocumentKind> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("pdf") {
            Some(DocumentKind::Pdf)
        } else if extension.eq_ignore_ascii_case("docx") {
            Some(DocumentKind::Docx)
        } else if extension.eq_ignore_ascii_case("doc") {
            Some(DocumentKind::Doc)
        } else {
            None
        }
    }
}

/// A document discovered on disk, with its declared format.
#[derive(Clone, Debug)]
pub struct Document {
    pub path: PathBuf,
    pub kind: DocumentKind,
}

impl Document {
    /// Wrap an explicitly-named path, failing on unsupported extensions.
    pub fn from_path(path: PathBuf) -> Result<Document> {
        let kind = DocumentKind::from_path(&path).ok_or_else(|| {
            anyhow!(
                "unsupported document format {:?} (expected .pdf, .doc or .docx)",
                path.display()
            )
        })?;
        Ok(Document { path, kind })
    }
}

/// What one extractor run produced.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Paths of every image written, in extraction order.
    pub images: Vec<PathBuf>,

    /// Images, streams or entries skipped because they could not be decoded
    /// or read.
    pub skipped: usize,
}

/// Extract every embedded image from `document` into `output_folder`,
/// dispatching on the document kind. The output folder is created up front,
/// so it exists even when the document holds no images.
#[instrument(level = "debug", skip_all, fields(path = %document.path.display()))]
pub fn extract_images(document: &Document, output_folder: &Path) -> Result<Extraction> {
    fs::create_dir_all(output_folder).with_context(|| {
        format!("failed to create output folder {:?}", output_folder.display())
    })?;

    match document.kind {
        DocumentKind::Pdf => pdf::extract(&document.path, output_folder),
        DocumentKind::Docx => docx::extract(&document.path, output_folder),
        #[cfg(feature = "doc")]
        DocumentKind::Doc => doc::extract(&document.path, output_folder),
        #[cfg(not(feature = "doc"))]
        DocumentKind::Doc => {
            warn!(
                "legacy .doc support is not built into this binary (rebuild with \
                 the `doc` feature); skipping {:?}",
                document.path.display()
            );
            Ok(Extraction::default())
        }
    }
}
