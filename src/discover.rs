//! Finding documents to process and image folders to recognize.

use crate::{
    extract::{Document, DocumentKind},
    prelude::*,
};

/// Where extracted image folders live unless overridden on the command line.
pub const DEFAULT_OUTPUT_ROOT: &str = "done";

/// Find every supported document directly inside `dir`, sorted by filename.
pub fn documents_in(dir: &Path) -> Result<Vec<Document>> {
    let mut documents = vec![];
    let entries = dir
        .read_dir()
        .with_context(|| format!("failed to read directory {:?}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read entry in {:?}", dir.display()))?
            .path();
        if !path.is_file() {
            continue;
        }
        if let Some(kind) = DocumentKind::from_path(&path) {
            documents.push(Document { path, kind });
        }
    }
    documents.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(documents)
}

/// List the image folders under `root`, sorted by name. A missing `root`
/// simply means no folders yet.
pub fn image_folders(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(vec![]);
    }
    let mut folders = vec![];
    let entries = root
        .read_dir()
        .with_context(|| format!("failed to read directory {:?}", root.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read entry in {:?}", root.display()))?
            .path();
        if path.is_dir() {
            folders.push(path);
        }
    }
    folders.sort();
    Ok(folders)
}

/// The folder that receives images extracted from `document`:
/// `<root>/<document-stem>`.
pub fn output_folder_for(root: &Path, document: &Document) -> PathBuf {
    let stem = document
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_owned());
    root.join(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_in_keeps_only_supported_extensions_sorted() -> Result<()> {
        let dir = tempfile::tempdir()?;
        for name in ["b.pdf", "a.docx", "c.DOC", "notes.txt", "image.png"] {
            fs::write(dir.path().join(name), b"x")?;
        }
        fs::create_dir(dir.path().join("sub.pdf"))?;

        let documents = documents_in(dir.path())?;
        let names: Vec<_> = documents
            .iter()
            .map(|d| d.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.docx", "b.pdf", "c.DOC"]);
        assert_eq!(documents[0].kind, DocumentKind::Docx);
        assert_eq!(documents[2].kind, DocumentKind::Doc);
        Ok(())
    }

    #[test]
    fn missing_output_root_yields_no_folders() -> Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(image_folders(&dir.path().join("done"))?.is_empty());
        Ok(())
    }

    #[test]
    fn image_folders_lists_only_directories() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("report"))?;
        fs::create_dir(dir.path().join("annex"))?;
        fs::write(dir.path().join("stray.txt"), b"x")?;

        let folders = image_folders(dir.path())?;
        assert_eq!(
            folders,
            [dir.path().join("annex"), dir.path().join("report")]
        );
        Ok(())
    }
}
