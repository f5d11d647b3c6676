//! Legacy DOC image extraction.
//!
//! A `.doc` file is an OLE2/CFB compound document. Word's binary format
//! scatters picture data across several streams, so rather than parse the
//! format we read every stream and keep the ones that start with a known
//! image signature.

use std::io::Read;
use std::path::Component;

use crate::{extract::Extraction, output, prelude::*, sniff::ImageKind};

/// CFB/OLE2 magic signature. Every compound document starts with these
/// 8 bytes.
const CFB_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Scan every stream of the compound document at `path` and write out those
/// that carry an image signature. A file that is not a well-formed compound
/// document is logged and yields an empty extraction.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn extract(path: &Path, output_folder: &Path) -> Result<Extraction> {
    if !has_cfb_signature(path)? {
        error!(
            "{:?} is not an OLE2 compound document; no images extracted",
            path.display()
        );
        return Ok(Extraction::default());
    }
    let mut compound = match cfb::open(path) {
        Ok(compound) => compound,
        Err(err) => {
            error!("failed to open {:?} as a compound document: {err}", path.display());
            return Ok(Extraction::default());
        }
    };

    let stream_paths: Vec<PathBuf> = compound
        .walk()
        .filter(|entry| entry.is_stream())
        .map(|entry| entry.path().to_path_buf())
        .collect();

    let mut extraction = Extraction::default();
    for stream_path in stream_paths {
        let mut data = vec![];
        let read = compound
            .open_stream(&stream_path)
            .and_then(|mut stream| stream.read_to_end(&mut data));
        if let Err(err) = read {
            warn!("skipping stream {:?}: {err}", stream_path.display());
            extraction.skipped += 1;
            continue;
        }

        // Streams that do not look like images are skipped silently.
        let Some(kind) = ImageKind::sniff(&data) else {
            continue;
        };

        let file_name = image_file_name(&stream_path, kind);
        let written = output::write_unique(output_folder, &file_name, &data)?;
        debug!("wrote {:?}", written.display());
        extraction.images.push(written);
    }
    Ok(extraction)
}

/// Check the 8-byte magic without parsing anything else.
fn has_cfb_signature(path: &Path) -> Result<bool> {
    let mut header = [0u8; 8];
    let mut file = fs::File::open(path)
        .with_context(|| format!("failed to open {:?}", path.display()))?;
    match file.read_exact(&mut header) {
        Ok(()) => Ok(header == CFB_MAGIC),
        Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read {:?}", path.display()))
        }
    }
}

/// Derive an output filename from a stream path and the sniffed format.
/// OLE stream names may contain control characters, which become `_`.
fn image_file_name(stream_path: &Path, kind: ImageKind) -> String {
    let joined = stream_path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("_");
    let cleaned: String = joined
        .chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect();
    format!("image_{cleaned}.{}", kind.extension())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDRfake-pixels";

    #[test]
    fn image_streams_are_sniffed_and_extracted() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let doc_path = dir.path().join("legacy.doc");
        {
            let mut compound = cfb::create(&doc_path)?;
            let mut text = compound.create_stream("/WordDocument")?;
            text.write_all(b"\xec\xa5\xc1\x00 definitely not an image")?;
            drop(text);
            let mut picture = compound.create_stream("/Data")?;
            picture.write_all(PNG_BYTES)?;
            drop(picture);
            compound.flush()?;
        }

        let out = dir.path().join("out");
        fs::create_dir_all(&out)?;
        let extraction = extract(&doc_path, &out)?;

        assert_eq!(extraction.images, [out.join("image_Data.png")]);
        assert_eq!(fs::read(&extraction.images[0])?, PNG_BYTES);
        Ok(())
    }

    #[test]
    fn non_compound_files_yield_an_empty_extraction() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let doc_path = dir.path().join("fake.doc");
        fs::write(&doc_path, b"just some text pretending to be a doc")?;

        let out = dir.path().join("out");
        fs::create_dir_all(&out)?;
        let extraction = extract(&doc_path, &out)?;
        assert!(extraction.images.is_empty());
        Ok(())
    }

    #[test]
    fn stream_paths_become_safe_filenames() {
        assert_eq!(
            image_file_name(Path::new("/Data/Pic"), ImageKind::Jpeg),
            "image_Data_Pic.jpg"
        );
        assert_eq!(
            image_file_name(Path::new("/\u{1}CompObj"), ImageKind::Png),
            "image__CompObj.png"
        );
    }
}
