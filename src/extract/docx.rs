//! DOCX image extraction.
//!
//! A `.docx` file is a ZIP container; Word keeps every embedded picture under
//! `word/media/`, so extraction is a straight copy of those entries.

use std::io::Read;

use zip::ZipArchive;

use crate::{extract::Extraction, output, prelude::*};

/// Archive prefix under which Word stores embedded media.
const MEDIA_PREFIX: &str = "word/media/";

/// Copy every `word/media/` entry of the archive at `path` into
/// `output_folder`, keeping original basenames (collision-suffixed).
///
/// An unreadable archive is logged and yields an empty extraction; a failure
/// to read one entry skips just that entry.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn extract(path: &Path, output_folder: &Path) -> Result<Extraction> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) => {
            error!("failed to open {:?}: {err}", path.display());
            return Ok(Extraction::default());
        }
    };
    let mut archive = match ZipArchive::new(file) {
        Ok(archive) => archive,
        Err(err) => {
            error!("{:?} is not a readable DOCX archive: {err}", path.display());
            return Ok(Extraction::default());
        }
    };

    let mut extraction = Extraction::default();
    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping archive entry {index}: {err}");
                extraction.skipped += 1;
                continue;
            }
        };
        if !entry.is_file() || !entry.name().starts_with(MEDIA_PREFIX) {
            continue;
        }
        let entry_name = entry.name().to_owned();
        let Some(file_name) = Path::new(&entry_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
        else {
            continue;
        };

        let mut data = Vec::with_capacity(entry.size() as usize);
        if let Err(err) = entry.read_to_end(&mut data) {
            warn!("skipping {entry_name}: {err}");
            extraction.skipped += 1;
            continue;
        }

        let written = output::write_unique(output_folder, &file_name, &data)?;
        debug!("wrote {:?}", written.display());
        extraction.images.push(written);
    }
    Ok(extraction)
}
