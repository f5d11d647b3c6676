//! Batch OCR over folders of extracted images.

pub mod tesseract;

use std::ffi::OsStr;

use crate::{
    output,
    prelude::*,
    ui::{ProgressConfig, Ui},
};

/// Extensions treated as OCR-able images, matched case-insensitively.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "gif"];

/// Width of the `=` rule around each filename header.
const BANNER_WIDTH: usize = 50;

/// Something that can turn one image file into text.
pub trait OcrEngine {
    /// Short name for log messages.
    fn name(&self) -> &'static str;

    /// Recognize the text in a single image file.
    fn recognize(&self, image: &Path) -> Result<String>;
}

/// The image files directly inside `folder`, sorted by name so output order
/// is deterministic.
pub fn image_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    let entries = folder
        .read_dir()
        .with_context(|| format!("failed to read folder {:?}", folder.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read entry in {:?}", folder.display()))?
            .path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Recognize every image in `folder` and write the combined text as
/// `<folder-name>.txt` inside that same folder.
///
/// Returns the output path, or `None` when the folder holds no images or no
/// image yielded any text. Per-image failures are logged and skipped.
#[instrument(level = "debug", skip_all, fields(folder = %folder.display()))]
pub fn recognize_folder(
    ui: &Ui,
    engine: &dyn OcrEngine,
    folder: &Path,
) -> Result<Option<PathBuf>> {
    let images = image_files(folder)?;
    if images.is_empty() {
        info!("no image files in {:?}", folder.display());
        return Ok(None);
    }

    let progress = ui.new_progress_bar(
        &ProgressConfig {
            emoji: "🔍",
            msg: "recognizing text",
            done_msg: "recognized text",
        },
        images.len() as u64,
    );

    let mut combined = String::new();
    for image in &images {
        match engine.recognize(image) {
            Ok(text) if !text.trim().is_empty() => {
                append_section(&mut combined, image, &text);
            }
            Ok(_) => debug!("no text in {:?}", image.display()),
            Err(err) => {
                warn!("skipping {:?} ({}): {err:#}", image.display(), engine.name());
            }
        }
        progress.inc(1);
    }

    if combined.is_empty() {
        info!("no text recognized in {:?}", folder.display());
        return Ok(None);
    }

    let folder_name = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("folder {:?} has no name", folder.display()))?;
    let written =
        output::write_unique(folder, &format!("{folder_name}.txt"), combined.as_bytes())?;
    Ok(Some(written))
}

/// Append one banner-labeled section of recognized text.
fn append_section(combined: &mut String, image: &Path, text: &str) {
    let banner = "=".repeat(BANNER_WIDTH);
    let name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    combined.push('\n');
    combined.push_str(&banner);
    combined.push('\n');
    combined.push_str(&format!("Image: {name}\n"));
    combined.push_str(&banner);
    combined.push_str("\n\n");
    combined.push_str(text);
    combined.push_str("\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An engine that answers from a script instead of running OCR.
    struct ScriptedEngine {
        by_stem: Vec<(&'static str, Result<&'static str, &'static str>)>,
    }

    impl OcrEngine for ScriptedEngine {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn recognize(&self, image: &Path) -> Result<String> {
            let stem = image.file_stem().unwrap().to_string_lossy().into_owned();
            for &(known, outcome) in &self.by_stem {
                if known == stem {
                    return match outcome {
                        Ok(text) => Ok(text.to_owned()),
                        Err(message) => Err(anyhow!("{message}")),
                    };
                }
            }
            Ok(String::new())
        }
    }

    #[test]
    fn output_has_one_section_per_recognized_image_in_sorted_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let folder = dir.path().join("report");
        fs::create_dir(&folder)?;
        // Created out of order on purpose; output must follow sorted names.
        for name in ["c.png", "a.jpg", "b.PNG"] {
            fs::write(folder.join(name), b"pixels")?;
        }

        let engine = ScriptedEngine {
            by_stem: vec![("a", Ok("text from a")), ("c", Ok("text from c"))],
        };
        let ui = Ui::init_for_tests();
        let written = recognize_folder(&ui, &engine, &folder)?.expect("expected output");

        assert_eq!(written, folder.join("report.txt"));
        let text = fs::read_to_string(&written)?;
        assert_eq!(text.matches("Image: ").count(), 2);
        let a = text.find("Image: a.jpg").expect("missing a.jpg section");
        let c = text.find("Image: c.png").expect("missing c.png section");
        assert!(a < c, "sections out of order:\n{text}");
        assert!(!text.contains("b.PNG"));
        Ok(())
    }

    #[test]
    fn folders_without_images_produce_no_output() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let folder = dir.path().join("empty");
        fs::create_dir(&folder)?;
        fs::write(folder.join("notes.txt"), b"not an image")?;

        let engine = ScriptedEngine { by_stem: vec![] };
        let ui = Ui::init_for_tests();
        assert!(recognize_folder(&ui, &engine, &folder)?.is_none());
        assert_eq!(folder.read_dir()?.count(), 1, "no output file should appear");
        Ok(())
    }

    #[test]
    fn failing_images_are_skipped_not_fatal() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let folder = dir.path().join("mixed");
        fs::create_dir(&folder)?;
        fs::write(folder.join("bad.png"), b"pixels")?;
        fs::write(folder.join("good.png"), b"pixels")?;

        let engine = ScriptedEngine {
            by_stem: vec![("bad", Err("decoder exploded")), ("good", Ok("salvaged"))],
        };
        let ui = Ui::init_for_tests();
        let written = recognize_folder(&ui, &engine, &folder)?.expect("expected output");
        let text = fs::read_to_string(&written)?;
        assert_eq!(text.matches("Image: ").count(), 1);
        assert!(text.contains("good.png"));
        Ok(())
    }
}
