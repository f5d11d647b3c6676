//! Collision-safe output file writing.
//!
//! Every artifact we produce goes through [`write_unique`], so re-running an
//! extraction can never overwrite files from an earlier run.

use crate::prelude::*;

/// Pick a destination for `file_name` inside `folder` that does not collide
/// with an existing file, appending `_1`, `_2`, … before the extension until
/// the name is free.
pub fn unique_destination(folder: &Path, file_name: &str) -> PathBuf {
    let candidate = folder.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_owned());
    let extension = name.extension().map(|e| e.to_string_lossy().into_owned());

    for counter in 1.. {
        let renamed = match &extension {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        let candidate = folder.join(renamed);
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("ran out of collision suffixes");
}

/// Write `data` under `file_name` in `folder`, renaming on collision.
/// Returns the path actually written.
pub fn write_unique(folder: &Path, file_name: &str, data: &[u8]) -> Result<PathBuf> {
    let destination = unique_destination(folder, file_name);
    fs::write(&destination, data)
        .with_context(|| format!("failed to write {:?}", destination.display()))?;
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colliding_names_get_numeric_suffixes() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let first = write_unique(dir.path(), "image.png", b"first")?;
        let second = write_unique(dir.path(), "image.png", b"second")?;
        let third = write_unique(dir.path(), "image.png", b"third")?;

        assert_eq!(first, dir.path().join("image.png"));
        assert_eq!(second, dir.path().join("image_1.png"));
        assert_eq!(third, dir.path().join("image_2.png"));
        assert_eq!(fs::read(&first)?, b"first");
        assert_eq!(fs::read(&second)?, b"second");
        Ok(())
    }

    #[test]
    fn extensionless_names_still_get_suffixes() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_unique(dir.path(), "thumbs", b"a")?;
        let second = write_unique(dir.path(), "thumbs", b"b")?;
        assert_eq!(second, dir.path().join("thumbs_1"));
        Ok(())
    }
}
