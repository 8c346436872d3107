//! Stale-entry sweep: remove prefixed entries from a directory.

use std::path::Path;

use tracing::debug;

use crate::error::Result;

use super::probe::path_exists;

/// Remove every immediate child of `dir` whose name starts with `prefix`
/// (exact, case-sensitive). Symlinks are unlinked without following,
/// directories removed recursively, files deleted. Returns the removed
/// names in enumeration order. A missing `dir` is not an error; an empty
/// prefix matches nothing (a full wipe is never what a cleanup pass means).
pub fn sweep(dir: &Path, prefix: &str) -> Result<Vec<String>> {
    if prefix.is_empty() || !path_exists(dir)? {
        return Ok(Vec::new());
    }

    let mut removed = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(prefix) {
            continue;
        }

        let full = entry.path();
        let meta = std::fs::symlink_metadata(&full)?;
        if meta.file_type().is_symlink() || !meta.is_dir() {
            std::fs::remove_file(&full)?;
        } else {
            std::fs::remove_dir_all(&full)?;
        }

        debug!(entry = %name, dir = %dir.display(), "swept stale entry");
        removed.push(name);
    }

    Ok(removed)
}

/// Sweep `dir` for every prefix in turn, concatenating the removed names.
pub fn sweep_all(dir: &Path, prefixes: &[String]) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    for prefix in prefixes {
        removed.extend(sweep(dir, prefix)?);
    }
    Ok(removed)
}
