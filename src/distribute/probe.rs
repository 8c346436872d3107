//! Existence probe that does not dereference symlinks.

use std::io;
use std::path::Path;

use crate::error::Result;

/// Whether anything exists at `path`: file, directory, or symlink. A broken
/// symlink counts as existing (it still needs cleanup) even though a
/// dereferencing stat would fail. `NotFound` maps to `false`; any other
/// error (permission denied, ...) propagates.
pub fn path_exists(path: &Path) -> Result<bool> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_false() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!path_exists(&dir.path().join("nope")).unwrap());
    }

    #[test]
    fn file_and_dir_exist() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        std::fs::write(&file, "x").unwrap();
        assert!(path_exists(&file).unwrap());
        assert!(path_exists(dir.path()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn broken_symlink_exists() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("dangling");
        std::os::unix::fs::symlink(dir.path().join("gone"), &link).unwrap();
        assert!(path_exists(&link).unwrap());
        // sanity: a dereferencing stat would not see it
        assert!(std::fs::metadata(&link).is_err());
    }
}
