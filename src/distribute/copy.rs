//! Recursive copy installer for targets that cannot follow symlinks.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, SfError};

use super::probe::path_exists;

/// Copy `source` to `target`, replacing whatever is there.
///
/// Symlinks inside `source` (and the source itself, which is usually a
/// symlink into the canonical directory) are dereferenced so the result is
/// a plain tree. Always overwrites: there is no cheap "already correct"
/// check for copied trees, so this installer skips the unchanged-detection
/// the link installer has.
pub fn copy_tree(source: &Path, target: &Path) -> Result<()> {
    if path_exists(target)? {
        let meta = std::fs::symlink_metadata(target)?;
        if meta.is_dir() && !meta.file_type().is_symlink() {
            std::fs::remove_dir_all(target)?;
        } else {
            std::fs::remove_file(target)?;
        }
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|err| SfError::Io(err.into()))?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| SfError::Config(format!("copy walk escaped source: {err}")))?;
        let dest = target.join(rel);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest)?;
        } else {
            std::fs::copy(entry.path(), &dest)?;
        }
    }

    debug!(source = %source.display(), target = %target.display(), "copied tree");
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn copies_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("skill");
        std::fs::create_dir_all(source.join("refs")).unwrap();
        std::fs::write(source.join("SKILL.md"), "# skill").unwrap();
        std::fs::write(source.join("refs/notes.md"), "notes").unwrap();

        let target = dir.path().join("out/skill");
        copy_tree(&source, &target).unwrap();

        assert_eq!(
            std::fs::read_to_string(target.join("SKILL.md")).unwrap(),
            "# skill"
        );
        assert_eq!(
            std::fs::read_to_string(target.join("refs/notes.md")).unwrap(),
            "notes"
        );
    }

    #[test]
    fn dereferences_symlinked_source() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real-skill");
        std::fs::create_dir(&real).unwrap();
        std::fs::write(real.join("SKILL.md"), "content").unwrap();
        let linked = dir.path().join("canonical-entry");
        std::os::unix::fs::symlink(&real, &linked).unwrap();

        let target = dir.path().join("out");
        copy_tree(&linked, &target).unwrap();

        let meta = std::fs::symlink_metadata(&target).unwrap();
        assert!(meta.is_dir() && !meta.file_type().is_symlink());
        assert_eq!(
            std::fs::read_to_string(target.join("SKILL.md")).unwrap(),
            "content"
        );
    }

    #[test]
    fn dereferences_inner_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("skill");
        std::fs::create_dir(&source).unwrap();
        let shared = dir.path().join("shared.md");
        std::fs::write(&shared, "shared notes").unwrap();
        std::os::unix::fs::symlink(&shared, source.join("linked.md")).unwrap();

        let target = dir.path().join("out");
        copy_tree(&source, &target).unwrap();

        let copied = target.join("linked.md");
        assert!(!std::fs::symlink_metadata(&copied)
            .unwrap()
            .file_type()
            .is_symlink());
        assert_eq!(std::fs::read_to_string(&copied).unwrap(), "shared notes");
    }

    #[test]
    fn replaces_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("skill");
        std::fs::create_dir(&source).unwrap();
        std::fs::write(source.join("SKILL.md"), "new").unwrap();

        let target = dir.path().join("out");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("stale.md"), "old").unwrap();

        copy_tree(&source, &target).unwrap();
        assert!(!target.join("stale.md").exists());
        assert_eq!(std::fs::read_to_string(target.join("SKILL.md")).unwrap(), "new");
    }
}
