//! Symlink installer with replace-on-conflict semantics.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;

use super::probe::path_exists;

/// Outcome of installing one skill at one target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallResult {
    Created,
    Replaced,
    /// The existing symlink already points at the source; nothing touched.
    Unchanged,
}

/// Create a symlink at `target` pointing to `source`.
///
/// The source is absolutized first so the link survives working-directory
/// changes. An existing correct symlink is left alone (`Unchanged`), which
/// keeps repeated runs cheap; anything else at `target` (stale symlink,
/// plain file, real directory) is removed and replaced.
pub fn install_link(source: &Path, target: &Path) -> Result<InstallResult> {
    let source = std::path::absolute(source)?;

    if let Some(parent) = target.parent() {
        if !path_exists(parent)? {
            std::fs::create_dir_all(parent)?;
        }
    }

    if !path_exists(target)? {
        symlink(&source, target)?;
        debug!(target = %target.display(), "created link");
        return Ok(InstallResult::Created);
    }

    let meta = std::fs::symlink_metadata(target)?;
    if meta.file_type().is_symlink() {
        if std::fs::read_link(target)? == source {
            return Ok(InstallResult::Unchanged);
        }
        std::fs::remove_file(target)?;
    } else if meta.is_dir() {
        std::fs::remove_dir_all(target)?;
    } else {
        std::fs::remove_file(target)?;
    }

    symlink(&source, target)?;
    debug!(target = %target.display(), "replaced link");
    Ok(InstallResult::Replaced)
}

#[cfg(unix)]
fn symlink(source: &Path, target: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, target)
}

#[cfg(windows)]
fn symlink(source: &Path, target: &Path) -> std::io::Result<()> {
    if source.is_dir() {
        std::os::windows::fs::symlink_dir(source, target)
    } else {
        std::os::windows::fs::symlink_file(source, target)
    }
}
