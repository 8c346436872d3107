//! Skill distribution engine.
//!
//! Fans a source tree of skill directories out to a canonical per-user
//! directory and from there to every registered target, symlinking or
//! copying per target. Stale entries from previous runs (including runs
//! under older naming schemes) are swept first. The whole pass is
//! idempotent: a second run with an unchanged source mutates nothing.

pub mod copy;
pub mod link;
pub mod probe;
pub mod sweep;

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::registry::{InstallStrategy, Target};

pub use copy::copy_tree;
pub use link::{InstallResult, install_link};
pub use probe::path_exists;
pub use sweep::{sweep, sweep_all};

/// One fan-out run over a fixed registry.
pub struct DistributeRequest<'a> {
    pub source_dir: &'a Path,
    pub canonical_dir: &'a Path,
    pub targets: &'a [Target],
    /// Only source subdirectories starting with this are distributed.
    /// Empty matches everything.
    pub discovery_prefix: &'a str,
    /// Prefixes swept from canonical and target directories before
    /// installing.
    pub sweep_prefixes: &'a [String],
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkCounts {
    pub created: usize,
    pub replaced: usize,
    pub unchanged: usize,
}

impl LinkCounts {
    fn record(&mut self, result: InstallResult) {
        match result {
            InstallResult::Created => self.created += 1,
            InstallResult::Replaced => self.replaced += 1,
            InstallResult::Unchanged => self.unchanged += 1,
        }
    }
}

/// Per-target outcome of one run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetOutcome {
    Linked { counts: LinkCounts },
    Copied { copied: usize },
    /// Root directory absent: the tool is not installed here.
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub id: String,
    pub swept: Vec<String>,
    #[serde(flatten)]
    pub outcome: TargetOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DistributeReport {
    pub skills: Vec<String>,
    pub canonical_swept: Vec<String>,
    pub canonical: LinkCounts,
    pub targets: Vec<TargetReport>,
    pub skipped: Vec<String>,
    pub distributed: usize,
}

/// Run the fan-out. `on_target` fires as each target finishes so callers
/// can report progress even if a later target fails.
///
/// Step order is fixed: discover, sweep+link canonical, then per target
/// sweep+install. An empty discovery result short-circuits before any
/// sweep runs, so a misconfigured source path can never wipe installed
/// skills. Targets without a skills directory are excluded outright.
pub fn distribute(
    req: &DistributeRequest<'_>,
    mut on_target: impl FnMut(&TargetReport),
) -> Result<DistributeReport> {
    let skills = discover_skills(req.source_dir, req.discovery_prefix)?;
    if skills.is_empty() {
        info!(source = %req.source_dir.display(), "no skills to distribute");
        return Ok(DistributeReport::default());
    }

    let mut report = DistributeReport {
        distributed: skills.len(),
        ..DistributeReport::default()
    };

    report.canonical_swept = sweep_all(req.canonical_dir, req.sweep_prefixes)?;
    for name in &skills {
        let result = install_link(&req.source_dir.join(name), &req.canonical_dir.join(name))?;
        report.canonical.record(result);
    }
    debug!(
        count = skills.len(),
        canonical = %req.canonical_dir.display(),
        "canonical skills linked"
    );

    for target in req.targets {
        let Some(skills_dir) = &target.skills_dir else {
            continue;
        };

        if !path_exists(&target.root_dir)? {
            let entry = TargetReport {
                id: target.id.to_string(),
                swept: Vec::new(),
                outcome: TargetOutcome::Skipped,
            };
            on_target(&entry);
            report.skipped.push(target.id.to_string());
            report.targets.push(entry);
            continue;
        }

        let swept = sweep_all(skills_dir, req.sweep_prefixes)?;

        let outcome = match target.strategy {
            InstallStrategy::Symlink => {
                let mut counts = LinkCounts::default();
                for name in &skills {
                    let result =
                        install_link(&req.canonical_dir.join(name), &skills_dir.join(name))?;
                    counts.record(result);
                }
                TargetOutcome::Linked { counts }
            }
            InstallStrategy::Copy => {
                for name in &skills {
                    copy_tree(&req.canonical_dir.join(name), &skills_dir.join(name))?;
                }
                TargetOutcome::Copied {
                    copied: skills.len(),
                }
            }
        };

        let entry = TargetReport {
            id: target.id.to_string(),
            swept,
            outcome,
        };
        on_target(&entry);
        report.targets.push(entry);
    }

    report.skills = skills;
    Ok(report)
}

/// List immediate subdirectories of `source_dir` matching the discovery
/// prefix, sorted for stable reporting. A missing source directory means
/// an empty skill set, not an error.
pub fn discover_skills(source_dir: &Path, prefix: &str) -> Result<Vec<String>> {
    if !path_exists(source_dir)? {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(source_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(prefix) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_filters_on_prefix_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("brp-react")).unwrap();
        std::fs::create_dir(dir.path().join("brp-rust")).unwrap();
        std::fs::create_dir(dir.path().join("unrelated")).unwrap();
        std::fs::write(dir.path().join("brp-file.md"), "not a dir").unwrap();

        let names = discover_skills(dir.path(), "brp-").unwrap();
        assert_eq!(names, vec!["brp-react".to_string(), "brp-rust".to_string()]);
    }

    #[test]
    fn empty_prefix_matches_every_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("alpha")).unwrap();
        std::fs::create_dir(dir.path().join("beta")).unwrap();

        let names = discover_skills(dir.path(), "").unwrap();
        assert_eq!(names, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn missing_source_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let names = discover_skills(&dir.path().join("absent"), "").unwrap();
        assert!(names.is_empty());
    }
}
