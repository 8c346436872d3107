//! Static registry of installation targets.
//!
//! One immutable table of every supported tool, built once per run from the
//! home directory. Each entry carries the root used to detect whether the
//! tool is installed, the optional skills directory, and the install
//! strategy. Tools without a skills directory are rules-only and never
//! participate in the skill fan-out.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SfError};

/// How skills are installed into a target's skills directory.
///
/// `Copy` is for tools that snapshot or containerize their skills directory
/// and cannot resolve symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStrategy {
    Symlink,
    Copy,
}

impl InstallStrategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Symlink => "symlink",
            Self::Copy => "copy",
        }
    }
}

/// An installation destination for skills.
#[derive(Debug, Clone)]
pub struct Target {
    /// Stable identifier used in logs and reports.
    pub id: &'static str,
    /// Existence of this directory means the tool is installed.
    pub root_dir: PathBuf,
    /// Where skills go; `None` for rules-only tools.
    pub skills_dir: Option<PathBuf>,
    pub strategy: InstallStrategy,
}

/// Canonical skills directory: single source of truth all targets link or
/// copy from.
#[must_use]
pub fn canonical_skills_dir(home: &Path) -> PathBuf {
    home.join(".agents").join("skills")
}

/// Build the full target registry rooted at `home`.
#[must_use]
pub fn targets(home: &Path) -> Vec<Target> {
    use InstallStrategy::{Copy, Symlink};

    let t = |id: &'static str, root: PathBuf, skills: Option<PathBuf>, strategy| Target {
        id,
        root_dir: root,
        skills_dir: skills,
        strategy,
    };

    vec![
        t(
            "cursor",
            home.join(".cursor"),
            Some(home.join(".cursor/skills")),
            Symlink,
        ),
        t(
            "claude",
            home.join(".claude"),
            Some(home.join(".claude/skills")),
            Symlink,
        ),
        // rules-only: no skills directory
        t("codex", home.join(".codex"), None, Symlink),
        t(
            "continue",
            home.join(".continue"),
            Some(home.join(".continue/skills")),
            Symlink,
        ),
        t(
            "cline",
            home.join(".cline"),
            Some(home.join(".cline/skills")),
            Symlink,
        ),
        t(
            "windsurf",
            home.join(".codeium"),
            Some(home.join(".codeium/windsurf/skills")),
            Symlink,
        ),
        // Antigravity dereferences nothing: it snapshots the directory, so
        // skills must be real files.
        t(
            "antigravity",
            home.join(".gemini"),
            Some(home.join(".gemini/antigravity/skills")),
            Copy,
        ),
        t(
            "augment",
            home.join(".augment"),
            Some(home.join(".augment/skills")),
            Symlink,
        ),
        t(
            "goose",
            home.join(".config/goose"),
            Some(home.join(".config/goose/skills")),
            Symlink,
        ),
        t(
            "crush",
            home.join(".config/crush"),
            Some(home.join(".config/crush/skills")),
            Symlink,
        ),
        t(
            "kiro",
            home.join(".kiro"),
            Some(home.join(".kiro/skills")),
            Symlink,
        ),
        t(
            "openhands",
            home.join(".openhands"),
            Some(home.join(".openhands/skills")),
            Symlink,
        ),
        t(
            "zencoder",
            home.join(".zencoder"),
            Some(home.join(".zencoder/skills")),
            Symlink,
        ),
        t(
            "adal",
            home.join(".adal"),
            Some(home.join(".adal/skills")),
            Symlink,
        ),
    ]
}

/// Look up a target by id. A miss is a configuration bug, not a runtime
/// condition, and is fatal.
pub fn find_target<'a>(targets: &'a [Target], id: &str) -> Result<&'a Target> {
    targets
        .iter()
        .find(|target| target.id == id)
        .ok_or_else(|| SfError::UnknownTarget(id.to_string()))
}

/// How a single rule file reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMethod {
    Symlink,
    /// Plain content copy for tools that reject symlinked config files.
    CopyFile,
}

#[derive(Debug, Clone)]
pub struct RuleLink {
    pub source: PathBuf,
    pub target: PathBuf,
    pub method: RuleMethod,
}

#[derive(Debug, Clone)]
pub struct RuleCleanup {
    pub dir: PathBuf,
    pub prefix: String,
}

/// Rule-file links for one tool.
#[derive(Debug, Clone)]
pub struct RuleTarget {
    pub target_id: &'static str,
    pub root_dir: PathBuf,
    pub cleanup: Option<RuleCleanup>,
    pub links: Vec<RuleLink>,
}

/// Rule link configurations per tool. `root` is the project root holding
/// the compiled rule bundles under `dist/`.
#[must_use]
pub fn rule_targets(home: &Path, root: &Path) -> Vec<RuleTarget> {
    vec![
        RuleTarget {
            target_id: "cursor",
            root_dir: home.join(".cursor"),
            cleanup: Some(RuleCleanup {
                dir: home.join(".cursor/rules"),
                prefix: "busirocket-".to_string(),
            }),
            links: vec![RuleLink {
                source: root.join("dist/global/.cursor/rules"),
                target: home.join(".cursor/rules/busirocket"),
                method: RuleMethod::Symlink,
            }],
        },
        RuleTarget {
            target_id: "claude",
            root_dir: home.join(".claude"),
            cleanup: None,
            links: vec![
                RuleLink {
                    source: root.join("dist/markdown/CLAUDE.md"),
                    target: home.join(".claude/CLAUDE.md"),
                    method: RuleMethod::Symlink,
                },
                RuleLink {
                    source: root.join("dist/global/.claude/rules"),
                    target: home.join(".claude/rules/busirocket"),
                    method: RuleMethod::Symlink,
                },
            ],
        },
        RuleTarget {
            target_id: "codex",
            root_dir: home.join(".codex"),
            cleanup: None,
            links: vec![
                RuleLink {
                    source: root.join("dist/markdown/AGENTS.md"),
                    target: home.join(".codex/AGENTS.md"),
                    method: RuleMethod::Symlink,
                },
                RuleLink {
                    source: root.join("dist/global/codex/rules/default.rules"),
                    target: home.join(".codex/rules/default.rules"),
                    method: RuleMethod::Symlink,
                },
            ],
        },
        RuleTarget {
            target_id: "antigravity",
            root_dir: home.join(".gemini"),
            cleanup: None,
            links: vec![RuleLink {
                source: root.join("dist/markdown/GEMINI.md"),
                target: home.join(".gemini/GEMINI.md"),
                method: RuleMethod::CopyFile,
            }],
        },
        RuleTarget {
            target_id: "windsurf",
            root_dir: home.join(".codeium"),
            cleanup: None,
            links: vec![RuleLink {
                source: root.join("dist/markdown/WINDSURF.md"),
                target: home.join(".windsurf/rules/global.md"),
                method: RuleMethod::CopyFile,
            }],
        },
    ]
}
