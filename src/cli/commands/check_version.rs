//! sf check-version - gate releases on skill front-matter versions

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::distribute::discover_skills;
use crate::error::{Result, SfError};
use crate::frontmatter;

#[derive(Args, Debug, Default)]
pub struct CheckVersionArgs {
    /// Version every skill's metadata.version must match
    #[arg(long, value_name = "VERSION")]
    pub expected: Option<String>,
}

#[derive(Serialize)]
struct Mismatch {
    skill: String,
    expected: String,
    actual: String,
}

pub fn run(ctx: &AppContext, args: &CheckVersionArgs) -> Result<()> {
    let expected = args
        .expected
        .clone()
        .or_else(|| ctx.config.check.expected_version.clone())
        .ok_or_else(|| {
            SfError::Config(
                "no expected version: pass --expected or set check.expected_version".to_string(),
            )
        })?;

    let skills_dir = ctx.skills_dir();
    let names = discover_skills(&skills_dir, "")?;

    let mut checked = 0usize;
    let mut mismatches = Vec::new();
    for name in &names {
        let skill_md = skills_dir.join(name).join("SKILL.md");
        let Ok(content) = std::fs::read_to_string(&skill_md) else {
            continue;
        };
        // skills without a metadata.version are exempt
        let Some(actual) = frontmatter::metadata_version(&content) else {
            continue;
        };
        checked += 1;
        if actual != expected {
            mismatches.push(Mismatch {
                skill: name.clone(),
                expected: expected.clone(),
                actual,
            });
        }
    }

    if ctx.robot_mode {
        emit_robot(&robot_ok(&mismatches))?;
    } else if mismatches.is_empty() {
        println!("Version check OK: {expected} ({checked} skills).");
    } else {
        eprintln!("Version mismatch: every skill's metadata.version must be {expected}.");
        for m in &mismatches {
            eprintln!("  {}: metadata.version = {}", m.skill, m.actual);
        }
    }

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(SfError::VersionMismatch(format!(
            "{} skill(s) out of date",
            mismatches.len()
        )))
    }
}
