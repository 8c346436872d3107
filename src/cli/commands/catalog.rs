//! sf catalog - generate llms.txt from skill front matter

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::distribute::discover_skills;
use crate::error::{Result, SfError};
use crate::frontmatter;

#[derive(Args, Debug, Default)]
pub struct CatalogArgs {
    /// Output file (defaults to llms.txt at the project root)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the catalog instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Serialize)]
struct CatalogEntry {
    name: String,
    description: String,
    path: String,
}

pub fn run(ctx: &AppContext, args: &CatalogArgs) -> Result<()> {
    let skills_dir = ctx.skills_dir();
    let names = discover_skills(&skills_dir, "")?;
    if names.is_empty() {
        return Err(SfError::InvalidSkill(format!(
            "no skill directories found under {}",
            skills_dir.display()
        )));
    }

    let mut entries = Vec::new();
    for name in &names {
        let skill_md = skills_dir.join(name).join("SKILL.md");
        let Ok(content) = std::fs::read_to_string(&skill_md) else {
            continue;
        };
        let Some(fm) = frontmatter::extract(&content) else {
            tracing::warn!(skill = %name, "SKILL.md has no usable front matter");
            continue;
        };
        let rel = skill_md
            .strip_prefix(&ctx.root)
            .unwrap_or(&skill_md)
            .display()
            .to_string()
            .replace('\\', "/");
        entries.push(CatalogEntry {
            name: fm.name,
            description: fm.description,
            path: rel,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&entries));
    }

    let text = build_catalog(&entries);
    if args.stdout {
        print!("{text}");
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| ctx.root.join("llms.txt"));
    std::fs::write(&output, text)
        .map_err(|err| SfError::Config(format!("write {}: {err}", output.display())))?;
    println!("Wrote {} ({} skills).", output.display(), entries.len());
    Ok(())
}

fn build_catalog(entries: &[CatalogEntry]) -> String {
    let mut lines = vec![
        "# Agent Skills".to_string(),
        String::new(),
        "A collection of reusable Agent Skills. Skills follow the Agent Skills \
         format (https://agentskills.io/specification)."
            .to_string(),
        String::new(),
        "## Skills".to_string(),
        String::new(),
    ];
    for entry in entries {
        lines.push(format!("- {}: {}", entry.name, entry.description));
        lines.push(format!("  {}", entry.path));
        lines.push(String::new());
    }
    lines.push("## Links".to_string());
    lines.push(String::new());
    lines.push("- [Agent Skills specification](https://agentskills.io/specification)".to_string());
    lines.push(
        "- [Integrate skills into your agent](https://agentskills.io/integrate-skills)".to_string(),
    );
    lines.push(String::new());
    lines.join("\n")
}
