//! sf targets - show the installation registry and what is installed here

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::distribute::path_exists;
use crate::error::Result;

#[derive(Args, Debug, Default)]
pub struct TargetsArgs {
    /// Only show installed tools
    #[arg(long)]
    pub installed: bool,
}

#[derive(Serialize)]
struct TargetInfo {
    id: String,
    installed: bool,
    strategy: String,
    skills_dir: Option<String>,
}

pub fn run(ctx: &AppContext, args: &TargetsArgs) -> Result<()> {
    let mut infos = Vec::new();
    for target in &ctx.registry {
        let installed = path_exists(&target.root_dir)?;
        if args.installed && !installed {
            continue;
        }
        infos.push(TargetInfo {
            id: target.id.to_string(),
            installed,
            strategy: target.strategy.label().to_string(),
            skills_dir: target
                .skills_dir
                .as_ref()
                .map(|dir| dir.display().to_string()),
        });
    }

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&infos));
    }

    let mut layout = HumanLayout::new();
    layout.title("Targets");
    for info in &infos {
        let status = if info.installed { "installed" } else { "absent" };
        let skills = info.skills_dir.as_deref().unwrap_or("rules only");
        layout.bullet(&format!(
            "{} [{status}, {}] {skills}",
            info.id, info.strategy
        ));
    }
    emit_human(layout);
    Ok(())
}
