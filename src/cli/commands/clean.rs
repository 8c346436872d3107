//! sf clean - sweep stale skill entries without reinstalling

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::distribute::{path_exists, sweep_all};
use crate::error::Result;

#[derive(Args, Debug, Default)]
pub struct CleanArgs {
    /// Leave the canonical directory untouched
    #[arg(long)]
    pub skip_canonical: bool,
}

#[derive(Serialize)]
struct CleanReport {
    location: String,
    removed: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &CleanArgs) -> Result<()> {
    let prefixes = &ctx.config.sweep.prefixes;
    let mut reports = Vec::new();

    if !args.skip_canonical {
        let canonical = ctx.canonical_dir();
        let removed = sweep_all(&canonical, prefixes)?;
        reports.push(CleanReport {
            location: "canonical".to_string(),
            removed,
        });
    }

    for target in &ctx.registry {
        let Some(skills_dir) = &target.skills_dir else {
            continue;
        };
        if !path_exists(&target.root_dir)? {
            continue;
        }
        let removed = sweep_all(skills_dir, prefixes)?;
        reports.push(CleanReport {
            location: target.id.to_string(),
            removed,
        });
    }

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&reports));
    }

    let mut total = 0usize;
    for report in &reports {
        if report.removed.is_empty() {
            continue;
        }
        total += report.removed.len();
        println!(
            "{} {}: removed {}",
            "-".yellow(),
            report.location,
            report.removed.join(", ")
        );
    }
    if total == 0 {
        println!("Nothing to clean.");
    } else {
        println!("\nCleaned {total} stale entries.");
    }
    Ok(())
}
