//! sf link - fan skills out to canonical and every installed tool

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::distribute::{
    DistributeReport, DistributeRequest, TargetOutcome, TargetReport, distribute,
};
use crate::error::Result;

#[derive(Args, Debug, Default)]
pub struct LinkArgs {
    /// Override the skills source directory
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Only distribute skills whose directory name starts with this prefix
    #[arg(long)]
    pub prefix: Option<String>,
}

pub fn run(ctx: &AppContext, args: &LinkArgs) -> Result<()> {
    let source_dir = args.source.clone().unwrap_or_else(|| ctx.source_dir());
    let canonical_dir = ctx.canonical_dir();
    let prefix = args
        .prefix
        .clone()
        .unwrap_or_else(|| ctx.config.distribute.prefix.clone());

    let request = DistributeRequest {
        source_dir: &source_dir,
        canonical_dir: &canonical_dir,
        targets: &ctx.registry,
        discovery_prefix: &prefix,
        sweep_prefixes: &ctx.config.sweep.prefixes,
    };

    let robot = ctx.robot_mode;
    let report = distribute(&request, |target| {
        if !robot {
            print_target(target);
        }
    })?;

    if robot {
        return emit_robot(&robot_ok(&report));
    }

    if report.distributed == 0 {
        println!("No skills found in {}.", source_dir.display());
        return Ok(());
    }

    print_summary(&report, &canonical_dir);
    Ok(())
}

fn print_target(target: &TargetReport) {
    match &target.outcome {
        TargetOutcome::Skipped => {
            println!("{} {}: skipped (not installed)", "-".dimmed(), target.id);
        }
        TargetOutcome::Linked { counts } => {
            let total = counts.created + counts.replaced + counts.unchanged;
            let detail = if counts.unchanged == total {
                "unchanged".to_string()
            } else {
                format!(
                    "{} new, {} replaced, {} unchanged",
                    counts.created, counts.replaced, counts.unchanged
                )
            };
            println!("{} {}: {total} skills ({detail})", "+".green(), target.id);
        }
        TargetOutcome::Copied { copied } => {
            println!("{} {}: {copied} skills (copied)", "+".green(), target.id);
        }
    }
}

fn print_summary(report: &DistributeReport, canonical_dir: &std::path::Path) {
    println!(
        "\nCanonical: {} skills linked to {}",
        report.distributed,
        canonical_dir.display()
    );
    let reached = report.targets.len() - report.skipped.len();
    let mut line = format!(
        "Done: {} skills -> canonical + {reached} tools",
        report.distributed
    );
    if !report.skipped.is_empty() {
        line.push_str(&format!(" ({} skipped)", report.skipped.len()));
    }
    println!("{line}");
}
