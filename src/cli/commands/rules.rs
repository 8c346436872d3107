//! sf rules - link rule files into every installed tool

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::distribute::{install_link, path_exists, sweep};
use crate::error::{Result, SfError};
use crate::registry::{self, RuleMethod, RuleTarget};

#[derive(Args, Debug, Default)]
pub struct RulesArgs {}

#[derive(Serialize)]
struct RuleReport {
    id: String,
    skipped: bool,
    cleaned: Vec<String>,
    linked: usize,
    copied: usize,
}

pub fn run(ctx: &AppContext, _args: &RulesArgs) -> Result<()> {
    let rule_targets = registry::rule_targets(&ctx.home, &ctx.root);

    let mut reports = Vec::new();
    let mut linked_tools = 0usize;
    let mut skipped = 0usize;

    for rule_target in &rule_targets {
        if !path_exists(&rule_target.root_dir)? {
            if !ctx.robot_mode {
                println!(
                    "{} {}: skipped (not installed)",
                    "-".dimmed(),
                    rule_target.target_id
                );
            }
            skipped += 1;
            reports.push(RuleReport {
                id: rule_target.target_id.to_string(),
                skipped: true,
                cleaned: Vec::new(),
                linked: 0,
                copied: 0,
            });
            continue;
        }

        let report = process(rule_target)?;
        if !ctx.robot_mode {
            print_rule_target(&report);
        }
        linked_tools += 1;
        reports.push(report);
    }

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&reports));
    }

    let mut line = format!("\nDone: rules linked to {linked_tools} tools");
    if skipped > 0 {
        line.push_str(&format!(" ({skipped} skipped)"));
    }
    println!("{line}");
    Ok(())
}

fn process(rule_target: &RuleTarget) -> Result<RuleReport> {
    let cleaned = match &rule_target.cleanup {
        Some(cleanup) => sweep(&cleanup.dir, &cleanup.prefix)?,
        None => Vec::new(),
    };

    let mut linked = 0usize;
    let mut copied = 0usize;

    for link in &rule_target.links {
        match link.method {
            RuleMethod::Symlink => {
                install_link(&link.source, &link.target)?;
                linked += 1;
            }
            RuleMethod::CopyFile => {
                let content = std::fs::read_to_string(&link.source).map_err(|err| {
                    SfError::Config(format!("read rule {}: {err}", link.source.display()))
                })?;
                if let Some(parent) = link.target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&link.target, content)?;
                copied += 1;
            }
        }
    }

    Ok(RuleReport {
        id: rule_target.target_id.to_string(),
        skipped: false,
        cleaned,
        linked,
        copied,
    })
}

fn print_rule_target(report: &RuleReport) {
    let mut parts = Vec::new();
    if !report.cleaned.is_empty() {
        parts.push(format!("cleaned {}", report.cleaned.len()));
    }
    if report.linked > 0 {
        parts.push(format!("{} symlinked", report.linked));
    }
    if report.copied > 0 {
        parts.push(format!("{} copied", report.copied));
    }
    println!("{} {}: {}", "+".green(), report.id, parts.join(", "));
}
