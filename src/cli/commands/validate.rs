//! sf validate - run the external skills-ref validator over every skill

use std::path::{Path, PathBuf};
use std::process::Command;

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_partial};
use crate::distribute::discover_skills;
use crate::error::{Result, SfError};
use crate::validator::{INSTALL_HINT, Validator};

#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Directory of skill folders to validate
    #[arg(long, value_name = "DIR")]
    pub skills: Option<PathBuf>,

    /// Create the validation venv and install skills-ref into it
    #[arg(long, conflicts_with = "uninstall")]
    pub install: bool,

    /// Remove the validation venv
    #[arg(long)]
    pub uninstall: bool,
}

#[derive(Serialize)]
struct SkillVerdict {
    skill: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stderr: Option<String>,
}

pub fn run(ctx: &AppContext, args: &ValidateArgs) -> Result<()> {
    let venv_dir = ctx.root.join(&ctx.config.validator.venv_dir);

    if args.install {
        return install_venv(&venv_dir);
    }
    if args.uninstall {
        return uninstall_venv(&venv_dir);
    }

    let skills_dir = args.skills.clone().unwrap_or_else(|| ctx.skills_dir());
    let names = discover_skills(&skills_dir, "")?;
    if names.is_empty() {
        return Err(SfError::InvalidSkill(format!(
            "no skill directories found under {}",
            skills_dir.display()
        )));
    }

    let first = skills_dir.join(&names[0]);
    let validator = Validator::detect(&venv_dir, &first)?
        .ok_or_else(|| SfError::ValidatorNotFound(format!("skills-ref\n{INSTALL_HINT}")))?;
    tracing::info!(method = validator.label(), "validator selected");

    let mut verdicts = Vec::new();
    let mut failed = 0usize;
    for name in &names {
        let verdict = validator.validate(&skills_dir.join(name))?;
        match verdict {
            Ok(()) => {
                if !ctx.robot_mode {
                    println!("{} {name}", "✓".green());
                }
                verdicts.push(SkillVerdict {
                    skill: name.clone(),
                    ok: true,
                    stderr: None,
                });
            }
            Err(diag) => {
                if !ctx.robot_mode {
                    eprintln!("{} {name}", "✗".red());
                    if !diag.stderr.is_empty() {
                        eprintln!("{}", diag.stderr);
                    }
                }
                failed += 1;
                verdicts.push(SkillVerdict {
                    skill: name.clone(),
                    ok: false,
                    stderr: Some(diag.stderr),
                });
            }
        }
    }

    if ctx.robot_mode {
        emit_robot(&robot_partial(&verdicts, names.len() - failed, failed))?;
    } else if failed == 0 {
        println!("\nValidated {} skill(s).", names.len());
    }

    if failed > 0 {
        return Err(SfError::ValidationFailed(format!(
            "{failed} of {} skill(s) failed validation",
            names.len()
        )));
    }
    Ok(())
}

fn install_venv(venv_dir: &Path) -> Result<()> {
    let python = if cfg!(windows) { "python" } else { "python3" };
    println!("Creating validation venv at {} ...", venv_dir.display());
    run_checked(Command::new(python).args(["-m", "venv"]).arg(venv_dir))?;

    let venv_python = if cfg!(windows) {
        venv_dir.join("Scripts").join("python.exe")
    } else {
        venv_dir.join("bin").join("python")
    };
    println!("Installing skills-ref ...");
    run_checked(Command::new(venv_python).args(["-m", "pip", "install", "--quiet", "skills-ref"]))?;

    println!("Done. Run sf validate to check all skills.");
    Ok(())
}

fn uninstall_venv(venv_dir: &Path) -> Result<()> {
    if !venv_dir.exists() {
        println!("No validation venv found. Nothing to remove.");
        return Ok(());
    }
    std::fs::remove_dir_all(venv_dir)?;
    println!("Removed {}", venv_dir.display());
    Ok(())
}

fn run_checked(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .status()
        .map_err(|err| SfError::Config(format!("spawn {:?}: {err}", cmd.get_program())))?;
    if !status.success() {
        return Err(SfError::Config(format!(
            "{:?} exited with {status}",
            cmd.get_program()
        )));
    }
    Ok(())
}
