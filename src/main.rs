//! sf - Skill Fan-out CLI
//!
//! Distribute agent skill definitions to every AI coding tool installed on
//! this machine.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skillfan::Result;
use skillfan::app::AppContext;
use skillfan::cli::Cli;
use skillfan::cli::output::{emit_robot, robot_error};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.robot {
                // Robot mode: JSON error envelope to stdout
                let code = match &e {
                    skillfan::SfError::ValidatorNotFound(_) => "validator_not_found",
                    skillfan::SfError::ValidationFailed(_) => "validation_failed",
                    skillfan::SfError::VersionMismatch(_) => "version_mismatch",
                    skillfan::SfError::UnknownTarget(_) => "unknown_target",
                    _ => "error",
                };
                if emit_robot(&robot_error(code, e.to_string())).is_err() {
                    eprintln!("Error: {e}");
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    skillfan::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skillfan=info",
        1 => "info,skillfan=debug",
        2 => "debug,skillfan=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        // JSON logging for robot mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Human-readable logging
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
