//! Command-line interface.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "sf", version, about = "Distribute agent skills to installed AI coding tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_anywhere() {
        let cli = Cli::try_parse_from(["sf", "link", "--robot", "-vv"]).unwrap();
        assert!(cli.robot);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Link(_)));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["sf", "frobnicate"]).is_err());
    }
}
