//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod catalog;
pub mod check_version;
pub mod clean;
pub mod link;
pub mod rules;
pub mod targets;
pub mod validate;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Distribute skills to canonical and every installed tool
    Link(link::LinkArgs),

    /// Link rule files into every installed tool
    Rules(rules::RulesArgs),

    /// Remove stale skill entries without reinstalling
    Clean(clean::CleanArgs),

    /// Show the installation registry
    Targets(targets::TargetsArgs),

    /// Validate skills with the external skills-ref tool
    Validate(validate::ValidateArgs),

    /// Generate llms.txt from skill front matter
    Catalog(catalog::CatalogArgs),

    /// Check skill versions against the expected release version
    CheckVersion(check_version::CheckVersionArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Link(args) => link::run(ctx, args),
        Commands::Rules(args) => rules::run(ctx, args),
        Commands::Clean(args) => clean::run(ctx, args),
        Commands::Targets(args) => targets::run(ctx, args),
        Commands::Validate(args) => validate::run(ctx, args),
        Commands::Catalog(args) => catalog::run(ctx, args),
        Commands::CheckVersion(args) => check_version::run(ctx, args),
    }
}
