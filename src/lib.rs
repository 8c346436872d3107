//! skillfan - fan out agent skill definitions to installed AI coding tools.
//!
//! Skills live as directories (each with a `SKILL.md`) in a project tree.
//! The distribution engine links them into a canonical per-user directory
//! and from there into every tool registered in [`registry`], symlinking or
//! copying per target. Peripheral commands validate skills with the
//! external `skills-ref` tool, generate an `llms.txt` catalog, and gate
//! releases on front-matter versions.

pub mod app;
pub mod cli;
pub mod config;
pub mod distribute;
pub mod error;
pub mod frontmatter;
pub mod registry;
pub mod validator;

pub use error::{Result, SfError};
