//! Error types for skillfan.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid skill: {0}")]
    InvalidSkill(String),

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("validator not found: {0}")]
    ValidatorNotFound(String),

    #[error("unknown target: {0}")]
    UnknownTarget(String),

    #[error("version mismatch: {0}")]
    VersionMismatch(String),
}

pub type Result<T> = std::result::Result<T, SfError>;
