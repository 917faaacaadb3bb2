//! Error types for kanri
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, empty title, unreadable upload)
//! - 4: Operation failed (io, serialization)
//!
//! Reducer-level lookups of missing ids are silent no-ops, not errors;
//! the variants here cover the CLI boundary where a value cannot be
//! acted on at all.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the kanri CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for kanri operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::EmptyTitle
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::FileNotFound(_) => exit_codes::USER_ERROR,

            Error::Io(_) | Error::Json(_) | Error::TomlParse(_) | Error::OperationFailed(_) => {
                exit_codes::OPERATION_FAILED
            }
        }
    }
}

/// Result type alias for kanri operations
pub type Result<T> = std::result::Result<T, Error>;
