//! Centralized error types for backlog-cli.
//!
//! Every failure bubbles up unmodified to `main`, which prints it as a single
//! `Error:` line and exits with status 1.

use thiserror::Error;

use crate::api::error::{single_line, ApiError};
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// A required positional argument was not supplied.
    #[error("{0} required")]
    MissingArgument(&'static str),

    /// A JSON payload could not be parsed into the expected parameters.
    #[error("Invalid JSON: {message} (received: {received})")]
    InvalidJson { message: String, received: String },

    /// Arguments were well-formed but not acceptable.
    #[error("{0}")]
    Validation(String),

    /// The command line could not be parsed.
    #[error("{0}")]
    Usage(String),

    /// The result could not be written to standard output.
    #[error("failed to render output: {0}")]
    Output(String),
}

impl AppError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Build an `InvalidJson` error from a parser failure and the raw input.
    pub fn invalid_json(err: &serde_json::Error, received: &str) -> Self {
        AppError::InvalidJson {
            message: err.to_string(),
            received: single_line(received),
        }
    }

    /// Check if this error was raised before any network activity.
    pub fn is_local(&self) -> bool {
        !matches!(self, AppError::Api(_))
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
