//! Error Handling
//!
//! Application error type for settings, conversion and evaluation. Errors
//! raised by the matching and runner crates pass through unchanged as
//! `AppError::Core`, so callers can still tell the fatal conditions apart.

use rouge_harness_core::CoreError;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Errors from the matching/runner crates
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration errors (ROUGE installation, settings file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The underlying core error, if any
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            AppError::Core(err) => Some(err),
            _ => None,
        }
    }
}
