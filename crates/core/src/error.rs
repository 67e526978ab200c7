//! Core Error Types
//!
//! Defines the error taxonomy shared by every crate in the rouge-harness
//! workspace. Each fatal condition of an evaluation run has its own variant
//! so callers can tell "nothing to evaluate" apart from "one candidate has no
//! references" without string matching.

use std::time::Duration;

use thiserror::Error;

/// Core error type for the rouge-harness workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// ROUGE installation or settings are invalid or missing
    #[error("Configuration error: {0}")]
    Config(String),

    /// No file in the system directory matched the candidate pattern
    #[error("No files matching the pattern {pattern} in the system summaries directory {directory}")]
    NoCandidates { pattern: String, directory: String },

    /// A matched candidate has no reference summaries
    #[error(
        "Could not find any model summaries for the system summary with ID {identifier}. \
         Specified model filename pattern was: {pattern}"
    )]
    MissingReferences { identifier: String, pattern: String },

    /// The external scorer exited unsuccessfully or produced undecodable output
    #[error("ROUGE exited with status {}: {output}", display_exit_code(.exit_code))]
    ExternalTool {
        exit_code: Option<i32>,
        output: String,
    },

    /// The external scorer did not finish within the allotted time
    #[error("ROUGE timed out after {limit:?}")]
    Timeout { limit: Duration },

    /// A task has more references than there are letter codes
    #[error("Task {task_id} has {count} model summaries; at most 26 are supported")]
    TooManyReferences { task_id: usize, count: usize },

    /// Variant candidate lists cannot be aligned
    #[error("Variant mismatch: {0}")]
    VariantMismatch(String),

    /// Filename pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),


    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

fn display_exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a pattern error
    pub fn pattern(msg: impl Into<String>) -> Self {
        Self::Pattern(msg.into())
    }

    /// Create a variant mismatch error
    pub fn variant_mismatch(msg: impl Into<String>) -> Self {
        Self::VariantMismatch(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a missing references error
    pub fn missing_references(identifier: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::MissingReferences {
            identifier: identifier.into(),
            pattern: pattern.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::config("ROUGE home not set");
        assert_eq!(err.to_string(), "Configuration error: ROUGE home not set");
    }

    #[test]
    fn test_timeout_display() {
        let err = CoreError::Timeout {
            limit: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "ROUGE timed out after 250ms");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
    }

    #[test]
    fn test_missing_references_mentions_identifier() {
        let err = CoreError::missing_references("042", "ref-#ID#.html");
        let msg = err.to_string();
        assert!(msg.contains("ID 042"));
        assert!(msg.contains("ref-#ID#.html"));
    }

    #[test]
    fn test_external_tool_display() {
        let err = CoreError::ExternalTool {
            exit_code: Some(2),
            output: "Can't open config".to_string(),
        };
        assert_eq!(err.to_string(), "ROUGE exited with status 2: Can't open config");

        let killed = CoreError::ExternalTool {
            exit_code: None,
            output: String::new(),
        };
        assert!(killed.to_string().contains("status signal"));
    }
}
