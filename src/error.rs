//! Custom error types for settleup-summary
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for settleup-summary operations
#[derive(Error, Debug)]
pub enum SummaryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for in-memory transforms
    #[error("Validation error: {0}")]
    Validation(String),

    /// A record in the export could not be parsed
    #[error("Malformed input{}: {message}", line_suffix(.line))]
    MalformedInput { line: Option<u64>, message: String },

    /// More distinct values than a consumer can present
    #[error("Unsupported scale: {count} {what} (at most {limit} supported)")]
    UnsupportedScale {
        what: &'static str,
        count: usize,
        limit: usize,
    },
}

impl SummaryError {
    /// Create a malformed input error without line information
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            line: None,
            message: message.into(),
        }
    }

    /// Create a malformed input error for a specific line of the export
    pub fn malformed_at(line: u64, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            line: Some(line),
            message: message.into(),
        }
    }

    /// Attach a line number to a malformed input error that has none
    pub fn at_line(self, line: u64) -> Self {
        match self {
            Self::MalformedInput {
                line: None,
                message,
            } => Self::MalformedInput {
                line: Some(line),
                message,
            },
            other => other,
        }
    }

    /// Check if this is a malformed input error
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SummaryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SummaryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for SummaryError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io.to_string()),
            csv::ErrorKind::Utf8 { err, .. } => Self::MalformedInput {
                line,
                message: format!("invalid UTF-8: {}", err),
            },
            kind => Self::MalformedInput {
                line,
                message: format!("{:?}", kind),
            },
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

/// Result type alias for settleup-summary operations
pub type SummaryResult<T> = Result<T, SummaryError>;
