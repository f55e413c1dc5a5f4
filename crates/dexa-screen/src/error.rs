//! Error types for the screening library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for screening operations.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structural problem in otherwise readable CSV data.
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required metadata column is absent from the header.
    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    /// Empty file or no header row.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing or rotating the log file.
    #[error("Log error for '{path}': {source}")]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for screening operations.
pub type Result<T> = std::result::Result<T, ScreenError>;
