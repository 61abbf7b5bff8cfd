//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading the storm event file
///
/// All of these are fatal at startup; field-level parse failures never
/// show up here, they become absent values instead.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV decoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid timestamp in row {row}, column {column}: {value:?}")]
    InvalidTimestamp {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Input contains no event records")]
    Empty,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
