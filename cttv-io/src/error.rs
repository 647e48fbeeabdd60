use std::io;
use thiserror::Error;

/// Error type for cttv-io operations.
#[derive(Error, Debug)]
pub enum SourceError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A record or response body was not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a tab separated input.
    #[error("Invalid TSV input: {0}")]
    Csv(#[from] csv::Error),

    /// The remote record service could not be reached or answered with an error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The remote record service answered with an unexpected document.
    #[error("Unexpected response from record service: {0}")]
    MalformedResponse(String),

    /// A required column is missing from a table header.
    #[error("Column '{0}' not found in header")]
    MissingColumn(String),

    /// A line of a headerless table has too few columns.
    #[error("Line {line} has {found} columns, expected at least {expected}")]
    ShortLine {
        line: usize,
        found: usize,
        expected: usize,
    },
}

/// Result type alias for cttv-io operations.
pub type Result<T> = std::result::Result<T, SourceError>;
