//! Error types for dataset adapters

use thiserror::Error;

/// Adapter errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input file not found: {0}")]
    NotFound(String),

    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, Error>;
