//! Extraction error types.

use thiserror::Error;

/// Errors that can occur inside a format extractor.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// IO error while reading the source file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse error.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet parse error (all engines exhausted).
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// PDF-specific extraction error.
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// Task join error from spawn_blocking.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
