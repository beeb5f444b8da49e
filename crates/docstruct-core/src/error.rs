//! Error taxonomy for document processing.

use thiserror::Error;

/// Result type alias for processing operations.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Errors surfaced to callers of the processing service.
///
/// Transient failures inside a fallback chain are never surfaced directly;
/// they are logged and trigger the next tier. Only these two kinds reach
/// the caller.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Declared MIME type has no registered extractor. No processing was
    /// attempted.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Extraction failed after every fallback tier was exhausted.
    #[error("Processing failed: {message}")]
    ProcessingFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ProcessError {
    /// Wrap a terminal extraction failure with its cause.
    pub fn failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::ProcessingFailed {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}
