//! Server state management.

use crate::config::ServerConfig;
use docstruct_extractors::DocumentProcessor;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The processing core; shared read-only across requests.
    pub processor: Arc<DocumentProcessor>,
    /// Server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Create application state around a processor.
    pub fn new(processor: DocumentProcessor, config: ServerConfig) -> Self {
        Self {
            processor: Arc::new(processor),
            config,
        }
    }
}
