//! Plain-text extraction.
//!
//! Runs entity extraction over the full content; when no spans are found
//! the file degrades to a per-line breakdown with word counts.

use crate::entities::EntityExtractor;
use crate::error::ExtractResult;
use crate::FormatExtractor;
use async_trait::async_trait;
use docstruct_core::{ExtractionMethod, ExtractionRecord};
use std::path::Path;

/// Plain-text format extractor.
#[derive(Clone)]
pub struct TextExtractor {
    entities: EntityExtractor,
}

impl TextExtractor {
    /// Create a text extractor around the given entity extractor.
    pub fn new(entities: EntityExtractor) -> Self {
        Self { entities }
    }
}

#[async_trait]
impl FormatExtractor for TextExtractor {
    async fn extract(&self, path: &Path) -> ExtractResult<ExtractionRecord> {
        let text = tokio::fs::read_to_string(path).await?;

        let spans = self.entities.extract(&text);
        if spans.is_empty() {
            Ok(ExtractionRecord::from_lines_with_word_counts(
                &text,
                ExtractionMethod::LineBased,
            ))
        } else {
            Ok(ExtractionRecord::from_spans(
                &spans,
                ExtractionMethod::NlpEntities,
            ))
        }
    }

    fn supported_types(&self) -> &[&str] {
        &["text/plain"]
    }

    fn name(&self) -> &str {
        "text"
    }
}
