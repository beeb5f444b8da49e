//! Basic tier: raw page text, no rendering.
//!
//! Final tier of the chain - its errors propagate to the caller.

use super::ExtractionTier;
use crate::error::{ExtractError, ExtractResult};
use async_trait::async_trait;
use docstruct_core::{ExtractionMethod, ExtractionRecord};
use std::path::Path;

/// Last-resort PDF tier: whole-document text as numbered lines with
/// word counts.
#[derive(Debug, Clone, Default)]
pub struct BasicTextTier;

impl BasicTextTier {
    /// Create the tier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExtractionTier for BasicTextTier {
    fn name(&self) -> &str {
        "basic_text"
    }

    async fn attempt(&self, path: &Path) -> ExtractResult<Option<ExtractionRecord>> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let text = pdf_extract::extract_text(&path)
                .map_err(|err| ExtractError::Pdf(err.to_string()))?;
            Ok(Some(ExtractionRecord::from_lines_with_word_counts(
                &text,
                ExtractionMethod::BasicText,
            )))
        })
        .await?
    }
}
