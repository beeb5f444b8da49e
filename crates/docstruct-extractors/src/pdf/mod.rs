//! PDF extraction through an ordered chain of fallback tiers.
//!
//! Each tier is a strategy value rather than a nested catch block: the
//! chain runner tries tiers in order, treats both a raised error and an
//! empty outcome as a signal to degrade, and propagates only the final
//! tier's error.
//!
//! Default chain: table detection -> OCR (with the `ocr` feature) -> raw
//! text lines.

mod basic;
mod tables;

#[cfg(feature = "ocr")]
mod ocr;

pub use basic::BasicTextTier;
pub use tables::TableTier;

#[cfg(feature = "ocr")]
pub use ocr::OcrTier;

use crate::entities::EntityExtractor;
use crate::error::{ExtractError, ExtractResult};
use crate::FormatExtractor;
use async_trait::async_trait;
use docstruct_core::ExtractionRecord;
use std::path::Path;
use tracing::{info, warn};

/// One strategy in the PDF fallback chain.
#[async_trait]
pub trait ExtractionTier: Send + Sync {
    /// Tier name for logging.
    fn name(&self) -> &str;

    /// Attempt extraction. `Ok(None)` means the tier is unavailable or
    /// found nothing; `Err` means it raised. Either degrades the chain
    /// to the next tier.
    async fn attempt(&self, path: &Path) -> ExtractResult<Option<ExtractionRecord>>;
}

/// PDF format extractor running an ordered tier chain.
pub struct PdfExtractor {
    tiers: Vec<Box<dyn ExtractionTier>>,
}

impl PdfExtractor {
    /// Create the default chain around the given entity extractor.
    pub fn new(entities: EntityExtractor) -> Self {
        let mut tiers: Vec<Box<dyn ExtractionTier>> =
            vec![Box::new(TableTier::new(entities.clone()))];

        #[cfg(feature = "ocr")]
        tiers.push(Box::new(OcrTier::new(entities.clone())));

        tiers.push(Box::new(BasicTextTier::new()));

        Self { tiers }
    }

    /// Create an extractor with an explicit tier chain.
    pub fn with_tiers(tiers: Vec<Box<dyn ExtractionTier>>) -> Self {
        Self { tiers }
    }

    /// Number of tiers in the chain.
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }
}

#[async_trait]
impl FormatExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> ExtractResult<ExtractionRecord> {
        let last = self.tiers.len().saturating_sub(1);

        for (index, tier) in self.tiers.iter().enumerate() {
            match tier.attempt(path).await {
                Ok(Some(record)) => {
                    info!(
                        tier = tier.name(),
                        rows = record.row_count(),
                        "pdf extraction succeeded"
                    );
                    return Ok(record);
                }
                Ok(None) => {
                    warn!(tier = tier.name(), "tier produced no result, degrading");
                }
                Err(err) if index == last => return Err(err),
                Err(err) => {
                    warn!(tier = tier.name(), error = %err, "tier failed, degrading");
                }
            }
        }

        Err(ExtractError::Pdf(
            "no extraction tier produced a result".to_string(),
        ))
    }

    fn supported_types(&self) -> &[&str] {
        &["application/pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstruct_core::ExtractionMethod;

    struct FixedTier {
        name: &'static str,
        outcome: fn() -> ExtractResult<Option<ExtractionRecord>>,
    }

    #[async_trait]
    impl ExtractionTier for FixedTier {
        fn name(&self) -> &str {
            self.name
        }

        async fn attempt(&self, _path: &Path) -> ExtractResult<Option<ExtractionRecord>> {
            (self.outcome)()
        }
    }

    fn record() -> ExtractResult<Option<ExtractionRecord>> {
        Ok(Some(ExtractionRecord::from_lines(
            "hit",
            ExtractionMethod::BasicText,
        )))
    }

    fn nothing() -> ExtractResult<Option<ExtractionRecord>> {
        Ok(None)
    }

    fn failure() -> ExtractResult<Option<ExtractionRecord>> {
        Err(ExtractError::Pdf("tier broke".to_string()))
    }

    fn chain(outcomes: &[fn() -> ExtractResult<Option<ExtractionRecord>>]) -> PdfExtractor {
        PdfExtractor::with_tiers(
            outcomes
                .iter()
                .map(|&outcome| {
                    Box::new(FixedTier {
                        name: "fixed",
                        outcome,
                    }) as Box<dyn ExtractionTier>
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let extractor = chain(&[record, failure]);
        let result = extractor.extract(Path::new("ignored.pdf")).await.unwrap();
        assert_eq!(result.extraction_method, ExtractionMethod::BasicText);
    }

    #[tokio::test]
    async fn test_error_degrades_to_next_tier() {
        let extractor = chain(&[failure, record]);
        assert!(extractor.extract(Path::new("ignored.pdf")).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_outcome_degrades_to_next_tier() {
        let extractor = chain(&[nothing, record]);
        assert!(extractor.extract(Path::new("ignored.pdf")).await.is_ok());
    }

    #[tokio::test]
    async fn test_final_tier_error_propagates() {
        let extractor = chain(&[nothing, failure]);
        let err = extractor.extract(Path::new("ignored.pdf")).await.unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
        assert!(err.to_string().contains("tier broke"));
    }

    #[tokio::test]
    async fn test_all_tiers_empty_is_an_error() {
        let extractor = chain(&[nothing, nothing]);
        assert!(extractor.extract(Path::new("ignored.pdf")).await.is_err());
    }

    #[test]
    fn test_default_chain_shape() {
        let extractor = PdfExtractor::new(EntityExtractor::new(None));
        #[cfg(feature = "ocr")]
        assert_eq!(extractor.tier_count(), 3);
        #[cfg(not(feature = "ocr"))]
        assert_eq!(extractor.tier_count(), 2);
        assert!(extractor.supports("application/pdf"));
    }
}
