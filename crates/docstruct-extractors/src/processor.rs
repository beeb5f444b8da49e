//! Document processing orchestration.
//!
//! Routes an uploaded file to its format extractor by declared MIME
//! type, times the extraction, scores the result, and assembles the
//! final [`ProcessingResult`].

use crate::entities::{EntityExtractor, NamedEntityModel};
use crate::csv_format::CsvExtractor;
use crate::excel::ExcelExtractor;
use crate::pdf::PdfExtractor;
use crate::text::TextExtractor;
use crate::FormatExtractor;
use docstruct_core::{confidence, ProcessError, ProcessResult, ProcessingResult};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Orchestrates format extractors behind a fixed MIME mapping.
///
/// One instance serves all requests; concurrent calls share only the
/// immutable entity model.
pub struct DocumentProcessor {
    extractors: Vec<Arc<dyn FormatExtractor>>,
    model_loaded: bool,
}

impl DocumentProcessor {
    /// Create a processor with the default extractor set around an
    /// optional entity model.
    pub fn new(model: Option<Arc<dyn NamedEntityModel>>) -> Self {
        let model_loaded = model.is_some();
        let entities = EntityExtractor::new(model);

        Self {
            extractors: vec![
                Arc::new(PdfExtractor::new(entities.clone())),
                Arc::new(TextExtractor::new(entities)),
                Arc::new(CsvExtractor::new()),
                Arc::new(ExcelExtractor::new()),
            ],
            model_loaded,
        }
    }

    /// Create a processor with an explicit extractor set.
    pub fn with_extractors(extractors: Vec<Arc<dyn FormatExtractor>>) -> Self {
        Self {
            extractors,
            model_loaded: false,
        }
    }

    /// True if an entity model was attached at construction.
    pub fn has_entity_model(&self) -> bool {
        self.model_loaded
    }

    /// All supported MIME types, in registration order.
    pub fn supported_types(&self) -> Vec<&str> {
        self.extractors
            .iter()
            .flat_map(|extractor| extractor.supported_types().iter().copied())
            .collect()
    }

    /// Check whether a declared MIME type is supported.
    pub fn supports(&self, mime_type: &str) -> bool {
        self.extractors
            .iter()
            .any(|extractor| extractor.supports(mime_type))
    }

    fn extractor_for(&self, mime_type: &str) -> Option<&Arc<dyn FormatExtractor>> {
        self.extractors
            .iter()
            .find(|extractor| extractor.supports(mime_type))
    }

    /// Process one uploaded document.
    ///
    /// Rejects unsupported MIME types before any file I/O. The timing
    /// covers the whole extraction including every fallback tier.
    pub async fn process(
        &self,
        path: &Path,
        file_type: &str,
        filename: &str,
    ) -> ProcessResult<ProcessingResult> {
        let extractor = self
            .extractor_for(file_type)
            .ok_or_else(|| ProcessError::UnsupportedFormat(file_type.to_string()))?;

        let started = Instant::now();
        let record = match extractor.extract(path).await {
            Ok(record) => record,
            Err(err) => {
                error!(filename, extractor = extractor.name(), error = %err, "extraction failed");
                return Err(ProcessError::failed(err));
            }
        };
        let processing_time = started.elapsed().as_secs_f64();

        let accuracy = confidence::estimate(&record);
        info!(
            filename,
            method = %record.extraction_method,
            rows = record.row_count(),
            columns = record.column_count(),
            elapsed_s = processing_time,
            "document processed"
        );

        Ok(ProcessingResult::new(
            filename,
            file_type,
            record,
            processing_time,
            accuracy,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RuleBasedModel;
    use docstruct_core::ExtractionMethod;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn processor() -> DocumentProcessor {
        DocumentProcessor::new(Some(Arc::new(RuleBasedModel::new())))
    }

    fn write_fixture(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_unsupported_mime_rejected_without_io() {
        // The path does not exist; rejection must happen before any read.
        let result = processor()
            .process(Path::new("/nonexistent/archive.zip"), "application/zip", "archive.zip")
            .await;

        assert!(matches!(result, Err(ProcessError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_csv_end_to_end() {
        let file = write_fixture("Name,Email,Age\nAda,ada@example.com,36\nGrace,,47\n");
        let result = processor()
            .process(file.path(), "text/csv", "people.csv")
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.filename, "people.csv");
        assert_eq!(result.file_type, "text/csv");
        assert_eq!(result.extracted_data.extraction_method, ExtractionMethod::CsvParser);
        assert_eq!(result.row_count, 2);
        assert_eq!(result.column_count, 3);
        assert_eq!(result.row_count, result.extracted_data.rows.len());
        assert_eq!(result.extracted_data.rows[1]["Email"], "");
        assert!(result.processing_time >= 0.0);
        assert!((85.0..=99.5).contains(&result.accuracy));
    }

    #[tokio::test]
    async fn test_text_with_entities() {
        let file = write_fixture("Reach Dr. Smith at smith@clinic.org or 555-867-5309.\n");
        let result = processor()
            .process(file.path(), "text/plain", "note.txt")
            .await
            .unwrap();

        assert_eq!(result.extracted_data.extraction_method, ExtractionMethod::NlpEntities);
        assert!(result.row_count >= 3);
    }

    #[tokio::test]
    async fn test_text_without_model_degrades_to_lines() {
        let file = write_fixture("Contact: a@b.com");
        let no_model = DocumentProcessor::new(None);
        let result = no_model
            .process(file.path(), "text/plain", "note.txt")
            .await
            .unwrap();

        assert_eq!(result.extracted_data.extraction_method, ExtractionMethod::LineBased);
        assert_eq!(result.row_count, 1);
        assert_eq!(result.extracted_data.rows[0]["Content"], "Contact: a@b.com");
    }

    #[tokio::test]
    async fn test_extraction_failure_carries_cause() {
        let file = write_fixture("not a workbook");
        let result = processor()
            .process(file.path(), "application/vnd.ms-excel", "broken.xls")
            .await;

        match result {
            Err(ProcessError::ProcessingFailed { source, .. }) => assert!(source.is_some()),
            other => panic!("expected ProcessingFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_supported_types_cover_all_formats() {
        let processor = processor();
        for mime in [
            "application/pdf",
            "text/plain",
            "text/csv",
            "application/vnd.ms-excel",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ] {
            assert!(processor.supports(mime), "missing {mime}");
        }
        assert!(!processor.supports("application/zip"));
        assert!(processor.has_entity_model());
    }
}
