//! docstruct-extractors - Format-specific extraction for document ingestion.
//!
//! Converts uploaded documents (PDF, plain text, CSV, spreadsheet) into the
//! uniform columns/rows [`ExtractionRecord`] via a fixed MIME-type mapping.
//! The PDF path degrades gracefully through an ordered chain of extraction
//! tiers (table detection, OCR, raw text).
//!
//! # Features
//!
//! - `ocr` - PDF page rasterization via pdfium plus Tesseract OCR (requires
//!   the pdfium and tesseract native libraries at runtime)
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docstruct_extractors::{DocumentProcessor, RuleBasedModel};
//!
//! let processor = DocumentProcessor::new(Some(Arc::new(RuleBasedModel::new())));
//! let result = processor
//!     .process("/tmp/upload.csv".as_ref(), "text/csv", "upload.csv")
//!     .await?;
//! println!("{} rows via {}", result.row_count, result.extracted_data.extraction_method);
//! ```

mod entities;
mod error;
mod excel;
mod pdf;
mod processor;
mod text;

#[path = "csv.rs"]
mod csv_format;

pub use csv_format::CsvExtractor;
pub use entities::{EntityExtractor, ModelError, NamedEntityModel, RuleBasedModel};
pub use error::{ExtractError, ExtractResult};
pub use excel::ExcelExtractor;
pub use pdf::{ExtractionTier, PdfExtractor};
pub use processor::DocumentProcessor;
pub use text::TextExtractor;

use async_trait::async_trait;
use docstruct_core::ExtractionRecord;
use std::path::Path;

/// Core extraction trait - one implementation per supported input format.
///
/// Implementations receive a readable file path (scratch-file lifecycle
/// belongs to the caller) and produce the uniform record, or fail with an
/// [`ExtractError`] once their own fallbacks are exhausted.
#[async_trait]
pub trait FormatExtractor: Send + Sync {
    /// Extract a columns/rows record from the file at `path`.
    async fn extract(&self, path: &Path) -> ExtractResult<ExtractionRecord>;

    /// Declared MIME types this extractor handles.
    fn supported_types(&self) -> &[&str];

    /// Check if this extractor handles the given MIME type.
    fn supports(&self, mime_type: &str) -> bool {
        self.supported_types().contains(&mime_type)
    }

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
