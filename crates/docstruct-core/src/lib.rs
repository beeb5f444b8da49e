//! docstruct-core - Core types for docstruct.
//!
//! This crate provides the shared data model for the docstruct document
//! extraction service: the uniform columns/rows record every format
//! extractor produces, entity spans, the per-request processing result,
//! the error taxonomy, and the confidence estimator.
//!
//! # Example
//!
//! ```
//! use docstruct_core::{confidence, ExtractionMethod, ExtractionRecord};
//!
//! let mut record = ExtractionRecord::new(
//!     vec!["Name".to_string(), "Email".to_string()],
//!     ExtractionMethod::CsvParser,
//! );
//! record.push_row([("Name", "Ada"), ("Email", "ada@example.com")]);
//!
//! assert_eq!(record.row_count(), 1);
//! let score = confidence::estimate(&record);
//! assert!((85.0..=99.5).contains(&score));
//! ```

pub mod confidence;
pub mod error;
pub mod types;

pub use error::{ProcessError, ProcessResult};
pub use types::{
    EntityLabel, EntitySpan, ExtractionMethod, ExtractionRecord, ProcessingResult, Row,
};
