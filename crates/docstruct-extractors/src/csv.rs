//! CSV extraction.
//!
//! Parses the file as a delimited table: the header row becomes the
//! columns and every following record becomes a row. No fallback - a
//! parse failure propagates to the caller.

use crate::error::ExtractResult;
use crate::FormatExtractor;
use async_trait::async_trait;
use csv::ReaderBuilder;
use docstruct_core::{ExtractionMethod, ExtractionRecord};
use std::path::{Path, PathBuf};

/// CSV format extractor.
#[derive(Debug, Clone, Default)]
pub struct CsvExtractor;

impl CsvExtractor {
    /// Create a new CSV extractor.
    pub fn new() -> Self {
        Self
    }

    fn extract_sync(path: &PathBuf) -> ExtractResult<ExtractionRecord> {
        // Flexible parsing: short rows are padded below so missing cells
        // come back as empty strings.
        let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut record = ExtractionRecord::new(columns.clone(), ExtractionMethod::CsvParser);

        for row in reader.records() {
            let row = row?;
            record.push_row(
                columns
                    .iter()
                    .enumerate()
                    .map(|(index, column)| (column.clone(), row.get(index).unwrap_or(""))),
            );
        }

        Ok(record)
    }
}

#[async_trait]
impl FormatExtractor for CsvExtractor {
    async fn extract(&self, path: &Path) -> ExtractResult<ExtractionRecord> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::extract_sync(&path)).await?
    }

    fn supported_types(&self) -> &[&str] {
        &["text/csv"]
    }

    fn name(&self) -> &str {
        "csv"
    }
}
