//! Spreadsheet extraction via calamine.
//!
//! The primary engine opens the workbook as xlsx; on failure the
//! format-autodetecting engine is tried before the error propagates.
//! The first worksheet's first row becomes the columns.

use crate::error::{ExtractError, ExtractResult};
use crate::FormatExtractor;
use async_trait::async_trait;
use calamine::{open_workbook, open_workbook_auto, Data, Range, Reader, Xlsx};
use docstruct_core::{ExtractionMethod, ExtractionRecord};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Spreadsheet format extractor.
#[derive(Debug, Clone, Default)]
pub struct ExcelExtractor;

impl ExcelExtractor {
    /// Create a new spreadsheet extractor.
    pub fn new() -> Self {
        Self
    }

    fn extract_sync(path: &PathBuf) -> ExtractResult<ExtractionRecord> {
        let range = Self::read_first_sheet(path)?;
        let mut rows = range.rows();

        let Some(header_row) = rows.next() else {
            // Empty worksheet: an empty record, not an error.
            return Ok(ExtractionRecord::new(Vec::new(), ExtractionMethod::ExcelParser));
        };

        let columns: Vec<String> = header_row
            .iter()
            .enumerate()
            .map(|(index, cell)| Self::header_name(cell, index))
            .collect();
        let mut record = ExtractionRecord::new(columns.clone(), ExtractionMethod::ExcelParser);

        for row in rows {
            record.push_row(columns.iter().enumerate().map(|(index, column)| {
                let value = row.get(index).map(Self::cell_value).unwrap_or_else(|| {
                    Value::String(String::new())
                });
                (column.clone(), value)
            }));
        }

        Ok(record)
    }

    /// Open the workbook with the xlsx engine, retrying with format
    /// autodetection, and return the first worksheet.
    fn read_first_sheet(path: &PathBuf) -> ExtractResult<Range<Data>> {
        match open_workbook::<Xlsx<_>, _>(path) {
            Ok(mut workbook) => Self::first_range(&mut workbook),
            Err(primary) => {
                warn!(
                    path = %path.display(),
                    error = %primary,
                    "xlsx engine failed, retrying with format autodetection"
                );
                let mut workbook = open_workbook_auto(path)
                    .map_err(|err| ExtractError::Spreadsheet(err.to_string()))?;
                Self::first_range(&mut workbook)
            }
        }
    }

    fn first_range<RS, R>(workbook: &mut R) -> ExtractResult<Range<Data>>
    where
        RS: std::io::Read + std::io::Seek,
        R: Reader<RS>,
        R::Error: std::fmt::Display,
    {
        workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ExtractError::Spreadsheet("workbook has no worksheets".to_string()))?
            .map_err(|err| ExtractError::Spreadsheet(err.to_string()))
    }

    fn header_name(cell: &Data, index: usize) -> String {
        let name = cell.to_string();
        let name = name.trim();
        if name.is_empty() {
            format!("Column {}", index + 1)
        } else {
            name.to_string()
        }
    }

    /// Map a spreadsheet cell to a JSON value. Empty cells become empty
    /// strings; numeric and boolean cells keep their type.
    fn cell_value(cell: &Data) -> Value {
        match cell {
            Data::Empty => Value::String(String::new()),
            Data::String(text) => Value::String(text.clone()),
            Data::Int(number) => Value::Number((*number).into()),
            Data::Float(number) => serde_json::Number::from_f64(*number)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(number.to_string())),
            Data::Bool(flag) => Value::Bool(*flag),
            other => Value::String(other.to_string()),
        }
    }
}

#[async_trait]
impl FormatExtractor for ExcelExtractor {
    async fn extract(&self, path: &Path) -> ExtractResult<ExtractionRecord> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::extract_sync(&path)).await?
    }

    fn supported_types(&self) -> &[&str] {
        &[
            "application/vnd.ms-excel",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ]
    }

    fn name(&self) -> &str {
        "excel"
    }
}
