//! Table tier: structured tables detected in per-page PDF text.
//!
//! Page text comes from lopdf. Tables are detected as runs of lines that
//! split into multiple cells on tabs or wide space gaps; the first row of
//! each table is consumed as headers. Pages without tables contribute an
//! entity block instead when the page text contains recognizable spans.

use super::ExtractionTier;
use crate::entities::EntityExtractor;
use crate::error::{ExtractError, ExtractResult};
use async_trait::async_trait;
use docstruct_core::{ExtractionMethod, ExtractionRecord, Row};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A table needs at least a header row and one data row.
const MIN_TABLE_ROWS: usize = 2;

static CELL_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\t| {2,}").unwrap());

/// First tier of the PDF chain.
pub struct TableTier {
    entities: EntityExtractor,
}

impl TableTier {
    /// Create the tier around the given entity extractor.
    pub fn new(entities: EntityExtractor) -> Self {
        Self { entities }
    }

    fn extract_sync(
        path: &PathBuf,
        entities: &EntityExtractor,
    ) -> ExtractResult<Option<ExtractionRecord>> {
        let document =
            lopdf::Document::load(path).map_err(|err| ExtractError::Pdf(err.to_string()))?;

        let mut blocks: Vec<ExtractionRecord> = Vec::new();

        // get_pages is ordered by page number.
        for (&page_number, _) in &document.get_pages() {
            let text = document
                .extract_text(&[page_number])
                .map_err(|err| ExtractError::Pdf(err.to_string()))?;

            let tables = detect_tables(&text);
            if tables.is_empty() {
                if text.trim().is_empty() {
                    continue;
                }
                let spans = entities.extract(&text);
                if !spans.is_empty() {
                    blocks.push(ExtractionRecord::from_spans(
                        &spans,
                        ExtractionMethod::PdfTables,
                    ));
                }
            } else {
                for table in tables {
                    if table.len() >= MIN_TABLE_ROWS {
                        blocks.push(table_record(&table));
                    }
                }
            }
        }

        if blocks.is_empty() {
            Ok(None)
        } else {
            Ok(Some(merge_blocks(blocks)))
        }
    }
}

#[async_trait]
impl ExtractionTier for TableTier {
    fn name(&self) -> &str {
        "tables"
    }

    async fn attempt(&self, path: &Path) -> ExtractResult<Option<ExtractionRecord>> {
        let path = path.to_path_buf();
        let entities = self.entities.clone();
        tokio::task::spawn_blocking(move || Self::extract_sync(&path, &entities)).await?
    }
}

/// Split a line into cells on tabs or runs of two or more spaces.
fn split_cells(line: &str) -> Vec<String> {
    CELL_SPLIT_RE
        .split(line.trim())
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// Detect aligned tables in page text.
///
/// A table is a run of consecutive lines that each split into two or
/// more cells with compatible cell counts (at most one column of drift
/// between rows). Runs shorter than two rows are discarded.
pub(crate) fn detect_tables(text: &str) -> Vec<Vec<Vec<String>>> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        let cells = split_cells(line);
        if cells.len() >= 2 {
            let compatible = current
                .first()
                .map(|first| cells.len().abs_diff(first.len()) <= 1)
                .unwrap_or(true);
            if !compatible {
                flush_run(&mut tables, &mut current);
            }
            current.push(cells);
        } else {
            flush_run(&mut tables, &mut current);
        }
    }
    flush_run(&mut tables, &mut current);

    tables
}

fn flush_run(tables: &mut Vec<Vec<Vec<String>>>, current: &mut Vec<Vec<String>>) {
    if current.len() >= MIN_TABLE_ROWS {
        tables.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Turn a detected table into a record: first row headers, remaining
/// rows data, short rows padded with empty strings.
fn table_record(table: &[Vec<String>]) -> ExtractionRecord {
    let columns: Vec<String> = table[0]
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let header = header.trim();
            if header.is_empty() {
                format!("Column {}", index + 1)
            } else {
                header.to_string()
            }
        })
        .collect();

    let mut record = ExtractionRecord::new(columns.clone(), ExtractionMethod::PdfTables);
    for row in &table[1..] {
        record.push_row(columns.iter().enumerate().map(|(index, column)| {
            (
                column.clone(),
                Value::from(row.get(index).cloned().unwrap_or_default()),
            )
        }));
    }
    record
}

/// Concatenate blocks row-wise with a union of their columns; cells a
/// block does not define come back as empty strings.
fn merge_blocks(blocks: Vec<ExtractionRecord>) -> ExtractionRecord {
    let mut columns: Vec<String> = Vec::new();
    for block in &blocks {
        for column in &block.columns {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let mut merged = ExtractionRecord::new(columns.clone(), ExtractionMethod::PdfTables);
    for block in blocks {
        for mut row in block.rows {
            let filled: Row = columns
                .iter()
                .map(|column| {
                    let value = row
                        .remove(column)
                        .unwrap_or_else(|| Value::String(String::new()));
                    (column.clone(), value)
                })
                .collect();
            merged.rows.push(filled);
        }
    }
    merged
}
