//! Core types for document extraction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single extracted row, mapping column name to cell value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Which extraction tier produced a record.
///
/// The string tags are part of the public API contract; clients match on
/// them, so they must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Delimited-table parse of a CSV file.
    CsvParser,
    /// Spreadsheet parse (first worksheet).
    ExcelParser,
    /// Entity spans recognized in plain text.
    NlpEntities,
    /// Per-line breakdown of plain text with word counts.
    LineBased,
    /// Tables detected in PDF page text. Historical wire tag.
    #[serde(rename = "pdfplumber_tables")]
    PdfTables,
    /// Entity spans recognized in OCR output.
    Ocr,
    /// Per-line breakdown of OCR output.
    OcrLines,
    /// Per-line breakdown of raw PDF text.
    BasicText,
}

impl ExtractionMethod {
    /// Every method, in tier/registration order.
    pub const ALL: [ExtractionMethod; 8] = [
        ExtractionMethod::PdfTables,
        ExtractionMethod::Ocr,
        ExtractionMethod::OcrLines,
        ExtractionMethod::BasicText,
        ExtractionMethod::NlpEntities,
        ExtractionMethod::LineBased,
        ExtractionMethod::CsvParser,
        ExtractionMethod::ExcelParser,
    ];

    /// Wire tag for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::CsvParser => "csv_parser",
            ExtractionMethod::ExcelParser => "excel_parser",
            ExtractionMethod::NlpEntities => "nlp_entities",
            ExtractionMethod::LineBased => "line_based",
            ExtractionMethod::PdfTables => "pdfplumber_tables",
            ExtractionMethod::Ocr => "ocr",
            ExtractionMethod::OcrLines => "ocr_lines",
            ExtractionMethod::BasicText => "basic_text",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a recognized entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// People, including fictional.
    Person,
    /// Companies, agencies, institutions.
    Org,
    /// Absolute or relative dates or periods.
    Date,
    /// Monetary values, including unit.
    Money,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
}

impl EntityLabel {
    /// Uppercase tag used in extracted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Date => "DATE",
            EntityLabel::Money => "MONEY",
            EntityLabel::Email => "EMAIL",
            EntityLabel::Phone => "PHONE",
        }
    }

    /// Human-readable explanation of the label.
    pub fn describe(&self) -> &'static str {
        match self {
            EntityLabel::Person => "People, including fictional",
            EntityLabel::Org => "Companies, agencies, institutions",
            EntityLabel::Date => "Absolute or relative dates or periods",
            EntityLabel::Money => "Monetary values, including unit",
            EntityLabel::Email => "Email address",
            EntityLabel::Phone => "Phone number",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located, labeled substring of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// The matched text.
    pub text: String,
    /// Entity category.
    pub label: EntityLabel,
    /// Byte offset of the span start in the source text.
    pub start: usize,
    /// Byte offset one past the span end.
    pub end: usize,
    /// Human-readable explanation of the label.
    pub description: String,
}

impl EntitySpan {
    /// Create a span, filling `description` from the label.
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
            description: label.describe().to_string(),
        }
    }
}

/// The uniform columns/rows output of any format extractor.
///
/// Invariant: every row's keys are a subset of `columns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Ordered column names.
    pub columns: Vec<String>,
    /// Extracted rows, keyed by column name.
    #[serde(rename = "data")]
    pub rows: Vec<Row>,
    /// Which tier produced this record.
    pub extraction_method: ExtractionMethod,
}

impl ExtractionRecord {
    /// Create an empty record with the given columns.
    pub fn new(columns: Vec<String>, extraction_method: ExtractionMethod) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            extraction_method,
        }
    }

    /// Append a row built from (column, value) pairs.
    pub fn push_row<I, K, V>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        let mut row = Row::new();
        for (key, value) in cells {
            let key = key.into();
            debug_assert!(
                self.columns.iter().any(|c| *c == key),
                "row key {key:?} is not a declared column"
            );
            row.insert(key, value.into());
        }
        self.rows.push(row);
    }

    /// Number of extracted rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True if no rows were extracted.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build an entity record from recognized spans.
    ///
    /// Column names are part of the wire contract.
    pub fn from_spans(spans: &[EntitySpan], extraction_method: ExtractionMethod) -> Self {
        let mut record = Self::new(
            ["Entity", "Label", "Start", "End", "Description"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extraction_method,
        );
        for span in spans {
            record.push_row([
                ("Entity", serde_json::Value::from(span.text.clone())),
                ("Label", serde_json::Value::from(span.label.as_str())),
                ("Start", serde_json::Value::from(span.start)),
                ("End", serde_json::Value::from(span.end)),
                ("Description", serde_json::Value::from(span.description.clone())),
            ]);
        }
        record
    }

    /// Build a per-line record from the non-blank lines of `text`.
    pub fn from_lines(text: &str, extraction_method: ExtractionMethod) -> Self {
        let mut record = Self::new(
            vec!["Line Number".to_string(), "Content".to_string()],
            extraction_method,
        );
        for (index, line) in non_blank_lines(text).enumerate() {
            record.push_row([
                ("Line Number", serde_json::Value::from(index + 1)),
                ("Content", serde_json::Value::from(line)),
            ]);
        }
        record
    }

    /// Build a per-line record with word counts from the non-blank lines
    /// of `text`.
    pub fn from_lines_with_word_counts(text: &str, extraction_method: ExtractionMethod) -> Self {
        let mut record = Self::new(
            vec![
                "Line Number".to_string(),
                "Content".to_string(),
                "Word Count".to_string(),
            ],
            extraction_method,
        );
        for (index, line) in non_blank_lines(text).enumerate() {
            let words = line.split_whitespace().count();
            record.push_row([
                ("Line Number", serde_json::Value::from(index + 1)),
                ("Content", serde_json::Value::from(line)),
                ("Word Count", serde_json::Value::from(words)),
            ]);
        }
        record
    }
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Final result of processing one uploaded document.
///
/// Created once per request and immutable after construction. `accuracy`
/// is a simulated heuristic confidence signal, not a measured metric; see
/// [`crate::confidence`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Always true for a returned result; failures surface as errors.
    pub success: bool,
    /// Original upload filename.
    pub filename: String,
    /// Declared MIME type of the upload.
    pub file_type: String,
    /// The extracted columns/rows record.
    pub extracted_data: ExtractionRecord,
    /// Wall-clock extraction duration in seconds.
    pub processing_time: f64,
    /// Heuristic confidence estimate in [0, 99.5].
    pub accuracy: f64,
    /// Number of extracted rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
}

impl ProcessingResult {
    /// Assemble a result, deriving counts from the record.
    pub fn new(
        filename: impl Into<String>,
        file_type: impl Into<String>,
        extracted_data: ExtractionRecord,
        processing_time: f64,
        accuracy: f64,
    ) -> Self {
        let row_count = extracted_data.row_count();
        let column_count = extracted_data.column_count();
        Self {
            success: true,
            filename: filename.into(),
            file_type: file_type.into(),
            extracted_data,
            processing_time,
            accuracy,
            row_count,
            column_count,
        }
    }
}
