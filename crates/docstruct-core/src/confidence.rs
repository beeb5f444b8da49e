//! Simulated confidence estimation for extracted records.
//!
//! The score is a heuristic signal derived only from the shape of the
//! record (row and column counts). It is not measured accuracy and has no
//! ground truth; it exists so clients can rank extractions relative to
//! each other.

use crate::types::ExtractionRecord;

/// Floor of the confidence scale.
pub const BASE_CONFIDENCE: f64 = 85.0;

/// Ceiling of the confidence scale.
pub const MAX_CONFIDENCE: f64 = 99.5;

/// Estimate a confidence score for an extracted record.
///
/// Base 85.0, plus up to 10 points for row volume (one point per ten
/// rows) and up to 5 points for column breadth, clamped to 99.5. Total
/// over all inputs; never fails.
pub fn estimate(record: &ExtractionRecord) -> f64 {
    let mut score = BASE_CONFIDENCE;

    let rows = record.row_count();
    if rows > 0 {
        score += (rows as f64 / 10.0).min(10.0);
    }

    let columns = record.column_count();
    if columns > 1 {
        score += (columns as f64).min(5.0);
    }

    score.min(MAX_CONFIDENCE)
}
