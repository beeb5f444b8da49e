//! Supported-format discovery endpoint.

use axum::{extract::State, Json};
use docstruct_core::ExtractionMethod;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FormatsResponse {
    pub supported_formats: Vec<String>,
    pub max_file_size: String,
    pub processing_methods: Vec<&'static str>,
}

/// List supported MIME types, the upload ceiling, and the extraction
/// method tags a result can carry.
/// GET /formats
pub async fn supported_formats(State(state): State<AppState>) -> Json<FormatsResponse> {
    Json(FormatsResponse {
        supported_formats: state
            .processor
            .supported_types()
            .into_iter()
            .map(str::to_string)
            .collect(),
        max_file_size: state.config.max_upload_display(),
        processing_methods: ExtractionMethod::ALL.iter().map(|m| m.as_str()).collect(),
    })
}
