//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub entity_model_loaded: bool,
    pub supported_formats: Vec<String>,
    pub version: String,
}

/// Health check endpoint.
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        entity_model_loaded: state.processor.has_entity_model(),
        supported_formats: state
            .processor
            .supported_types()
            .into_iter()
            .map(str::to_string)
            .collect(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
