//! Route definitions for the REST API.

mod formats;
mod health;
mod info;
mod process;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(info::service_info))
        .route("/health", get(health::health_check))
        .route("/formats", get(formats::supported_formats))
        .route("/process", post(process::process_document))
        .with_state(state)
}

pub use formats::*;
pub use health::*;
pub use info::*;
pub use process::*;
