//! docstruct-server - REST API server for docstruct.
//!
//! Owns the transport boundary: uploads, scratch files, the JSON
//! envelope, and HTTP status mapping. The extraction core only ever sees
//! a readable path and a declared MIME type.
//!
//! # Example
//!
//! ```ignore
//! use docstruct_server::{create_server, AppState, ServerConfig};
//! use docstruct_extractors::DocumentProcessor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::from_env();
//!     let state = AppState::new(DocumentProcessor::new(None), config);
//!     let app = create_server(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Multipart framing overhead allowed on top of the upload limit.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + BODY_LIMIT_SLACK;

    routes::create_router(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Permissive CORS middleware.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
