//! docstruct-server - REST API server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use docstruct_extractors::{DocumentProcessor, NamedEntityModel, RuleBasedModel};
use docstruct_server::{create_server, AppState, ServerConfig};
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("docstruct_server=debug".parse().unwrap()),
        )
        .init();

    let config = ServerConfig::from_env();

    // Entity model is constructed once and shared read-only; without it
    // entity extraction yields no spans and text paths use their
    // line-based fallbacks.
    let model: Option<Arc<dyn NamedEntityModel>> = if config.entity_model_enabled {
        info!("entity model loaded (rule-based)");
        Some(Arc::new(RuleBasedModel::new()))
    } else {
        warn!("entity model disabled; text extraction degrades to line-based records");
        None
    };

    let processor = DocumentProcessor::new(model);
    let state = AppState::new(processor, config.clone());
    let app = create_server(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Starting docstruct-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
