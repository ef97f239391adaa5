//! Callsheet Server
//!
//! Receives call-completion webhooks from the voice-agent platform, normalizes
//! them with `callsheet-extractor` and stores the result in SQLite.
//!
//! # Routes
//!
//! - `POST /end-call-webhook`: normalize and store one call
//! - `GET /summaries?limit=&skip=`: stored records, newest first
//! - `GET /summaries/:id`: one stored record
//! - `GET /health`: store health

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod handlers;
pub mod signature;
pub mod snapshot;

use callsheet_store::{SqliteStore, StoreError};
use config::ServerConfig;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Could not open the record store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server
///
/// Opens the store, builds shared state and serves until Ctrl+C. The store
/// is closed when the server returns.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Callsheet server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!(
        "Signature verification: {}",
        if config.secret().is_some() { "enabled" } else { "disabled" }
    );

    let store = SqliteStore::new(&config.database_path)?;
    let state = AppState::from_config(&config, store)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
