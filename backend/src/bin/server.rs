//! Pet Clinic HTTP Server Binary
//!
//! This is the main entry point for the owner pages server.
//! It loads configuration, initializes the repository, sets up the HTTP router,
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with an in-memory repository (default)
//! cargo run --bin petclinic-server
//!
//! # Persist owners to a JSON file, seeded with demo data
//! REPOSITORY_TYPE=file REPOSITORY_PATH=data/owners.json REPOSITORY_SAMPLE_DATA=true \
//!   cargo run --bin petclinic-server
//! ```
//!
//! # Environment Variables
//!
//! - `PETCLINIC_CONFIG`: Path to a TOML config file (default: `petclinic.toml` if present)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: `local` or `file`
//! - `REPOSITORY_PATH`: Owner file for the `file` repository
//! - `REPOSITORY_SAMPLE_DATA`: `true` to seed an empty store with demo owners
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use petclinic::config::AppConfig;
use petclinic::db;
use petclinic::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Pet Clinic HTTP Server");

    let config = AppConfig::load()?;

    // Initialize global repository once and reuse it across the app
    db::init_repository(&config.repository)?;
    let repository = std::sync::Arc::clone(db::get_repository()?);
    info!(
        "Repository initialized successfully ({} owners)",
        repository.count_owners().await?
    );

    // Create application state
    let state = AppState::new(repository);

    // Create router with all endpoints
    let app = create_router(state);

    let addr: SocketAddr = config.server.bind_address().parse()?;

    info!("Server listening on http://{}", addr);
    info!("Find owners: http://{}/owners/find", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
