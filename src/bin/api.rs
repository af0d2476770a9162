//! Ojas API Server
//!
//! Run with: cargo run --bin ojas-api
//!
//! # Configuration
//!
//! Loads `config.toml` from the standard locations (see `ojas::config`),
//! then applies environment overrides:
//! - `OJAS_CONFIG`: Explicit config file path
//! - `OJAS_DATA_DIR`: Data directory for the SQLite store
//! - `OJAS_STORE_BACKEND`: `sqlite` (default) or `memory`
//! - `OJAS_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `OJAS_API_PORT`: Port to listen on (default: 8090)
//! - `OJAS_LOG_LEVEL`: Log level (default: info)
//! - `OJAS_LOG_FORMAT`: `pretty` (default) or `json`
//! - `RUST_LOG`: Full filter directive, wins over OJAS_LOG_LEVEL

use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ojas::api::{serve, ApiConfig, AppState};
use ojas::config::{Config, StoreBackend};
use ojas::corpus;
use ojas::store::{MemoryStore, SqliteStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the filter can honor it
    let config = match std::env::var("OJAS_CONFIG") {
        Ok(path) => Config::load_with_env(Path::new(&path))?,
        Err(_) => Config::load_default(),
    };

    init_tracing(&config);

    tracing::info!("Starting Ojas API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", config.store.data_dir);

    // Open the configured store backend
    let store: Arc<dyn Store> = match config.store.backend {
        StoreBackend::Sqlite => {
            tracing::info!("Opening SQLite store...");
            Arc::new(SqliteStore::open(Path::new(&config.store.data_dir))?)
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store (data is not persisted)");
            Arc::new(MemoryStore::new())
        }
    };

    // Seed the remedy corpus on first run
    if config.store.seed_on_start {
        let stats = store.stats().await?;
        if stats.corpus_items == 0 {
            let seeded = store.seed_foods(corpus::defaults()).await?;
            tracing::info!("Seeded {} corpus items", seeded);
        }
    }

    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        cors_origins: config.api.cors_origins.clone(),
        request_timeout_ms: config.api.request_timeout_secs * 1000,
    };

    let state = AppState::new(store, api_config.clone());

    // Run server
    tracing::info!("Starting server on {}:{}", api_config.host, api_config.port);
    serve(state, &api_config).await?;

    tracing::info!("Ojas API server stopped");
    Ok(())
}

/// Initialize tracing from the logging configuration
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "ojas={},tower_http=debug",
            config.logging.level
        ))
    });

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
