//! # Vitrine API
//!
//! HTTP server for the catalog admin.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        API Server Startup                               │
//! │                                                                         │
//! │  init_tracing ──► ApiConfig::load ──► seed store ──► serve (3001)      │
//! │                                          │                              │
//! │                     VITRINE_SEED_PATH ───┤── load JSON file             │
//! │                     otherwise ───────────┘── generate N products        │
//! │                                                                         │
//! │  Ctrl+C / SIGTERM ──► graceful shutdown                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use chrono::Utc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vitrine_api::config::ApiConfig;
use vitrine_store::{seed, ProductStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Vitrine API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        host = %config.host,
        port = config.port,
        seed_path = ?config.seed_path,
        "Configuration loaded"
    );

    // Seed the store (volatile: reset on every restart)
    let products = match &config.seed_path {
        Some(path) => seed::load_seed_file(path)
            .with_context(|| format!("loading seed file {}", path.display()))?,
        None => {
            warn!(count = config.seed_count, "No seed file configured, generating products");
            seed::generate(config.seed_count, Utc::now())
        }
    };
    let store = ProductStore::new(products);
    info!(count = store.count().await, "Product store ready");

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, vitrine_api::app(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - ERROR: Unrecoverable errors
/// - WARN: Rejected input, missing seed file
/// - INFO: Startup, per-request spans
/// - DEBUG: Store mutations with ids and counts
///
/// Override with `RUST_LOG`, e.g. `RUST_LOG=vitrine_store=trace`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vitrine=debug,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
