//! # Shopfront API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  env ──► ApiConfig ──► Database (migrate, optional seed)                │
//! │                              │                                          │
//! │                              ▼                                          │
//! │            TcpListener ──► axum::serve ──► graceful shutdown            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shopfront_api::{build_router, ApiConfig, AppState};
use shopfront_db::{seed, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Shopfront API server...");

    let config = ApiConfig::load().context("Invalid configuration")?;
    let addr = config.bind_addr()?;
    info!(
        %addr,
        database = %config.database_path,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("Failed to open database")?;
    info!("Database ready");

    if config.seed_demo_data {
        match seed::seed_demo_data(&db).await? {
            Some(summary) => info!(
                customers = summary.customers,
                products = summary.products,
                orders = summary.orders,
                "Demo data seeded"
            ),
            None => warn!("SEED_DEMO_DATA set but catalog is not empty"),
        }
    }

    let app = build_router(AppState::new(db.clone()), config.max_upload_bytes);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
