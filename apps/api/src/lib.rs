//! # Shopfront API
//!
//! JSON-over-HTTP front end for the storefront.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shopfront API                                  │
//! │                                                                         │
//! │  Client ──► axum Router ──► Handlers ──► shopfront-db ──► SQLite       │
//! │                 │               │              │                        │
//! │            TraceLayer      Payload<T>    OrderPlacementService          │
//! │            CorsLayer       ApiError      (unit of work per order)       │
//! │            BodyLimit                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HOST` - Interface to bind (default: 0.0.0.0)
//! - `PORT` - HTTP port (default: 8080)
//! - `DATABASE_PATH` - SQLite file (default: ./shopfront.db)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `MAX_UPLOAD_BYTES` - Request body limit (default: 10MB)
//! - `SEED_DEMO_DATA` - Insert the demo catalog when empty (default: false)

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

/// Assembles the router with its middleware stack and state.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    routes::create_router()
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
