//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET  /health                                                           │
//! │                                                                         │
//! │  POST /api/customers/register        POST /api/customers/login          │
//! │  GET  /api/customers/{id}                                               │
//! │                                                                         │
//! │  GET  /api/products                  POST /api/products                 │
//! │  GET  /api/products/paged            GET  /api/products/{id}            │
//! │  PUT  /api/products/{id}/price       POST /api/products/{id}/upload     │
//! │                                                                         │
//! │  POST /api/orders                    GET  /api/orders/{id}              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod customers;
pub mod health;
pub mod orders;
pub mod products;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

/// All application routes, state not yet attached.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/customers/register", post(customers::register))
        .route("/api/customers/login", post(customers::login))
        .route("/api/customers/{id}", get(customers::get_customer))
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/products/paged", get(products::paged_products))
        .route("/api/products/{id}", get(products::get_product))
        .route("/api/products/{id}/price", put(products::update_price))
        .route("/api/products/{id}/upload", post(products::upload_image))
        .route("/api/orders", post(orders::place_order))
        .route("/api/orders/{id}", get(orders::get_order))
}
