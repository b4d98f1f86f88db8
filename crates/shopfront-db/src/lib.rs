//! # shopfront-db: Database Layer for Shopfront
//!
//! SQLite persistence for customers, the catalog and orders, plus the
//! order placement service that ties them together in one transaction.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /api/orders)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shopfront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌───────────────┐   │   │
//! │  │   │  placement    │──►│  unit_of_work  │──►│   Database    │   │   │
//! │  │   │ OrderPlacement│   │ OrderStore     │   │   (pool.rs)   │   │   │
//! │  │   │ Service       │   │ SqliteUnitOf.. │   │  SqlitePool   │   │   │
//! │  │   └───────────────┘   └────────────────┘   └───────▲───────┘   │   │
//! │  │                                                    │           │   │
//! │  │   ┌───────────────┐   ┌────────────────┐           │           │   │
//! │  │   │ Repositories  │───┘ customer,      │───────────┘           │   │
//! │  │   │               │     product, order │                       │   │
//! │  │   └───────────────┘   └────────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (./shopfront.db, migrations/sqlite/*.sql)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Customer, product and order repositories
//! - [`unit_of_work`] - Transactional boundary for placing an order
//! - [`placement`] - The order placement service
//! - [`seed`] - Demo catalog
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopfront_db::{Database, DbConfig, OrderPlacementService, PlaceOrderRequest};
//!
//! let db = Database::new(DbConfig::new("./shopfront.db")).await?;
//! let service = OrderPlacementService::new(db.clone());
//! let order = service.place_order(&request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod placement;
pub mod pool;
pub mod repository;
pub mod seed;
pub mod unit_of_work;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use placement::{OrderLineRequest, OrderPlacementService, PlaceOrderRequest, PlacementError};
pub use pool::{Database, DbConfig};
pub use unit_of_work::{OrderStore, OrderUnitOfWork, SqliteUnitOfWork};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::order::OrderRepository;
pub use repository::product::{ProductPage, ProductRepository};
