//! # Database Migrations
//!
//! Embedded SQL migrations for Shopfront.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  Server Startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table (created if missing)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare embedded migrations vs applied                                │
//! │       │                                                                 │
//! │       └── 0001_initial_schema.sql  customers, products, orders, items  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending migrations in order, record checksums                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations. Safe to call repeatedly.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}
