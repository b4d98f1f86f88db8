//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Server Startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET /api/products   ──► reads on any connection                       │
//! │  POST /api/orders    ──► one connection for the whole transaction      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Writers don't block readers
//! - Better crash recovery
//!
//! In-memory test databases keep SQLite's default journal.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::customer::CustomerRepository;
use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./shopfront.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a free connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// How long a writer waits on SQLite's write lock before failing.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    /// The file is created on first connect if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the write-lock wait.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// A single connection holds the whole database, so a handler must not
    /// use the pool while it has a transaction open.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Returns true for `:memory:` databases.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cheap to clone: clones share the same pool. The HTTP app keeps one in its
/// state and the order placement service uses it as its
/// [`OrderStore`](crate::unit_of_work::OrderStore).
///
/// ## Usage
/// ```rust,ignore
/// async fn get_product(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Product>> {
///     let product = state.db.products().get_by_id(id).await?;
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads (file databases)
    ///    - NORMAL synchronous (balance of safety/speed)
    ///    - Foreign keys enabled
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let base_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
                // Readers don't block writers, writers don't block readers
                .journal_mode(SqliteJournalMode::Wal)
        };

        let connect_options = base_options
            // Data is safe from corruption, may lose last transaction on crash
            .synchronous(SqliteSynchronous::Normal)
            // SQLite has them disabled by default for backwards compatibility
            .foreign_keys(true)
            // Order writers queue on the write lock instead of failing fast
            .busy_timeout(config.busy_timeout);

        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout);

        // An in-memory database lives only as long as its connection
        if config.is_in_memory() {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        } else {
            pool_options = pool_options.idle_timeout(Some(config.idle_timeout));
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// Prefer repository methods when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let laptop = db.products().get_by_id(1).await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
