//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PlacementError (placement.rs) ← Rejection vs persistence failure      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in HTTP app) ← Status code + JSON body                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Registering a second customer with the same email
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// A conditional stock decrement matched no row.
    ///
    /// ## When This Occurs
    /// Another order took the remaining units between the stock check and
    /// the commit of this one. The whole unit of work is rolled back.
    #[error("Stock changed concurrently for product {product_id}")]
    StockConflict { product_id: i64 },

    /// Another connection holds the write lock and the wait timed out, or
    /// this transaction's read snapshot went stale before it could write.
    #[error("Database is busy: {0}")]
    Busy(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction begin, commit or rollback failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Wraps a failed begin/commit/rollback.
    ///
    /// A lock timeout while opening or committing stays [`DbError::Busy`].
    pub fn transaction(err: sqlx::Error) -> Self {
        let message = err.to_string();
        match DbError::from(err) {
            busy @ DbError::Busy(_) => busy,
            _ => DbError::TransactionFailed(message),
        }
    }

    /// Returns true for errors caused by concurrent writers.
    pub fn is_conflict(&self) -> bool {
        matches!(self, DbError::StockConflict { .. } | DbError::Busy(_))
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type / lock
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: <table>.<column>"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("database is locked") || msg.contains("database table is locked")
                {
                    DbError::Busy(msg.to_string())
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
