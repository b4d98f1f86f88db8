//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopfront                              │
//! │                                                                         │
//! │  Client                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  POST /api/orders                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler -> ApiResult<T>                                         │  │
//! │  │         │                                                        │  │
//! │  │  ValidationError / CoreError ──► 400 / 404 / 409 ──┐            │  │
//! │  │  DbError ──────────────────────► 409 / 500 ────────┤            │  │
//! │  │                                                    ▼            │  │
//! │  │                                          ApiError (IntoResponse)│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  HTTP 409 { "code": "INSUFFICIENT_STOCK",                              │
//! │             "message": "Insufficient stock for Smartphone: ..." }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use shopfront_core::{CoreError, ValidationError};
use shopfront_db::{DbError, PlacementError};

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body returned by every failing request.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 999"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Bad credentials (401)
    Unauthorized,

    /// Requested more than is in stock (409)
    InsufficientStock,

    /// Lost a race with a concurrent write (409)
    Conflict,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,

    /// Dependency unavailable (503)
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::InsufficientStock | ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::StockConflict { product_id } => ApiError::new(
                ErrorCode::Conflict,
                format!("Stock for product {} changed while placing the order, please retry", product_id),
            ),
            DbError::Busy(e) => {
                tracing::warn!("Database busy: {}", e);
                ApiError::new(ErrorCode::Conflict, "Database is busy, please retry")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::ServiceUnavailable, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CustomerNotFound(id) => ApiError::not_found("Customer", id),
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            err @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Rejections keep their business meaning; persistence failures carry the
/// underlying database message.
impl From<PlacementError> for ApiError {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::Rejected(e) => e.into(),
            PlacementError::Persistence(e) if e.is_conflict() => e.into(),
            PlacementError::Persistence(e) => {
                tracing::error!("Order persistence failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, format!("Order could not be saved: {}", e))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}
