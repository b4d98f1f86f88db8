//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule rejections                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shopfront-db errors (separate crate)                                  │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── PlacementError   - CoreError | DbError from order placement       │
//! │                                                                         │
//! │  HTTP API errors (in app)                                              │
//! │  └── ApiError         - What clients see (serialized JSON)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → PlacementError → ApiError         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, product names)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to one user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
///
/// None of these are transient: retrying the same request against the same
/// data produces the same error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Customer id does not reference a registered customer.
    #[error("Customer not found: {0}")]
    CustomerNotFound(i64),

    /// Product id does not reference a catalog product.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Requested quantity exceeds what is left of the product's stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Order line (Smartphone, qty: 26)
    ///      │
    ///      ▼
    /// Check stock: available=25
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Smartphone", available: 25, requested: 26 }
    /// ```
    ///
    /// `available` already excludes units claimed by earlier lines of the
    /// same order.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        product: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any lookup happens, so they never have side effects.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
