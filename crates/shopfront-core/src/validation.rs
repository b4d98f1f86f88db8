//! # Validation Module
//!
//! Input validation utilities for Shopfront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extraction (axum + serde)                               │
//! │  └── Type validation (deserialization, missing fields)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation (ranges, required text, formats)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::{validate_order_size, validate_quantity};
//!
//! validate_order_size(2).unwrap();
//! validate_quantity(5).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{
    MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS, MAX_PAGE_SIZE, MAX_PRODUCT_PRICE_CENTS,
    MIN_PRODUCT_PRICE_CENTS,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a product name: required, at most 200 characters.
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Laptop").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required_text("name", name, 200)
}

/// Validates a product category: required, at most 100 characters.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_required_text("category", category, 100)
}

/// Validates a customer display name: required, at most 200 characters.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_required_text("name", name, 200)
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@` with text on both sides
/// - At most 320 characters
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_email;
///
/// assert!(validate_email("alice.johnson@example.com").is_ok());
/// assert!(validate_email("alice").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required_text("email", email, 320)?;

    let email = email.trim();
    let mut parts = email.split('@');
    let well_formed = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    };

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        });
    }

    Ok(())
}

/// Validates a password: required, at most 100 characters.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## Order Workflow
/// ```text
/// POST /api/orders { items: [{ productId: 1, quantity: 0 }] }
///      │
///      ▼
/// validate_quantity(0) ← THIS FUNCTION
///      │
///      ├── qty <= 0?  → Error: "quantity must be positive"
///      ├── qty > 999? → Error: "quantity must be between 1 and 999"
///      └── OK → customer and product lookups
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates the number of lines in an order request.
///
/// ## Rules
/// - At least one line
/// - At most MAX_ORDER_ITEMS (100)
pub fn validate_order_size(lines: usize) -> ValidationResult<()> {
    if lines == 0 {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if lines > MAX_ORDER_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_ORDER_ITEMS as i64,
        });
    }

    Ok(())
}

/// Validates a catalog price in cents.
///
/// ## Rules
/// - Between 0.01 and 100,000.00 inclusive
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(120000).is_ok()); // 1200.00
/// assert!(validate_price_cents(0).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(MIN_PRODUCT_PRICE_CENTS..=MAX_PRODUCT_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: MIN_PRODUCT_PRICE_CENTS,
            max: MAX_PRODUCT_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates an initial stock level: zero or more.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates paging parameters.
///
/// ## Rules
/// - `page_number` starts at 1
/// - `page_size` between 1 and MAX_PAGE_SIZE (100)
pub fn validate_page(page_number: i64, page_size: i64) -> ValidationResult<()> {
    if page_number < 1 {
        return Err(ValidationError::MustBePositive {
            field: "pageNumber".to_string(),
        });
    }

    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ValidationError::OutOfRange {
            field: "pageSize".to_string(),
            min: 1,
            max: MAX_PAGE_SIZE,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
