//! # shopfront-core: Pure Business Logic for Shopfront
//!
//! This crate holds the domain model of the storefront and the rules that
//! decide whether an order can be placed. Nothing in here touches a
//! database, a socket or the file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    /api/customers  /api/products  /api/orders                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shopfront-db (Database Layer)                   │   │
//! │  │        repositories, unit of work, order placement              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │ validation│  │   │
//! │  │   │ Customer  │  │   Money   │  │OrderDraft │  │   rules   │  │   │
//! │  │   │  Product  │  │           │  │ DraftLine │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Order, OrderItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`order`] - Order draft: stock claims, line snapshots, totals
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use shopfront_core::money::Money;
//! use shopfront_core::order::OrderDraft;
//! use shopfront_core::types::Product;
//!
//! let laptop = Product {
//!     id: 1,
//!     name: "Laptop".to_string(),
//!     description: None,
//!     category: "Electronics".to_string(),
//!     price_cents: Money::from_major_minor(1200, 0).cents(),
//!     stock: 10,
//!     created_at: Utc::now(),
//!     updated_at: Utc::now(),
//! };
//!
//! let mut draft = OrderDraft::new(1, Utc::now());
//! draft.add_line(&laptop, 2).unwrap();
//!
//! assert_eq!(draft.total().cents(), 240_000);
//! ```

pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// Re-exports so callers can write `shopfront_core::Money`
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{DraftLine, OrderDraft, StockClaim};
pub use types::*;

/// Maximum number of lines accepted in a single order request.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity for a single order line.
///
/// Catches typos like 1000 instead of 10 before they reach the stock check.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest price a catalog product may carry, in cents (100,000.00).
pub const MAX_PRODUCT_PRICE_CENTS: i64 = 10_000_000;

/// Lowest price a catalog product may carry, in cents (0.01).
pub const MIN_PRODUCT_PRICE_CENTS: i64 = 1;

/// Largest page a paged catalog query may request.
pub const MAX_PAGE_SIZE: i64 = 100;
