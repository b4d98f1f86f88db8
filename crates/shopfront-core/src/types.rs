//! # Domain Types
//!
//! Core domain types used throughout Shopfront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Order       │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  customer_id    │   │  id             │       │
//! │  │  name           │   │  order_date     │   │  name           │       │
//! │  │  email          │   │  status         │   │  category       │       │
//! │  │  password_hash  │   │  total_cents    │   │  price_cents    │       │
//! │  └─────────────────┘   └────────┬────────┘   │  stock          │       │
//! │                                 │ 1..N       └────────▲────────┘       │
//! │                        ┌────────▼────────┐            │                │
//! │                        │   OrderItem     │            │                │
//! │                        │  ─────────────  │            │                │
//! │                        │  product_id     │────────────┘                │
//! │                        │  quantity       │                              │
//! │                        │  unit_price     │  (snapshot, never updated)  │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity is keyed by an integer surrogate id assigned by the database
//! when the row is inserted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A registered storefront customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Login identifier. Unique per customer, checked at registration.
    pub email: String,

    /// Argon2 PHC string. Never leaves the server.
    #[serde(skip)]
    #[ts(skip)]
    pub password_hash: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Optional long description.
    pub description: Option<String>,

    /// Free-text category, e.g. "Electronics".
    pub category: String,

    /// Current selling price in cents.
    pub price_cents: i64,

    /// Units available for sale. Never negative.
    pub stock: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// Orders are created as `Processing`. `Shipped` appears on historical
/// orders imported with the demo catalog; no operation moves an order
/// between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
#[ts(export)]
pub enum OrderStatus {
    Processing,
    Shipped,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Processing
    }
}

impl OrderStatus {
    /// Returns the stored/serialized name of the status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order with its line items.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    #[ts(as = "String")]
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    /// Sum of `quantity × unit_price_cents` over all items.
    pub total_cents: i64,
    /// Loaded separately from `order_items`.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Recomputes the total from the line items.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line in an order.
/// The unit price is a snapshot of the product price at order time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Product price in cents when the order was placed (frozen).
    pub unit_price_cents: i64,
}

impl OrderItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Write Models
// =============================================================================

/// Fields needed to insert a new product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Catalog filter. Every field is optional; `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Substring of the product name.
    pub name: Option<String>,
    /// Substring of the product category.
    pub category: Option<String>,
    /// Inclusive lower price bound in cents.
    pub min_price_cents: Option<i64>,
    /// Inclusive upper price bound in cents.
    pub max_price_cents: Option<i64>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, unit_price_cents: i64) -> OrderItem {
        OrderItem {
            id: 0,
            order_id: 0,
            product_id: 1,
            quantity,
            unit_price_cents,
        }
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Processing);
        assert_eq!(OrderStatus::Processing.as_str(), "Processing");
    }

    #[test]
    fn test_order_status_serializes_pascal_case() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"Processing\"");
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item(2, 15000).line_total().cents(), 30000);
    }

    #[test]
    fn test_items_total_matches_seeded_order() {
        // Seeded order 2: 2 × 150.00 + 1 × 800.00 = 1100.00
        let order = Order {
            id: 2,
            customer_id: 2,
            order_date: Utc::now(),
            status: OrderStatus::Processing,
            total_cents: 110000,
            items: vec![item(2, 15000), item(1, 80000)],
        };
        assert_eq!(order.items_total(), order.total());
    }

    #[test]
    fn test_customer_password_is_not_serialized() {
        let customer = Customer {
            id: 1,
            name: "Alice Johnson".to_string(),
            email: "alice.johnson@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "alice.johnson@example.com");
    }
}
