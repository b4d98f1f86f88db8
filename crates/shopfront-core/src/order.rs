//! # Order Draft
//!
//! In-memory assembly of an order before it is persisted.
//!
//! ## Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Building an Order                                │
//! │                                                                         │
//! │  OrderDraft::new(customer_id, now)                                      │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  for each requested line:                                               │
//! │      add_line(&product, qty)                                            │
//! │        ├── claimed + qty > stock? → InsufficientStock (draft unchanged) │
//! │        └── snapshot unit price, claim stock, add to total               │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  stock_claims()  →  one decrement per distinct product                  │
//! │  lines()         →  order_items rows                                    │
//! │  total()         →  orders.total_cents                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two lines for the same product are kept as separate lines, but their
//! quantities are checked together against the product's stock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OrderStatus, Product};
use crate::validation::validate_quantity;

/// A line of a draft order with its frozen unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl DraftLine {
    /// Returns `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

/// Units of one product an order takes from stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockClaim {
    pub product_id: i64,
    pub quantity: i64,
}

/// An order being assembled. Every line in it has passed the stock check.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    customer_id: i64,
    order_date: DateTime<Utc>,
    status: OrderStatus,
    lines: Vec<DraftLine>,
    total: Money,
    /// Claimed units per product, in the order products first appeared.
    claims: Vec<StockClaim>,
}

impl OrderDraft {
    /// Starts an empty `Processing` order for `customer_id`.
    pub fn new(customer_id: i64, order_date: DateTime<Utc>) -> Self {
        OrderDraft {
            customer_id,
            order_date,
            status: OrderStatus::Processing,
            lines: Vec::new(),
            total: Money::zero(),
            claims: Vec::new(),
        }
    }

    /// Adds `quantity` units of `product` at its current price.
    ///
    /// ## Errors
    /// - `Validation` if the quantity is outside 1..=999
    /// - `InsufficientStock` if this line, together with earlier lines for
    ///   the same product, asks for more than `product.stock`
    ///
    /// On error the draft is left as it was.
    pub fn add_line(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let claimed = self.claimed(product.id);
        let available = product.stock - claimed;

        if quantity > available {
            return Err(CoreError::InsufficientStock {
                product_id: product.id,
                product: product.name.clone(),
                available: available.max(0),
                requested: quantity,
            });
        }

        match self.claims.iter_mut().find(|c| c.product_id == product.id) {
            Some(claim) => claim.quantity += quantity,
            None => self.claims.push(StockClaim {
                product_id: product.id,
                quantity,
            }),
        }

        let line = DraftLine {
            product_id: product.id,
            quantity,
            unit_price_cents: product.price_cents,
        };
        self.total += line.line_total();
        self.lines.push(line);

        Ok(())
    }

    /// Units of `product_id` already claimed by this draft.
    pub fn claimed(&self, product_id: i64) -> i64 {
        self.claims
            .iter()
            .find(|c| c.product_id == product_id)
            .map_or(0, |c| c.quantity)
    }

    pub fn customer_id(&self) -> i64 {
        self.customer_id
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.total
    }

    /// One aggregated decrement per distinct product.
    pub fn stock_claims(&self) -> &[StockClaim] {
        &self.claims
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn product(id: i64, name: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            category: "Electronics".to_string(),
            price_cents,
            stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_single_line_order() {
        let laptop = product(1, "Laptop", 120000, 10);
        let mut draft = OrderDraft::new(1, Utc::now());

        draft.add_line(&laptop, 2).unwrap();

        assert_eq!(draft.total().cents(), 240000);
        assert_eq!(draft.status(), OrderStatus::Processing);
        assert_eq!(
            draft.lines(),
            &[DraftLine {
                product_id: 1,
                quantity: 2,
                unit_price_cents: 120000
            }]
        );
        assert_eq!(
            draft.stock_claims(),
            &[StockClaim {
                product_id: 1,
                quantity: 2
            }]
        );
    }

    #[test]
    fn test_multi_line_total() {
        let smartphone = product(2, "Smartphone", 80000, 25);
        let headphones = product(3, "Headphones", 15000, 50);
        let mut draft = OrderDraft::new(2, Utc::now());

        draft.add_line(&headphones, 2).unwrap();
        draft.add_line(&smartphone, 1).unwrap();

        assert_eq!(draft.total().cents(), 110000);
        assert_eq!(draft.lines().len(), 2);
    }

    #[test]
    fn test_insufficient_stock_leaves_draft_unchanged() {
        let smartphone = product(2, "Smartphone", 80000, 25);
        let mut draft = OrderDraft::new(1, Utc::now());

        let err = draft.add_line(&smartphone, 26).unwrap_err();

        assert_eq!(
            err,
            CoreError::InsufficientStock {
                product_id: 2,
                product: "Smartphone".to_string(),
                available: 25,
                requested: 26,
            }
        );
        assert!(draft.is_empty());
        assert!(draft.total().is_zero());
        assert!(draft.stock_claims().is_empty());
    }

    #[test]
    fn test_duplicate_lines_checked_cumulatively() {
        let laptop = product(1, "Laptop", 120000, 10);
        let mut draft = OrderDraft::new(1, Utc::now());

        draft.add_line(&laptop, 6).unwrap();
        let err = draft.add_line(&laptop, 5).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 4,
                requested: 5,
                ..
            }
        ));

        draft.add_line(&laptop, 4).unwrap();
        assert_eq!(draft.lines().len(), 2);
        assert_eq!(draft.claimed(1), 10);
        assert_eq!(
            draft.stock_claims(),
            &[StockClaim {
                product_id: 1,
                quantity: 10
            }]
        );
    }

    #[test]
    fn test_unit_price_is_snapshot() {
        let mut laptop = product(1, "Laptop", 120000, 10);
        let mut draft = OrderDraft::new(1, Utc::now());

        draft.add_line(&laptop, 1).unwrap();
        laptop.price_cents = 99900;

        assert_eq!(draft.lines()[0].unit_price_cents, 120000);
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let laptop = product(1, "Laptop", 120000, 10);
        let mut draft = OrderDraft::new(1, Utc::now());

        assert!(matches!(
            draft.add_line(&laptop, 0),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_claims_keep_first_seen_order() {
        let a = product(3, "Headphones", 15000, 50);
        let b = product(1, "Laptop", 120000, 10);
        let mut draft = OrderDraft::new(1, Utc::now());

        draft.add_line(&a, 1).unwrap();
        draft.add_line(&b, 1).unwrap();
        draft.add_line(&a, 2).unwrap();

        let ids: Vec<i64> = draft.stock_claims().iter().map(|c| c.product_id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(draft.claimed(3), 3);
    }
}
