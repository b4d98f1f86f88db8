//! # Order Placement Service
//!
//! Turns a customer id and a list of product/quantity requests into a
//! persisted order, or fails with no side effect.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PlaceOrderRequest { customerId: 1, items: [{ productId: 1, qty: 1 }] } │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. validate shape (1..=100 lines, qty 1..=999)    ── no I/O yet        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. store.begin()                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. find_customer ── None ──► rollback, CustomerNotFound                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. for each line, in request order:                                    │
//! │       find_product ── None ──► rollback, ProductNotFound(id)            │
//! │       draft.add_line ── Err ──► rollback, InsufficientStock             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. uow.commit(&draft) ── Err ──► Persistence (already rolled back)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  6. Order { id, items[ids], total, status: Processing }                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Processing stops at the first failing line. A rejected request leaves
//! every table exactly as it was, so retrying it against unchanged data
//! yields the same rejection.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::error::DbError;
use crate::unit_of_work::{OrderStore, OrderUnitOfWork};
use shopfront_core::validation::{validate_order_size, validate_quantity};
use shopfront_core::{CoreError, Order, OrderDraft};

// =============================================================================
// Request Types
// =============================================================================

/// One requested line: a product and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: i64,
    pub quantity: i64,
}

/// A request to place an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub customer_id: i64,
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
}

// =============================================================================
// Errors
// =============================================================================

/// Why an order could not be placed.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// The request broke a business rule. Not transient.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The database failed. May be transient; the caller decides on retries.
    #[error(transparent)]
    Persistence(#[from] DbError),
}

// =============================================================================
// Service
// =============================================================================

/// Places orders against any [`OrderStore`].
///
/// ## Usage
/// ```rust,ignore
/// let service = OrderPlacementService::new(db.clone());
/// let order = service.place_order(&request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderPlacementService<S> {
    store: S,
}

impl<S: OrderStore> OrderPlacementService<S> {
    pub fn new(store: S) -> Self {
        OrderPlacementService { store }
    }

    /// Places an order. See the module docs for the full algorithm.
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> Result<Order, PlacementError> {
        validate_request(request)?;

        let mut uow = self.store.begin().await?;

        let draft = match build_draft(&mut uow, request).await {
            Ok(draft) => draft,
            Err(err) => {
                if let Err(rollback_err) = uow.rollback().await {
                    error!(error = %rollback_err, "Rollback after rejected order failed");
                }
                if let PlacementError::Rejected(reason) = &err {
                    warn!(customer_id = request.customer_id, %reason, "Order rejected");
                }
                return Err(err);
            }
        };

        let order = uow.commit(&draft).await.map_err(|err| {
            error!(customer_id = request.customer_id, error = %err, "Order commit failed");
            PlacementError::Persistence(err)
        })?;

        info!(
            order_id = order.id,
            customer_id = order.customer_id,
            items = order.items.len(),
            total = %order.total(),
            "Order placed"
        );

        Ok(order)
    }
}

/// Rejects malformed requests before any lookup happens.
fn validate_request(request: &PlaceOrderRequest) -> Result<(), CoreError> {
    validate_order_size(request.items.len())?;
    for line in &request.items {
        validate_quantity(line.quantity)?;
    }
    Ok(())
}

/// Steps 3 and 4: lookups and stock checks inside the unit of work.
async fn build_draft<U: OrderUnitOfWork>(
    uow: &mut U,
    request: &PlaceOrderRequest,
) -> Result<OrderDraft, PlacementError> {
    uow.find_customer(request.customer_id)
        .await?
        .ok_or(CoreError::CustomerNotFound(request.customer_id))?;

    let mut draft = OrderDraft::new(request.customer_id, Utc::now());

    for line in &request.items {
        let product = uow
            .find_product(line.product_id)
            .await?
            .ok_or(CoreError::ProductNotFound(line.product_id))?;

        draft.add_line(&product, line.quantity)?;
    }

    Ok(draft)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbResult;
    use crate::{seed, Database, DbConfig};
    use shopfront_core::{Customer, OrderItem, OrderStatus, Product, ValidationError};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn request(customer_id: i64, lines: &[(i64, i64)]) -> PlaceOrderRequest {
        PlaceOrderRequest {
            customer_id,
            items: lines
                .iter()
                .map(|&(product_id, quantity)| OrderLineRequest {
                    product_id,
                    quantity,
                })
                .collect(),
        }
    }

    // -------------------------------------------------------------------------
    // In-memory store
    // -------------------------------------------------------------------------

    #[derive(Default)]
    struct FakeState {
        customers: HashMap<i64, Customer>,
        products: HashMap<i64, Product>,
        orders: Vec<Order>,
        begun: usize,
        rolled_back: usize,
        product_lookups: usize,
    }

    #[derive(Clone, Default)]
    struct FakeStore {
        state: Arc<Mutex<FakeState>>,
    }

    struct FakeUow {
        state: Arc<Mutex<FakeState>>,
    }

    impl FakeStore {
        fn with_catalog() -> Self {
            let store = FakeStore::default();
            {
                let mut state = store.state.lock().unwrap();
                state.customers.insert(
                    1,
                    Customer {
                        id: 1,
                        name: "Alice Johnson".to_string(),
                        email: "alice.johnson@example.com".to_string(),
                        password_hash: String::new(),
                    },
                );
                for (id, name, price_cents, stock) in [
                    (1, "Laptop", 120000, 10),
                    (2, "Smartphone", 80000, 25),
                    (3, "Headphones", 15000, 50),
                ] {
                    state.products.insert(
                        id,
                        Product {
                            id,
                            name: name.to_string(),
                            description: None,
                            category: "Electronics".to_string(),
                            price_cents,
                            stock,
                            created_at: Utc::now(),
                            updated_at: Utc::now(),
                        },
                    );
                }
            }
            store
        }

        fn stock(&self, id: i64) -> i64 {
            self.state.lock().unwrap().products[&id].stock
        }
    }

    impl OrderStore for FakeStore {
        type UnitOfWork = FakeUow;

        async fn begin(&self) -> DbResult<FakeUow> {
            self.state.lock().unwrap().begun += 1;
            Ok(FakeUow {
                state: self.state.clone(),
            })
        }
    }

    impl OrderUnitOfWork for FakeUow {
        async fn find_customer(&mut self, id: i64) -> DbResult<Option<Customer>> {
            Ok(self.state.lock().unwrap().customers.get(&id).cloned())
        }

        async fn find_product(&mut self, id: i64) -> DbResult<Option<Product>> {
            let mut state = self.state.lock().unwrap();
            state.product_lookups += 1;
            Ok(state.products.get(&id).cloned())
        }

        async fn commit(self, draft: &OrderDraft) -> DbResult<Order> {
            let mut state = self.state.lock().unwrap();
            for claim in draft.stock_claims() {
                let product = state
                    .products
                    .get_mut(&claim.product_id)
                    .ok_or_else(|| DbError::not_found("Product", claim.product_id))?;
                product.stock -= claim.quantity;
            }

            let order_id = state.orders.len() as i64 + 1;
            let order = Order {
                id: order_id,
                customer_id: draft.customer_id(),
                order_date: draft.order_date(),
                status: draft.status(),
                total_cents: draft.total().cents(),
                items: draft
                    .lines()
                    .iter()
                    .enumerate()
                    .map(|(i, line)| OrderItem {
                        id: i as i64 + 1,
                        order_id,
                        product_id: line.product_id,
                        quantity: line.quantity,
                        unit_price_cents: line.unit_price_cents,
                    })
                    .collect(),
            };
            state.orders.push(order.clone());
            Ok(order)
        }

        async fn rollback(self) -> DbResult<()> {
            self.state.lock().unwrap().rolled_back += 1;
            Ok(())
        }
    }

    // -------------------------------------------------------------------------
    // Service behavior (in-memory store)
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_places_order_and_decrements_stock() {
        let store = FakeStore::with_catalog();
        let service = OrderPlacementService::new(store.clone());

        let order = service
            .place_order(&request(1, &[(3, 2), (2, 1)]))
            .await
            .unwrap();

        assert_eq!(order.total_cents, 2 * 15000 + 80000);
        assert_eq!(order.total(), order.items_total());
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].product_id, 3);
        assert_eq!(order.items[1].product_id, 2);
        assert_eq!(store.stock(3), 48);
        assert_eq!(store.stock(2), 24);
    }

    #[tokio::test]
    async fn test_unknown_customer_skips_item_lookups() {
        let store = FakeStore::with_catalog();
        let service = OrderPlacementService::new(store.clone());

        let err = service
            .place_order(&request(999, &[(1, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PlacementError::Rejected(CoreError::CustomerNotFound(999))
        ));
        let state = store.state.lock().unwrap();
        assert_eq!(state.product_lookups, 0);
        assert_eq!(state.rolled_back, 1);
        assert!(state.orders.is_empty());
    }

    #[tokio::test]
    async fn test_fails_fast_on_first_bad_line() {
        let store = FakeStore::with_catalog();
        let service = OrderPlacementService::new(store.clone());

        let err = service
            .place_order(&request(1, &[(1, 1), (999, 1), (2, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PlacementError::Rejected(CoreError::ProductNotFound(999))
        ));
        let state = store.state.lock().unwrap();
        assert_eq!(state.product_lookups, 2);
        assert_eq!(state.products[&1].stock, 10);
        assert!(state.orders.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_request_never_opens_unit_of_work() {
        let store = FakeStore::with_catalog();
        let service = OrderPlacementService::new(store.clone());

        let empty = service.place_order(&request(1, &[])).await.unwrap_err();
        assert!(matches!(
            empty,
            PlacementError::Rejected(CoreError::Validation(ValidationError::Required { .. }))
        ));

        let zero = service
            .place_order(&request(1, &[(1, 0)]))
            .await
            .unwrap_err();
        assert!(matches!(
            zero,
            PlacementError::Rejected(CoreError::Validation(
                ValidationError::MustBePositive { .. }
            ))
        ));

        let too_many: Vec<(i64, i64)> = (0..101).map(|_| (3, 1)).collect();
        assert!(service
            .place_order(&request(1, &too_many))
            .await
            .is_err());

        assert_eq!(store.state.lock().unwrap().begun, 0);
    }

    #[tokio::test]
    async fn test_duplicate_lines_share_stock() {
        let store = FakeStore::with_catalog();
        let service = OrderPlacementService::new(store.clone());

        let err = service
            .place_order(&request(1, &[(1, 6), (1, 5)]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PlacementError::Rejected(CoreError::InsufficientStock {
                available: 4,
                requested: 5,
                ..
            })
        ));
        assert_eq!(store.stock(1), 10);

        let order = service
            .place_order(&request(1, &[(1, 6), (1, 4)]))
            .await
            .unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(store.stock(1), 0);
    }

    // -------------------------------------------------------------------------
    // SQLite end to end
    // -------------------------------------------------------------------------

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed::seed_demo_data(&db).await.unwrap();
        db
    }

    async fn stock(db: &Database, id: i64) -> i64 {
        db.products().get_by_id(id).await.unwrap().unwrap().stock
    }

    #[tokio::test]
    async fn test_single_laptop_order() {
        let db = seeded_db().await;
        let service = OrderPlacementService::new(db.clone());

        let order = service.place_order(&request(1, &[(1, 1)])).await.unwrap();

        assert_eq!(order.total_cents, 120000);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(stock(&db, 1).await, 9);

        let stored = db.orders().get_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(stored.total_cents, 120000);
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].id, order.items[0].id);
        assert_eq!(stored.items[0].unit_price_cents, 120000);
    }

    #[tokio::test]
    async fn test_insufficient_stock_is_rejected_without_side_effects() {
        let db = seeded_db().await;
        let service = OrderPlacementService::new(db.clone());
        let orders_before = db.orders().count().await.unwrap();

        let err = service
            .place_order(&request(1, &[(2, 26)]))
            .await
            .unwrap_err();

        match err {
            PlacementError::Rejected(CoreError::InsufficientStock {
                product, available, ..
            }) => {
                assert_eq!(product, "Smartphone");
                assert_eq!(available, 25);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(stock(&db, 2).await, 25);
        assert_eq!(db.orders().count().await.unwrap(), orders_before);
    }

    #[tokio::test]
    async fn test_unknown_product_leaves_earlier_lines_untouched() {
        let db = seeded_db().await;
        let service = OrderPlacementService::new(db.clone());
        let orders_before = db.orders().count().await.unwrap();

        let err = service
            .place_order(&request(1, &[(1, 2), (999, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PlacementError::Rejected(CoreError::ProductNotFound(999))
        ));
        assert_eq!(stock(&db, 1).await, 10);
        assert_eq!(db.orders().count().await.unwrap(), orders_before);
    }

    #[tokio::test]
    async fn test_unknown_customer_is_rejected() {
        let db = seeded_db().await;
        let service = OrderPlacementService::new(db.clone());

        let err = service
            .place_order(&request(999, &[(1, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PlacementError::Rejected(CoreError::CustomerNotFound(999))
        ));
        assert_eq!(stock(&db, 1).await, 10);
    }

    #[tokio::test]
    async fn test_rejection_is_repeatable() {
        let db = seeded_db().await;
        let service = OrderPlacementService::new(db.clone());
        let req = request(1, &[(2, 26)]);

        let first = service.place_order(&req).await.unwrap_err().to_string();
        let second = service.place_order(&req).await.unwrap_err().to_string();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_price_change_does_not_touch_placed_items() {
        let db = seeded_db().await;
        let service = OrderPlacementService::new(db.clone());

        let order = service.place_order(&request(1, &[(3, 1)])).await.unwrap();
        db.products().update_price(3, 99).await.unwrap();

        let stored = db.orders().get_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(stored.items[0].unit_price_cents, 15000);
        assert_eq!(stored.total_cents, 15000);
    }

    async fn race_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("race.db")))
            .await
            .unwrap();
        seed::seed_demo_data(&db).await.unwrap();
        (dir, db)
    }

    /// Places `count` concurrent orders of `quantity` laptops (stock 10).
    async fn laptop_rush(
        db: &Database,
        count: usize,
        quantity: i64,
    ) -> Vec<Result<Order, PlacementError>> {
        let mut handles = Vec::new();
        for n in 0..count {
            let service = OrderPlacementService::new(db.clone());
            let customer_id = 1 + (n % 2) as i64;
            handles.push(tokio::spawn(async move {
                service
                    .place_order(&request(customer_id, &[(1, quantity)]))
                    .await
            }));
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        results
    }

    fn is_insufficient_stock(result: &Result<Order, PlacementError>) -> bool {
        matches!(
            result,
            Err(PlacementError::Rejected(CoreError::InsufficientStock { .. }))
        )
    }

    #[tokio::test]
    async fn test_concurrent_orders_never_oversell() {
        let (_dir, db) = race_db().await;

        let results = laptop_rush(&db, 2, 6).await;

        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert_eq!(results.iter().filter(|r| is_insufficient_stock(r)).count(), 1);
        assert_eq!(stock(&db, 1).await, 4);
        assert_eq!(db.orders().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_orders_sell_out_exactly() {
        let (_dir, db) = race_db().await;

        let results = laptop_rush(&db, 30, 1).await;

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let sold_out = results.iter().filter(|r| is_insufficient_stock(r)).count();
        assert_eq!(successes, 10);
        assert_eq!(sold_out, 20);
        assert_eq!(stock(&db, 1).await, 0);
        assert_eq!(db.orders().count().await.unwrap(), 2 + 10);
    }
}
