//! # Order Unit of Work
//!
//! The transactional boundary used to place an order.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        One Order, One Transaction                       │
//! │                                                                         │
//! │  store.begin()                    BEGIN IMMEDIATE                       │
//! │     │                                                                   │
//! │     ├── uow.find_customer(id)     SELECT ... FROM customers             │
//! │     ├── uow.find_product(id) ×N   SELECT ... FROM products              │
//! │     │                                                                   │
//! │     ├── rejected? ──► uow.rollback()          ROLLBACK                  │
//! │     │                                                                   │
//! │     └── uow.commit(&draft)                                              │
//! │            ├── UPDATE products SET stock = stock - q                    │
//! │            │   WHERE id = ? AND stock >= q        (per product)         │
//! │            │      └── 0 rows? ──► StockConflict, ROLLBACK               │
//! │            ├── INSERT INTO orders                                       │
//! │            ├── INSERT INTO order_items            (per line)            │
//! │            └── COMMIT                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `BEGIN IMMEDIATE` takes SQLite's write lock up front, so concurrent orders
//! queue behind `busy_timeout` and each one reads the stock left by the
//! previous commit. The stock decrement still re-checks `stock >= q`, so two
//! orders racing for the last units cannot both succeed.
//!
//! The placement service only sees the [`OrderStore`] and
//! [`OrderUnitOfWork`] traits; [`Database`] provides the SQLite
//! implementation, tests provide an in-memory one.

use std::future::Future;

use chrono::Utc;
use sqlx::{Sqlite, Transaction};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use shopfront_core::{Customer, Order, OrderDraft, OrderItem, Product};

// =============================================================================
// Traits
// =============================================================================

/// Opens order units of work.
pub trait OrderStore: Send + Sync {
    type UnitOfWork: OrderUnitOfWork;

    /// Starts a new unit of work.
    fn begin(&self) -> impl Future<Output = DbResult<Self::UnitOfWork>> + Send;
}

/// Lookups and the atomic write needed to place one order.
///
/// Dropping a unit of work without calling `commit` discards it.
pub trait OrderUnitOfWork: Send {
    /// Looks up a customer by id.
    fn find_customer(
        &mut self,
        id: i64,
    ) -> impl Future<Output = DbResult<Option<Customer>>> + Send;

    /// Looks up a product by id, with its current price and stock.
    fn find_product(&mut self, id: i64)
        -> impl Future<Output = DbResult<Option<Product>>> + Send;

    /// Applies the draft's stock claims and persists the order with its
    /// items, all or nothing.
    ///
    /// ## Errors
    /// * `DbError::StockConflict` - a product no longer has enough stock
    /// * any other `DbError` - the write or the commit failed
    fn commit(self, draft: &OrderDraft) -> impl Future<Output = DbResult<Order>> + Send;

    /// Discards the unit of work.
    fn rollback(self) -> impl Future<Output = DbResult<()>> + Send;
}

// =============================================================================
// SQLite Implementation
// =============================================================================

/// Unit of work backed by a SQLite transaction.
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl OrderStore for Database {
    type UnitOfWork = SqliteUnitOfWork;

    async fn begin(&self) -> DbResult<SqliteUnitOfWork> {
        let tx = self
            .pool()
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(DbError::transaction)?;
        Ok(SqliteUnitOfWork { tx })
    }
}

impl OrderUnitOfWork for SqliteUnitOfWork {
    async fn find_customer(&mut self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, password_hash FROM customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(customer)
    }

    async fn find_product(&mut self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, category, price_cents, stock, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(product)
    }

    async fn commit(mut self, draft: &OrderDraft) -> DbResult<Order> {
        let now = Utc::now();

        for claim in draft.stock_claims() {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET stock = stock - ?1, updated_at = ?3
                WHERE id = ?2 AND stock >= ?1
                "#,
            )
            .bind(claim.quantity)
            .bind(claim.product_id)
            .bind(now)
            .execute(&mut *self.tx)
            .await?;

            if result.rows_affected() == 0 {
                warn!(
                    product_id = claim.product_id,
                    quantity = claim.quantity,
                    "Stock decrement lost a race, rolling back"
                );
                self.tx.rollback().await.map_err(DbError::transaction)?;
                return Err(DbError::StockConflict {
                    product_id: claim.product_id,
                });
            }
        }

        let order_id = sqlx::query(
            r#"
            INSERT INTO orders (customer_id, order_date, status, total_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(draft.customer_id())
        .bind(draft.order_date())
        .bind(draft.status())
        .bind(draft.total().cents())
        .execute(&mut *self.tx)
        .await?
        .last_insert_rowid();

        let mut items = Vec::with_capacity(draft.lines().len());
        for line in draft.lines() {
            let item_id = sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price_cents)
            .execute(&mut *self.tx)
            .await?
            .last_insert_rowid();

            items.push(OrderItem {
                id: item_id,
                order_id,
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price_cents: line.unit_price_cents,
            });
        }

        self.tx.commit().await.map_err(DbError::transaction)?;
        debug!(order_id, items = items.len(), "Order unit of work committed");

        Ok(Order {
            id: order_id,
            customer_id: draft.customer_id(),
            order_date: draft.order_date(),
            status: draft.status(),
            total_cents: draft.total().cents(),
            items,
        })
    }

    async fn rollback(self) -> DbResult<()> {
        self.tx.rollback().await.map_err(DbError::transaction)
    }
}
