//! # Order Repository
//!
//! Read access to placed orders. Orders are only ever written by the
//! placement unit of work ([`crate::unit_of_work`]).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use shopfront_core::{Order, OrderItem};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order together with its items.
    ///
    /// ## Returns
    /// * `Ok(Some(Order))` - Order found, `items` populated in insertion order
    /// * `Ok(None)` - Order not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        debug!(order_id = id, "Loading order");

        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, order_date, status, total_cents
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut order) = order else {
            return Ok(None);
        };

        order.items = self.get_items(id).await?;
        Ok(Some(order))
    }

    /// Gets all items of an order, in insertion order.
    pub async fn get_items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price_cents
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Returns the number of placed orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
