//! # Demo Catalog
//!
//! Inserts a small, fixed data set for local development and demos.
//!
//! ## Data
//! ```text
//! Customers                         Products
//! ─────────────────────────────     ────────────────────────────────────
//! 1  Alice Johnson                  1  Laptop      Electronics  1200.00 ×10
//! 2  Bob Smith                      2  Smartphone  Electronics   800.00 ×25
//!                                   3  Headphones  Accessories   150.00 ×50
//!
//! Orders (historical, stock not adjusted)
//! ────────────────────────────────────────────────────────────────────────
//! 1  Alice  2024-12-01  Shipped     Laptop ×1, Smartphone ×1   = 2000.00
//! 2  Bob    2025-01-25  Processing  Headphones ×2, Smartphone ×1 = 1100.00
//! ```
//!
//! Order totals are computed from their items. Seeding is skipped when the
//! catalog already has products. Everything is inserted in one transaction.

use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::customer::insert_customer;
use crate::repository::product::insert_product;
use shopfront_core::{Money, NewProduct, OrderStatus};

/// Counts of the rows a seed run inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
}

struct DemoOrder {
    customer: usize,
    date: (i32, u32, u32),
    status: OrderStatus,
    /// (product index, quantity)
    lines: &'static [(usize, i64)],
}

const DEMO_CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Alice Johnson", "alice.johnson@example.com", "Password123"),
    ("Bob Smith", "bob.smith@example.com", "Password456"),
];

const DEMO_PRODUCTS: &[(&str, &str, &str, i64, i64)] = &[
    ("Laptop", "Electronics", "A high-performance laptop.", 120000, 10),
    ("Smartphone", "Electronics", "Latest model smartphone.", 80000, 25),
    ("Headphones", "Accessories", "Noise-cancelling headphones.", 15000, 50),
];

const DEMO_ORDERS: &[DemoOrder] = &[
    DemoOrder {
        customer: 0,
        date: (2024, 12, 1),
        status: OrderStatus::Shipped,
        lines: &[(0, 1), (1, 1)],
    },
    DemoOrder {
        customer: 1,
        date: (2025, 1, 25),
        status: OrderStatus::Processing,
        lines: &[(2, 2), (1, 1)],
    },
];

/// Inserts the demo customers, products and orders.
///
/// ## Returns
/// * `Ok(Some(summary))` - Data inserted
/// * `Ok(None)` - Catalog not empty, nothing done
pub async fn seed_demo_data(db: &Database) -> DbResult<Option<SeedSummary>> {
    // One write transaction: a failed seed leaves nothing behind
    let mut tx = db
        .pool()
        .begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(DbError::transaction)?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        info!(existing, "Catalog already populated, skipping demo seed");
        return Ok(None);
    }

    let mut customer_ids = Vec::with_capacity(DEMO_CUSTOMERS.len());
    for (name, email, password) in DEMO_CUSTOMERS {
        let registered: Option<i64> =
            sqlx::query_scalar("SELECT id FROM customers WHERE email = ?1 COLLATE NOCASE")
                .bind(*email)
                .fetch_optional(&mut *tx)
                .await?;

        let id = match registered {
            Some(id) => id,
            None => insert_customer(&mut *tx, name, email, password).await?.id,
        };
        customer_ids.push(id);
    }

    let mut products = Vec::with_capacity(DEMO_PRODUCTS.len());
    for (name, category, description, price_cents, stock) in DEMO_PRODUCTS {
        let product = insert_product(
            &mut *tx,
            &NewProduct {
                name: name.to_string(),
                description: Some(description.to_string()),
                category: category.to_string(),
                price_cents: *price_cents,
                stock: *stock,
            },
        )
        .await?;
        products.push(product);
    }

    for demo in DEMO_ORDERS {
        let total: Money = demo
            .lines
            .iter()
            .map(|&(p, qty)| products[p].price().multiply_quantity(qty))
            .sum();

        let order_id = sqlx::query(
            r#"
            INSERT INTO orders (customer_id, order_date, status, total_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(customer_ids[demo.customer])
        .bind(order_date(demo.date)?)
        .bind(demo.status)
        .bind(total.cents())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for &(p, quantity) in demo.lines {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(order_id)
            .bind(products[p].id)
            .bind(quantity)
            .bind(products[p].price_cents)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await.map_err(DbError::transaction)?;

    let summary = SeedSummary {
        customers: customer_ids.len(),
        products: products.len(),
        orders: DEMO_ORDERS.len(),
    };
    info!(?summary, "Demo data seeded");

    Ok(Some(summary))
}

fn order_date((year, month, day): (i32, u32, u32)) -> DbResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .ok_or_else(|| DbError::Internal(format!("invalid seed date {year}-{month}-{day}")))
}
