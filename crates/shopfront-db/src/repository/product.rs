//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - Filtered listing (name, category, price range)
//! - Paged listing
//! - Insert and price update
//!
//! Stock is only ever decremented inside an order unit of work
//! (see [`crate::unit_of_work`]), never through this repository.
//!
//! ## Filtering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/products?category=elec&maxPriceCents=100000                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductFilter { category: "elec", max_price_cents: 100000, .. }       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WHERE (?1 IS NULL OR name LIKE '%' || ?1 || '%' ESCAPE '\')          │
//! │    AND (?2 IS NULL OR category LIKE '%' || ?2 || '%' ESCAPE '\')      │
//! │    AND (?3 IS NULL OR price_cents >= ?3)                               │
//! │    AND (?4 IS NULL OR price_cents <= ?4)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  [Smartphone 800.00]                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `%`, `_` and `\` in the filter text are escaped, so they match literally.

use chrono::Utc;
use serde::Serialize;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use shopfront_core::{NewProduct, Product, ProductFilter};

const PRODUCT_COLUMNS: &str =
    "id, name, description, category, price_cents, stock, created_at, updated_at";

/// One page of products plus the size of the whole catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_count: i64,
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let cheap = repo
///     .list(&ProductFilter { max_price_cents: Some(20000), ..Default::default() })
///     .await?;
/// let laptop = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products matching `filter`, ordered by id.
    ///
    /// Name and category are case-insensitive literal substring matches; the
    /// price bounds are inclusive.
    pub async fn list(&self, filter: &ProductFilter) -> DbResult<Vec<Product>> {
        debug!(?filter, "Listing products");

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE (?1 IS NULL OR name LIKE '%' || ?1 || '%' ESCAPE '\')
              AND (?2 IS NULL OR category LIKE '%' || ?2 || '%' ESCAPE '\')
              AND (?3 IS NULL OR price_cents >= ?3)
              AND (?4 IS NULL OR price_cents <= ?4)
            ORDER BY id
            "#
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(like_text(&filter.name))
            .bind(like_text(&filter.category))
            .bind(filter.min_price_cents)
            .bind(filter.max_price_cents)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listing returned products");
        Ok(products)
    }

    /// Returns page `page_number` (1-based) of `page_size` products, ordered by id.
    ///
    /// Callers validate the paging arguments first
    /// (`shopfront_core::validation::validate_page`).
    pub async fn page(&self, page_number: i64, page_size: i64) -> DbResult<ProductPage> {
        debug!(page_number, page_size, "Fetching product page");

        let offset = (page_number - 1) * page_size;
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id LIMIT ?1 OFFSET ?2");

        let items = sqlx::query_as::<_, Product>(&sql)
            .bind(page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total_count = self.count().await?;

        Ok(ProductPage {
            items,
            page_number,
            page_size,
            total_count,
        })
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product and returns it with its assigned id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let product = insert_product(&self.pool, product).await?;
        info!(product_id = product.id, name = %product.name, "Product created");

        Ok(product)
    }

    /// Changes the catalog price of a product.
    ///
    /// Order items already placed keep their own unit price.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update_price(&self, id: i64, price_cents: i64) -> DbResult<()> {
        debug!(id, price_cents, "Updating product price");

        let result = sqlx::query("UPDATE products SET price_cents = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(price_cents)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        info!(product_id = id, price_cents, "Product price updated");
        Ok(())
    }

    /// Returns the number of products in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Inserts a product row on `executor` and returns it with its assigned id.
pub(crate) async fn insert_product<'e, E>(executor: E, product: &NewProduct) -> DbResult<Product>
where
    E: SqliteExecutor<'e>,
{
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO products (
            name, description, category, price_cents, stock, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        "#,
    )
    .bind(product.name.clone())
    .bind(product.description.clone())
    .bind(product.category.clone())
    .bind(product.price_cents)
    .bind(product.stock)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(Product {
        id: result.last_insert_rowid(),
        name: product.name.clone(),
        description: product.description.clone(),
        category: product.category.clone(),
        price_cents: product.price_cents,
        stock: product.stock,
        created_at: now,
        updated_at: now,
    })
}

/// Escapes filter text for a `LIKE ... ESCAPE '\'` substring match.
/// Empty or whitespace-only text means "no constraint".
fn like_text(value: &Option<String>) -> Option<String> {
    let text = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;

    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Some(escaped)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn new_product(name: &str, category: &str, price_cents: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            category: category.to_string(),
            price_cents,
            stock,
        }
    }

    async fn catalog() -> ProductRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        repo.insert(&new_product("Laptop", "Electronics", 120000, 10))
            .await
            .unwrap();
        repo.insert(&new_product("Smartphone", "Electronics", 80000, 25))
            .await
            .unwrap();
        repo.insert(&new_product("Headphones", "Accessories", 15000, 50))
            .await
            .unwrap();
        repo
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = catalog().await;

        let laptop = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(laptop.name, "Laptop");
        assert_eq!(laptop.price_cents, 120000);
        assert_eq!(laptop.stock, 10);

        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters() {
        let repo = catalog().await;

        let all = repo.list(&ProductFilter::default()).await.unwrap();
        assert_eq!(names(&all), vec!["Laptop", "Smartphone", "Headphones"]);

        let by_category = repo
            .list(&ProductFilter {
                category: Some("access".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&by_category), vec!["Headphones"]);

        let by_name = repo
            .list(&ProductFilter {
                name: Some("phone".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&by_name), vec!["Smartphone", "Headphones"]);

        let by_price = repo
            .list(&ProductFilter {
                min_price_cents: Some(15000),
                max_price_cents: Some(80000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&by_price), vec!["Smartphone", "Headphones"]);

        let blank = repo
            .list(&ProductFilter {
                name: Some("  ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(blank.len(), 3);
    }

    #[tokio::test]
    async fn test_list_filter_text_is_literal() {
        let repo = catalog().await;
        repo.insert(&new_product("100% Cotton Tee", "Apparel", 2000, 5))
            .await
            .unwrap();
        repo.insert(&new_product("USB_C Cable", "Cables\\Adapters", 900, 40))
            .await
            .unwrap();

        let by_name = |name: &str| ProductFilter {
            name: Some(name.to_string()),
            ..Default::default()
        };

        let percent = repo.list(&by_name("%")).await.unwrap();
        assert_eq!(names(&percent), vec!["100% Cotton Tee"]);

        let underscore = repo.list(&by_name("_")).await.unwrap();
        assert_eq!(names(&underscore), vec!["USB_C Cable"]);

        let no_match = repo.list(&by_name("Lap_op")).await.unwrap();
        assert!(no_match.is_empty());

        let backslash = repo
            .list(&ProductFilter {
                category: Some("s\\a".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&backslash), vec!["USB_C Cable"]);
    }

    #[tokio::test]
    async fn test_page() {
        let repo = catalog().await;

        let first = repo.page(1, 2).await.unwrap();
        assert_eq!(names(&first.items), vec!["Laptop", "Smartphone"]);
        assert_eq!(first.total_count, 3);

        let second = repo.page(2, 2).await.unwrap();
        assert_eq!(names(&second.items), vec!["Headphones"]);

        let past_end = repo.page(5, 2).await.unwrap();
        assert!(past_end.items.is_empty());
    }

    #[tokio::test]
    async fn test_update_price() {
        let repo = catalog().await;

        repo.update_price(1, 99900).await.unwrap();
        assert_eq!(repo.get_by_id(1).await.unwrap().unwrap().price_cents, 99900);

        let err = repo.update_price(999, 100).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
