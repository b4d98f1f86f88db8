//! # Customer Repository
//!
//! Registration and credential checks for storefront customers.
//!
//! ## Password Storage
//! ```text
//! register("Alice", "alice@example.com", "Password123")
//!      │
//!      ▼
//! argon2id(password, random salt) ──► "$argon2id$v=19$m=19456,t=2,p=1$..."
//!      │
//!      ▼
//! customers.password_hash (the plain password is never stored)
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use shopfront_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Registers a new customer, storing an argon2 hash of `password`.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - The stored customer with its assigned id
    /// * `Err(DbError::UniqueViolation)` - Email already registered
    pub async fn register(&self, name: &str, email: &str, password: &str) -> DbResult<Customer> {
        debug!(email = %email, "Registering customer");

        let customer = insert_customer(&self.pool, name, email, password).await?;
        info!(customer_id = customer.id, "Customer registered");

        Ok(customer)
    }

    /// Gets a customer by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, password_hash FROM customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, password_hash
            FROM customers
            WHERE email = ?1 COLLATE NOCASE
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Returns true when `email` is already registered.
    pub async fn email_exists(&self, email: &str) -> DbResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE email = ?1 COLLATE NOCASE")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Checks an email/password pair.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Credentials match
    /// * `Ok(None)` - Unknown email or wrong password (indistinguishable)
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> DbResult<Option<Customer>> {
        let customer = self.find_by_email(email).await?;

        Ok(customer.filter(|c| verify_password(password, &c.password_hash)))
    }

    /// Returns the number of registered customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Hashes `password` and inserts the customer row on `executor`.
///
/// Shared by [`CustomerRepository::register`] and the demo seed, which runs
/// inside its own transaction.
pub(crate) async fn insert_customer<'e, E>(
    executor: E,
    name: &str,
    email: &str,
    password: &str,
) -> DbResult<Customer>
where
    E: SqliteExecutor<'e>,
{
    let password_hash = hash_password(password)?;

    let result = sqlx::query(
        r#"
        INSERT INTO customers (name, email, password_hash, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(name.to_string())
    .bind(email.to_string())
    .bind(password_hash.clone())
    .bind(Utc::now())
    .execute(executor)
    .await
    .map_err(|e| match DbError::from(e) {
        DbError::UniqueViolation { .. } => DbError::duplicate("email", email),
        other => other,
    })?;

    Ok(Customer {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash,
    })
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a password with argon2id and a random salt.
pub fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
