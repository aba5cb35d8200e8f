//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Deletion Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders.customer_id is a weak reference (no FK).                        │
//! │                                                                         │
//! │  DELETE /api/customers/{id}                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Customer row removed; their orders survive.                           │
//! │  Order listings render "Unknown customer" for the dangling reference.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rentdesk_core::Customer;

/// Input for creating or updating a customer.
#[derive(Debug, Clone)]
pub struct CustomerInput {
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub aadhar: Option<String>,
    pub referred_by: Option<String>,
}

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

    /// Lists all customers, newest first.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers: Vec<Customer> = sqlx::query_as(
            r#"
            SELECT id, name, phone, address, aadhar, referred_by,
                   created_at, updated_at
            FROM customers
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer: Option<Customer> = sqlx::query_as(
            r#"
            SELECT id, name, phone, address, aadhar, referred_by,
                   created_at, updated_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Creates a new customer with a generated ID.
    pub async fn create(&self, input: &CustomerInput) -> DbResult<Customer> {
        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: input.name.clone(),
            phone: input.phone.clone(),
            address: input.address.clone(),
            aadhar: input.aadhar.clone(),
            referred_by: input.referred_by.clone(),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %customer.id, name = %customer.name, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (
                id, name, phone, address, aadhar, referred_by,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.aadhar)
        .bind(&customer.referred_by)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Updates an existing customer.
    ///
    /// Returns the updated row, or NotFound if the ID doesn't exist.
    pub async fn update(&self, id: &str, input: &CustomerInput) -> DbResult<Customer> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2,
                phone = ?3,
                address = ?4,
                aadhar = ?5,
                referred_by = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.aadhar)
        .bind(&input.referred_by)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", id))
    }

    /// Deletes a customer.
    ///
    /// Their orders are kept; the customer_id on those orders dangles.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        debug!(id = %id, "Deleted customer");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn input(name: &str) -> CustomerInput {
        CustomerInput {
            name: name.to_string(),
            phone: "9876543210".to_string(),
            address: Some("12 Market Road".to_string()),
            aadhar: None,
            referred_by: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let created = repo.create(&input("Asha")).await.unwrap();
        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Asha");
        assert_eq!(fetched.phone, "9876543210");
    }

    #[tokio::test]
    async fn test_update() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let created = repo.create(&input("Asha")).await.unwrap();
        let mut changed = input("Asha Devi");
        changed.phone = "9000000000".to_string();

        let updated = repo.update(&created.id, &changed).await.unwrap();
        assert_eq!(updated.name, "Asha Devi");
        assert_eq!(updated.phone, "9000000000");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let err = repo.update("no-such-id", &input("X")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let created = repo.create(&input("Asha")).await.unwrap();
        repo.delete(&created.id).await.unwrap();

        assert!(repo.get_by_id(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        repo.create(&input("First")).await.unwrap();
        repo.create(&input("Second")).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
