//! # Product Repository
//!
//! Database operations for the rental catalog.
//!
//! ## Deletion Policy
//! `order_items.product_id` carries a plain FK. Deleting a product that
//! appears on any order fails the constraint check; the error surfaces as
//! [`DbError::ForeignKeyViolation`] and the API turns it into a 409.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rentdesk_core::{Product, RateUnit};

/// Input for creating or updating a catalog entry.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub quantity: i64,
    pub rate_paise: i64,
    pub rate_unit: RateUnit,
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the full catalog, newest first.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products: Vec<Product> = sqlx::query_as(
            r#"
            SELECT id, name, quantity, rate_paise, rate_unit,
                   created_at, updated_at
            FROM products
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product: Option<Product> = sqlx::query_as(
            r#"
            SELECT id, name, quantity, rate_paise, rate_unit,
                   created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets several products at once, for snapshotting rates at order
    /// placement. Missing IDs are simply absent from the result.
    pub async fn get_many(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // SQLite has no array binds; build the placeholder list by hand
        let placeholders = (1..=ids.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT id, name, quantity, rate_paise, rate_unit, \
             created_at, updated_at FROM products WHERE id IN ({placeholders})"
        );

        let mut query = sqlx::query_as::<_, Product>(&sql);
        for id in ids {
            query = query.bind(id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Creates a new catalog entry with a generated ID.
    pub async fn create(&self, input: &ProductInput) -> DbResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: input.name.clone(),
            quantity: input.quantity,
            rate_paise: input.rate_paise,
            rate_unit: input.rate_unit,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, quantity, rate_paise, rate_unit,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.rate_paise)
        .bind(product.rate_unit)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Updates an existing catalog entry.
    ///
    /// Returns the updated row, or NotFound if the ID doesn't exist.
    pub async fn update(&self, id: &str, input: &ProductInput) -> DbResult<Product> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                quantity = ?3,
                rate_paise = ?4,
                rate_unit = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.quantity)
        .bind(input.rate_paise)
        .bind(input.rate_unit)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a catalog entry.
    ///
    /// Fails with a FK violation if the product appears on any order.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        debug!(id = %id, "Deleted product");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
