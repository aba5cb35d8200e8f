//! # Order Repository
//!
//! Database operations for orders and order items.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Lifecycle                                    │
//! │                                                                         │
//! │  1. PLACE                                                              │
//! │     └── create(draft, details)                                         │
//! │         One transaction:                                               │
//! │           • allocate next ORDnnn id                                    │
//! │           • insert header with frozen price snapshot                   │
//! │           • insert every line item                                     │
//! │         Any failure rolls the whole order back.                        │
//! │                                                                         │
//! │  2. SERVE                                                              │
//! │     └── get_by_id() / get_items() / list()                             │
//! │                                                                         │
//! │  3. CLOSE                                                              │
//! │     └── update_status(id, Returned | Cancelled)                        │
//! │         Active is the only state that can move; terminal states        │
//! │         reject every transition.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ID Allocation
//! Order ids are "ORD001", "ORD002", ... allocated as MAX(existing)+1
//! inside the placement transaction. Sequences grow past the 3-digit pad
//! naturally ("ORD1000").

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rentdesk_core::report::OrderWithItems;
use rentdesk_core::{
    Order, OrderDraft, OrderItem, OrderStatus, PriceDetails, ORDER_ID_PAD, ORDER_ID_PREFIX,
};

/// An order header joined with its customer's name for listings.
///
/// `customer_name` is None when the customer has since been deleted;
/// the API renders "Unknown customer" in that case.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderSummaryRow {
    #[sqlx(flatten)]
    pub order: Order,
    pub customer_name: Option<String>,
}

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

    /// Places an order: header plus all line items, atomically.
    ///
    /// ## Arguments
    /// * `draft` - Validated draft with rate snapshots already filled in
    /// * `details` - Price breakdown computed from the same draft
    ///
    /// ## Returns
    /// The persisted order with its allocated id.
    pub async fn create(&self, draft: &OrderDraft, details: &PriceDetails) -> DbResult<Order> {
        let mut tx = self.pool.begin().await?;

        // Allocate the next sequence number. Runs inside the transaction so
        // concurrent placements cannot both claim the same id.
        let max_seq: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(MAX(CAST(substr(id, ?1) AS INTEGER)), 0)
            FROM orders
            "#,
        )
        .bind((ORDER_ID_PREFIX.len() + 1) as i64)
        .fetch_one(&mut *tx)
        .await?;

        let id = format!(
            "{ORDER_ID_PREFIX}{:0width$}",
            max_seq + 1,
            width = ORDER_ID_PAD
        );
        let now = Utc::now();
        let (discount_type, discount_value) = match draft.discount {
            Some(d) => {
                let (t, v) = d.to_stored();
                (Some(t), v)
            }
            None => (None, 0),
        };

        let order = Order {
            id: id.clone(),
            customer_id: draft.customer_id.clone(),
            delivery_address: draft.delivery_address.clone(),
            pickup_required: draft.pickup_required,
            vehicle_id: draft.vehicle_id.clone(),
            remarks: draft.remarks.clone(),
            discount_type,
            discount_value,
            delivery_charge_paise: details.delivery_charge.paise(),
            payment_method: draft.payment_method.clone(),
            initial_paid_paise: draft.initial_paid.paise(),
            price_paise: details.price.paise(),
            discount_amount_paise: details.discount_amount.paise(),
            total_paise: details.total.paise(),
            remaining_amount_paise: details.remaining_amount.paise(),
            status: OrderStatus::Active,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %order.id, total = order.total_paise, "Inserting order");

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, delivery_address, pickup_required,
                vehicle_id, remarks,
                discount_type, discount_value,
                delivery_charge_paise, payment_method, initial_paid_paise,
                price_paise, discount_amount_paise, total_paise,
                remaining_amount_paise,
                status, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6,
                ?7, ?8,
                ?9, ?10, ?11,
                ?12, ?13, ?14,
                ?15,
                ?16, ?17, ?18
            )
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(&order.delivery_address)
        .bind(order.pickup_required)
        .bind(&order.vehicle_id)
        .bind(&order.remarks)
        .bind(order.discount_type)
        .bind(order.discount_value)
        .bind(order.delivery_charge_paise)
        .bind(&order.payment_method)
        .bind(order.initial_paid_paise)
        .bind(order.price_paise)
        .bind(order.discount_amount_paise)
        .bind(order.total_paise)
        .bind(order.remaining_amount_paise)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for item in &draft.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, quantity,
                    product_rate_paise, rent_rate_paise, number_of_days,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&order.id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.product_rate.paise())
            .bind(item.rent_rate.paise())
            .bind(item.number_of_days)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order: Option<Order> = sqlx::query_as(
            r#"
            SELECT id, customer_id, delivery_address, pickup_required,
                   vehicle_id, remarks, discount_type, discount_value,
                   delivery_charge_paise, payment_method, initial_paid_paise,
                   price_paise, discount_amount_paise, total_paise,
                   remaining_amount_paise, status, created_at, updated_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all line items for an order, in insertion order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items: Vec<OrderItem> = sqlx::query_as(
            r#"
            SELECT id, order_id, product_id, quantity,
                   product_rate_paise, rent_rate_paise, number_of_days,
                   created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY created_at, rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an order with its items, or None if the order doesn't exist.
    pub async fn get_with_items(&self, id: &str) -> DbResult<Option<OrderWithItems>> {
        let Some(order) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let items = self.get_items(id).await?;
        Ok(Some(OrderWithItems { order, items }))
    }

    /// Lists all orders newest-first, each joined with its customer's name.
    pub async fn list(&self) -> DbResult<Vec<OrderSummaryRow>> {
        let rows: Vec<OrderSummaryRow> = sqlx::query_as(
            r#"
            SELECT o.id, o.customer_id, o.delivery_address, o.pickup_required,
                   o.vehicle_id, o.remarks, o.discount_type, o.discount_value,
                   o.delivery_charge_paise, o.payment_method,
                   o.initial_paid_paise,
                   o.price_paise, o.discount_amount_paise, o.total_paise,
                   o.remaining_amount_paise, o.status, o.created_at,
                   o.updated_at,
                   c.name AS customer_name
            FROM orders o
            LEFT JOIN customers c ON c.id = o.customer_id
            ORDER BY o.created_at DESC, o.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Loads every order with its items, for report aggregation.
    ///
    /// Orders come back newest-first; items are grouped in memory from a
    /// single scan rather than one query per order.
    pub async fn list_with_items(&self) -> DbResult<Vec<OrderWithItems>> {
        let orders: Vec<Order> = sqlx::query_as(
            r#"
            SELECT id, customer_id, delivery_address, pickup_required,
                   vehicle_id, remarks, discount_type, discount_value,
                   delivery_charge_paise, payment_method, initial_paid_paise,
                   price_paise, discount_amount_paise, total_paise,
                   remaining_amount_paise, status, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let items: Vec<OrderItem> = sqlx::query_as(
            r#"
            SELECT id, order_id, product_id, quantity,
                   product_rate_paise, rent_rate_paise, number_of_days,
                   created_at
            FROM order_items
            ORDER BY created_at, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result: Vec<OrderWithItems> = orders
            .into_iter()
            .map(|order| OrderWithItems {
                order,
                items: Vec::new(),
            })
            .collect();

        for item in items {
            if let Some(entry) = result.iter_mut().find(|o| o.order.id == item.order_id) {
                entry.items.push(item);
            }
        }

        Ok(result)
    }

    /// Updates an order's lifecycle status.
    ///
    /// ## Enforcement
    /// Active is the only state that allows a transition; updating a
    /// Returned or Cancelled order fails with
    /// [`DbError::InvalidTransition`]. The check and the write share one
    /// transaction.
    pub async fn update_status(&self, id: &str, new_status: OrderStatus) -> DbResult<Order> {
        let mut tx = self.pool.begin().await?;

        let current: Option<Order> = sqlx::query_as(
            r#"
            SELECT id, customer_id, delivery_address, pickup_required,
                   vehicle_id, remarks, discount_type, discount_value,
                   delivery_charge_paise, payment_method, initial_paid_paise,
                   price_paise, discount_amount_paise, total_paise,
                   remaining_amount_paise, status, created_at, updated_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let mut order = current.ok_or_else(|| DbError::not_found("Order", id))?;

        if !order.status.can_transition_to(new_status) {
            return Err(DbError::InvalidTransition {
                order_id: id.to_string(),
                from: format!("{:?}", order.status),
                to: format!("{:?}", new_status),
            });
        }

        let now = Utc::now();
        sqlx::query("UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(new_status)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(id = %id, status = ?new_status, "Order status updated");

        order.status = new_status;
        order.updated_at = now;
        Ok(order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
