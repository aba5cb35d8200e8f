//! # Reporting Projection
//!
//! Read-only aggregation over persisted orders. Nothing here recomputes
//! pricing: every figure is derived from the frozen `PriceDetails` snapshot
//! stored on each order.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Report Pipeline                                    │
//! │                                                                         │
//! │  OrderRepository::list_with_items()                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReportWindow::contains(now, created_at)  ← window filter              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  summarize()                                                           │
//! │  ├── revenue      Σ total of non-cancelled orders                      │
//! │  ├── order_count  all orders in window                                 │
//! │  └── top_products line items grouped by product, qty desc,             │
//! │                   ties kept in first-encountered order                  │
//! │                                                                         │
//! │  payment_status() per order: Cancelled / Paid / Partial / Unpaid       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Order, OrderItem, OrderStatus};

// =============================================================================
// Report Window
// =============================================================================

/// A time window for filtering orders by creation date.
///
/// Weeks start on Sunday, matching what the shop's old reports showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportWindow {
    /// No filtering.
    All,
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    ThisYear,
    /// Inclusive date range.
    Custom { from: NaiveDate, to: NaiveDate },
}

impl ReportWindow {
    /// Checks whether a timestamp falls inside this window, relative to `now`.
    ///
    /// `now` is passed in rather than read from the clock so the projection
    /// stays pure and testable.
    pub fn contains(&self, now: DateTime<Utc>, at: DateTime<Utc>) -> bool {
        let today = now.date_naive();
        let date = at.date_naive();

        match self {
            ReportWindow::All => true,
            ReportWindow::Today => date == today,
            ReportWindow::Yesterday => date == today - Duration::days(1),
            ReportWindow::ThisWeek => {
                let start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
                let end = start + Duration::days(6);
                date >= start && date <= end
            }
            ReportWindow::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            ReportWindow::ThisYear => date.year() == today.year(),
            ReportWindow::Custom { from, to } => date >= *from && date <= *to,
        }
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Payment-status label for an order.
///
/// ## Classification
/// ```text
/// status == Cancelled          → Cancelled
/// remaining_amount <= 0        → Paid      (includes overpayment)
/// initial_paid > 0             → Partial
/// otherwise                    → Unpaid
/// ```
/// The branch ORDER matters: a cancelled order is Cancelled even if fully
/// paid, and a zero-remaining order is Paid even if nothing was paid up
/// front (a fully discounted order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Cancelled,
    Paid,
    Partial,
    Unpaid,
}

impl PaymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Cancelled => "Cancelled",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Unpaid => "Unpaid",
        }
    }
}

/// Classifies an order's payment status from its frozen snapshot.
pub fn payment_status(order: &Order) -> PaymentStatus {
    if order.status == OrderStatus::Cancelled {
        return PaymentStatus::Cancelled;
    }
    if order.remaining_amount_paise <= 0 {
        return PaymentStatus::Paid;
    }
    if order.initial_paid_paise > 0 {
        return PaymentStatus::Partial;
    }
    PaymentStatus::Unpaid
}

// =============================================================================
// Aggregation
// =============================================================================

/// An order joined with its line items, as reports consume them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Aggregate quantity rented for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_id: String,
    pub quantity: i64,
}

/// Windowed aggregate metrics over a set of orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Orders in the window (cancelled included).
    pub order_count: usize,
    /// Σ total of non-cancelled orders.
    pub revenue: Money,
    /// Top products by quantity, descending.
    pub top_products: Vec<ProductSales>,
}

/// Groups line items by product and returns the top `limit` by quantity.
///
/// Ties keep first-encountered order: the sort is stable and groups are
/// created in iteration order.
pub fn top_products<'a, I>(items: I, limit: usize) -> Vec<ProductSales>
where
    I: IntoIterator<Item = &'a OrderItem>,
{
    let mut sales: Vec<ProductSales> = Vec::new();

    for item in items {
        match sales.iter_mut().find(|s| s.product_id == item.product_id) {
            Some(entry) => entry.quantity += item.quantity,
            None => sales.push(ProductSales {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            }),
        }
    }

    sales.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    sales.truncate(limit);
    sales
}

/// Total revenue: Σ total of non-cancelled orders.
pub fn revenue<'a, I>(orders: I) -> Money
where
    I: IntoIterator<Item = &'a Order>,
{
    orders
        .into_iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .map(|o| Money::from_paise(o.total_paise))
        .sum()
}

/// Builds the windowed summary over already-filtered orders.
pub fn summarize(orders: &[OrderWithItems], top_limit: usize) -> ReportSummary {
    ReportSummary {
        order_count: orders.len(),
        revenue: revenue(orders.iter().map(|o| &o.order)),
        top_products: top_products(orders.iter().flat_map(|o| o.items.iter()), top_limit),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(id: &str, status: OrderStatus, total: i64, remaining: i64, paid: i64) -> Order {
        Order {
            id: id.to_string(),
            customer_id: "c1".to_string(),
            delivery_address: "addr".to_string(),
            pickup_required: false,
            vehicle_id: None,
            remarks: None,
            discount_type: None,
            discount_value: 0,
            delivery_charge_paise: 0,
            payment_method: "Cash".to_string(),
            initial_paid_paise: paid,
            price_paise: total,
            discount_amount_paise: 0,
            total_paise: total,
            remaining_amount_paise: remaining,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn line(order_id: &str, product_id: &str, qty: i64) -> OrderItem {
        OrderItem {
            id: format!("{order_id}-{product_id}"),
            order_id: order_id.to_string(),
            product_id: product_id.to_string(),
            quantity: qty,
            product_rate_paise: 10000,
            rent_rate_paise: 10000,
            number_of_days: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_payment_status_classification() {
        // Exactly the four spec cases
        let cancelled = order("o1", OrderStatus::Cancelled, 10000, 10000, 0);
        assert_eq!(payment_status(&cancelled), PaymentStatus::Cancelled);

        let paid = order("o2", OrderStatus::Active, 10000, 0, 0);
        assert_eq!(payment_status(&paid), PaymentStatus::Paid);

        let partial = order("o3", OrderStatus::Active, 15000, 5000, 10000);
        assert_eq!(payment_status(&partial), PaymentStatus::Partial);

        let unpaid = order("o4", OrderStatus::Active, 10000, 10000, 0);
        assert_eq!(payment_status(&unpaid), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_payment_status_overpaid_is_paid() {
        let overpaid = order("o5", OrderStatus::Active, 10000, -5000, 15000);
        assert_eq!(payment_status(&overpaid), PaymentStatus::Paid);
    }

    #[test]
    fn test_revenue_skips_cancelled() {
        let orders = vec![
            order("o1", OrderStatus::Active, 10000, 10000, 0),
            order("o2", OrderStatus::Cancelled, 99999, 99999, 0),
            order("o3", OrderStatus::Returned, 5000, 0, 5000),
        ];
        assert_eq!(revenue(orders.iter()).paise(), 15000);
    }

    #[test]
    fn test_top_products_aggregates_across_orders() {
        // Two orders each contributing to P1: 3 + 2 = 5
        let items = vec![line("o1", "P1", 3), line("o2", "P1", 2), line("o1", "P2", 4)];
        let top = top_products(items.iter(), 5);

        assert_eq!(top[0].product_id, "P1");
        assert_eq!(top[0].quantity, 5);
        assert_eq!(top[1].product_id, "P2");
        assert_eq!(top[1].quantity, 4);
    }

    #[test]
    fn test_top_products_ties_keep_first_encountered() {
        let items = vec![line("o1", "A", 2), line("o1", "B", 2), line("o2", "C", 2)];
        let top = top_products(items.iter(), 3);

        let ids: Vec<&str> = top.iter().map(|s| s.product_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_top_products_limit() {
        let items = vec![line("o1", "A", 5), line("o1", "B", 3), line("o1", "C", 1)];
        assert_eq!(top_products(items.iter(), 2).len(), 2);
    }

    #[test]
    fn test_window_today_and_yesterday() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let this_morning = Utc.with_ymd_and_hms(2026, 8, 26, 8, 0, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2026, 8, 25, 23, 0, 0).unwrap();

        assert!(ReportWindow::Today.contains(now, this_morning));
        assert!(!ReportWindow::Today.contains(now, yesterday));
        assert!(ReportWindow::Yesterday.contains(now, yesterday));
        assert!(!ReportWindow::Yesterday.contains(now, this_morning));
    }

    #[test]
    fn test_window_week_starts_sunday() {
        // 2026-08-26 is a Wednesday; its week is Sun 23rd .. Sat 29th
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();

        let sunday = Utc.with_ymd_and_hms(2026, 8, 23, 0, 0, 0).unwrap();
        let saturday = Utc.with_ymd_and_hms(2026, 8, 29, 23, 59, 0).unwrap();
        let previous_saturday = Utc.with_ymd_and_hms(2026, 8, 22, 12, 0, 0).unwrap();

        assert!(ReportWindow::ThisWeek.contains(now, sunday));
        assert!(ReportWindow::ThisWeek.contains(now, saturday));
        assert!(!ReportWindow::ThisWeek.contains(now, previous_saturday));
    }

    #[test]
    fn test_window_month_and_year() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let early_august = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        let july = Utc.with_ymd_and_hms(2026, 7, 31, 0, 0, 0).unwrap();
        let last_year = Utc.with_ymd_and_hms(2025, 8, 26, 12, 0, 0).unwrap();

        assert!(ReportWindow::ThisMonth.contains(now, early_august));
        assert!(!ReportWindow::ThisMonth.contains(now, july));
        assert!(ReportWindow::ThisYear.contains(now, july));
        assert!(!ReportWindow::ThisYear.contains(now, last_year));
    }

    #[test]
    fn test_window_custom_inclusive() {
        let now = Utc::now();
        let window = ReportWindow::Custom {
            from: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
        };

        let first = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(2026, 8, 15, 23, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 8, 16, 0, 0, 0).unwrap();

        assert!(window.contains(now, first));
        assert!(window.contains(now, last));
        assert!(!window.contains(now, after));
    }

    #[test]
    fn test_summarize() {
        let orders = vec![
            OrderWithItems {
                order: order("o1", OrderStatus::Active, 10000, 10000, 0),
                items: vec![line("o1", "P1", 3)],
            },
            OrderWithItems {
                order: order("o2", OrderStatus::Cancelled, 5000, 5000, 0),
                items: vec![line("o2", "P1", 2)],
            },
        ];

        let summary = summarize(&orders, 5);
        assert_eq!(summary.order_count, 2);
        // Cancelled order excluded from revenue but its items still count
        // toward rental volume
        assert_eq!(summary.revenue.paise(), 10000);
        assert_eq!(summary.top_products[0].quantity, 5);
    }
}
