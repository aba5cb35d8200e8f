//! # Wire DTOs and Boundary Conversion
//!
//! Everything that crosses the HTTP boundary lives here.
//!
//! ## Two Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. RUPEES ON THE WIRE, PAISE INSIDE                                    │
//! │                                                                         │
//! │     { "rate": 150.0 }  ──►  Money::from_rupees(150.0)  ──►  15000 paise │
//! │     15000 paise        ──►  money.rupees()             ──►  150.0       │
//! │                                                                         │
//! │  2. DRAFT NUMERICS NEVER FAIL                                           │
//! │                                                                         │
//! │     The order form posts half-filled rows while the user is still       │
//! │     typing. A quantity of "", null, "abc" or a missing field coerces    │
//! │     to 0 and prices to nothing; it must never 422 the whole quote.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use rentdesk_core::report::{ProductSales, ReportSummary};
use rentdesk_core::{
    Customer, Discount, DiscountType, DraftItem, Money, Order, OrderDraft, OrderItem, OrderStatus,
    Percent, PriceDetails, Product, RateUnit, Vehicle,
};
use rentdesk_db::OrderSummaryRow;

/// Placeholder shown when a line item's product has been deleted.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Placeholder shown when an order's customer has been deleted.
pub const UNKNOWN_CUSTOMER: &str = "Unknown customer";

// =============================================================================
// Lenient Numeric Coercion
// =============================================================================

fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn coerce_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Deserializes any JSON value to f64; null or garbage become 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_f64).unwrap_or(0.0))
}

/// Deserializes any JSON value to i64; null or garbage become 0.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_i64).unwrap_or(0))
}

/// Like [`lenient_f64`] but keeps "not provided" distinct from 0:
/// missing/null yield None, anything else coerces.
fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(coerce_f64(&v)),
    })
}

// =============================================================================
// Request Payloads
// =============================================================================

/// Create/update payload for a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub address: Option<String>,
    pub aadhar: Option<String>,
    pub referred_by: Option<String>,
}

/// Create/update payload for a catalog entry. `rate` is rupees per unit.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rate: f64,
    #[serde(default)]
    pub rate_unit: Option<String>,
}

/// One draft row on the order form. All numerics are lenient.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemPayload {
    #[serde(default)]
    pub product_id: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    /// Rate actually charged, rupees. None means "use the catalog rate".
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub rent_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub number_of_days: i64,
}

/// Discount as posted by the form: a type tag and a rupee-or-percent value.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountPayload {
    #[serde(rename = "type", default)]
    pub discount_type: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: f64,
}

impl DiscountPayload {
    /// Interprets the payload; an unrecognized type means no discount.
    pub fn to_discount(&self) -> Option<Discount> {
        match self.discount_type.as_str() {
            "fixed" => Some(Discount::Fixed(Money::from_rupees(self.value))),
            "percentage" => Some(Discount::Percentage(Percent::from_percentage(self.value))),
            _ => None,
        }
    }
}

/// Order placement / quote payload.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPayload {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub items: Vec<OrderItemPayload>,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub pickup_required: bool,
    pub vehicle_id: Option<String>,
    pub remarks: Option<String>,
    pub discount: Option<DiscountPayload>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub delivery_charge: f64,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub initial_paid: f64,
}

impl OrderPayload {
    /// Builds the typed draft, snapshotting catalog rates from `products`.
    ///
    /// Rows whose product is missing from the map get a zero catalog rate;
    /// placement pre-checks existence, quotes deliberately don't.
    pub fn to_draft(&self, products: &HashMap<String, Product>) -> OrderDraft {
        let items = self
            .items
            .iter()
            .map(|item| {
                let product_rate = products
                    .get(&item.product_id)
                    .map(|p| p.rate())
                    .unwrap_or_else(Money::zero);
                let rent_rate = item
                    .rent_rate
                    .map(Money::from_rupees)
                    .unwrap_or(product_rate);

                DraftItem {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                    product_rate,
                    rent_rate,
                    number_of_days: item.number_of_days,
                }
            })
            .collect();

        OrderDraft {
            customer_id: self.customer_id.clone(),
            items,
            delivery_address: self.delivery_address.clone(),
            pickup_required: self.pickup_required,
            vehicle_id: self.vehicle_id.clone(),
            remarks: self.remarks.clone(),
            discount: self.discount.as_ref().and_then(DiscountPayload::to_discount),
            delivery_charge: Money::from_rupees(self.delivery_charge),
            payment_method: self.payment_method.clone(),
            initial_paid: Money::from_rupees(self.initial_paid),
        }
    }
}

/// Status update payload for PATCH /api/orders/{id}.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPayload {
    pub status: OrderStatus,
}

// =============================================================================
// Response DTOs
// =============================================================================

/// Catalog entry with the rate in rupees.
#[derive(Debug, Serialize)]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub rate: f64,
    pub rate_unit: RateUnit,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            rate: p.rate().rupees(),
            id: p.id,
            name: p.name,
            quantity: p.quantity,
            rate_unit: p.rate_unit,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Customers and vehicles carry no money; the entities go out as-is.
pub type CustomerDto = Customer;
pub type VehicleDto = Vehicle;

/// Price breakdown in rupees.
#[derive(Debug, Serialize)]
pub struct PriceDetailsDto {
    pub price: f64,
    pub discount_amount: f64,
    pub delivery_charge: f64,
    pub total: f64,
    pub remaining_amount: f64,
}

impl From<PriceDetails> for PriceDetailsDto {
    fn from(d: PriceDetails) -> Self {
        PriceDetailsDto {
            price: d.price.rupees(),
            discount_amount: d.discount_amount.rupees(),
            delivery_charge: d.delivery_charge.rupees(),
            total: d.total.rupees(),
            remaining_amount: d.remaining_amount.rupees(),
        }
    }
}

/// Discount as rendered back to clients.
#[derive(Debug, Serialize)]
pub struct DiscountDto {
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    /// Rupees for fixed, percent for percentage.
    pub value: f64,
}

impl From<Discount> for DiscountDto {
    fn from(d: Discount) -> Self {
        match d {
            Discount::Fixed(amount) => DiscountDto {
                discount_type: DiscountType::Fixed,
                value: amount.rupees(),
            },
            Discount::Percentage(pct) => DiscountDto {
                discount_type: DiscountType::Percentage,
                value: pct.percentage(),
            },
        }
    }
}

/// One row of GET /api/orders.
#[derive(Debug, Serialize)]
pub struct OrderSummaryDto {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub total: f64,
    pub remaining_amount: f64,
    pub initial_paid: f64,
    pub status: OrderStatus,
    pub payment_status: &'static str,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<OrderSummaryRow> for OrderSummaryDto {
    fn from(row: OrderSummaryRow) -> Self {
        let payment_status = rentdesk_core::report::payment_status(&row.order).as_str();
        let order = row.order;
        OrderSummaryDto {
            customer_name: row
                .customer_name
                .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()),
            total: Money::from_paise(order.total_paise).rupees(),
            remaining_amount: Money::from_paise(order.remaining_amount_paise).rupees(),
            initial_paid: order.initial_paid().rupees(),
            payment_status,
            id: order.id,
            customer_id: order.customer_id,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

/// One line item of GET /api/orders/{id}.
#[derive(Debug, Serialize)]
pub struct OrderItemDto {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub product_rate: f64,
    pub rent_rate: f64,
    pub number_of_days: i64,
    pub line_total: f64,
}

impl OrderItemDto {
    /// Renders a line item, falling back to "Unknown Product" when its
    /// product has since been deleted.
    pub fn from_item(item: &OrderItem, products: &HashMap<String, Product>) -> Self {
        OrderItemDto {
            product_id: item.product_id.clone(),
            product_name: products
                .get(&item.product_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            quantity: item.quantity,
            product_rate: Money::from_paise(item.product_rate_paise).rupees(),
            rent_rate: item.rent_rate().rupees(),
            number_of_days: item.number_of_days,
            line_total: item.line_total().rupees(),
        }
    }
}

/// Full order view: header, frozen price snapshot, rendered items.
#[derive(Debug, Serialize)]
pub struct OrderDetailDto {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub delivery_address: String,
    pub pickup_required: bool,
    pub vehicle_id: Option<String>,
    pub remarks: Option<String>,
    pub discount: Option<DiscountDto>,
    pub payment_method: String,
    pub initial_paid: f64,
    #[serde(flatten)]
    pub price_details: PriceDetailsDto,
    pub status: OrderStatus,
    pub payment_status: &'static str,
    pub items: Vec<OrderItemDto>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl OrderDetailDto {
    pub fn build(
        order: Order,
        items: &[OrderItem],
        customer_name: Option<String>,
        products: &HashMap<String, Product>,
    ) -> Self {
        let payment_status = rentdesk_core::report::payment_status(&order).as_str();
        OrderDetailDto {
            customer_name: customer_name.unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()),
            discount: order.discount().map(DiscountDto::from),
            initial_paid: order.initial_paid().rupees(),
            price_details: order.price_details().into(),
            payment_status,
            items: items
                .iter()
                .map(|i| OrderItemDto::from_item(i, products))
                .collect(),
            id: order.id,
            customer_id: order.customer_id,
            delivery_address: order.delivery_address,
            pickup_required: order.pickup_required,
            vehicle_id: order.vehicle_id,
            remarks: order.remarks,
            payment_method: order.payment_method,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// One product line in the report's top-products list.
#[derive(Debug, Serialize)]
pub struct ProductSalesDto {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
}

impl ProductSalesDto {
    pub fn from_sales(sales: &ProductSales, products: &HashMap<String, Product>) -> Self {
        ProductSalesDto {
            product_id: sales.product_id.clone(),
            product_name: products
                .get(&sales.product_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            quantity: sales.quantity,
        }
    }
}

/// Per-order line in the report: who owes what.
#[derive(Debug, Serialize)]
pub struct ReportOrderDto {
    pub id: String,
    pub total: f64,
    pub remaining_amount: f64,
    pub status: OrderStatus,
    pub payment_status: &'static str,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Order> for ReportOrderDto {
    fn from(order: &Order) -> Self {
        ReportOrderDto {
            id: order.id.clone(),
            total: Money::from_paise(order.total_paise).rupees(),
            remaining_amount: Money::from_paise(order.remaining_amount_paise).rupees(),
            status: order.status,
            payment_status: rentdesk_core::report::payment_status(order).as_str(),
            created_at: order.created_at,
        }
    }
}

/// GET /api/reports/summary response body.
#[derive(Debug, Serialize)]
pub struct ReportSummaryDto {
    pub order_count: usize,
    /// Σ total of non-cancelled orders in the window, rupees.
    pub revenue: f64,
    pub top_products: Vec<ProductSalesDto>,
    pub orders: Vec<ReportOrderDto>,
}

impl ReportSummaryDto {
    pub fn build(
        summary: ReportSummary,
        orders: Vec<ReportOrderDto>,
        products: &HashMap<String, Product>,
    ) -> Self {
        ReportSummaryDto {
            order_count: summary.order_count,
            revenue: summary.revenue.rupees(),
            top_products: summary
                .top_products
                .iter()
                .map(|s| ProductSalesDto::from_sales(s, products))
                .collect(),
            orders,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_item_accepts_garbage() {
        let item: OrderItemPayload = serde_json::from_str(
            r#"{"product_id": "p1", "quantity": "abc", "number_of_days": null}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, 0);
        assert_eq!(item.number_of_days, 0);
        assert!(item.rent_rate.is_none());
    }

    #[test]
    fn test_lenient_item_parses_numeric_strings() {
        let item: OrderItemPayload = serde_json::from_str(
            r#"{"product_id": "p1", "quantity": "3", "rent_rate": "150.5", "number_of_days": 2}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(item.rent_rate, Some(150.5));
        assert_eq!(item.number_of_days, 2);
    }

    #[test]
    fn test_empty_payload_deserializes() {
        // A fully blank draft must parse so a quote can return zeros
        let payload: OrderPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.items.is_empty());
        assert_eq!(payload.delivery_charge, 0.0);
        assert_eq!(payload.initial_paid, 0.0);
    }

    #[test]
    fn test_discount_payload_interpretation() {
        let fixed = DiscountPayload {
            discount_type: "fixed".to_string(),
            value: 50.0,
        };
        assert_eq!(
            fixed.to_discount(),
            Some(Discount::Fixed(Money::from_paise(5000)))
        );

        let pct = DiscountPayload {
            discount_type: "percentage".to_string(),
            value: 10.0,
        };
        assert_eq!(
            pct.to_discount(),
            Some(Discount::Percentage(Percent::from_bps(1000)))
        );

        let bogus = DiscountPayload {
            discount_type: "buy-one-get-one".to_string(),
            value: 10.0,
        };
        assert_eq!(bogus.to_discount(), None);
    }

    #[test]
    fn test_to_draft_uses_catalog_rate_when_rent_rate_missing() {
        let product = Product {
            id: "p1".to_string(),
            name: "Chef's Knife".to_string(),
            quantity: 10,
            rate_paise: 15000,
            rate_unit: RateUnit::Day,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let mut products = HashMap::new();
        products.insert(product.id.clone(), product);

        let payload: OrderPayload = serde_json::from_str(
            r#"{"customer_id": "c1",
                "items": [{"product_id": "p1", "quantity": 2, "number_of_days": 2}],
                "delivery_address": "addr", "payment_method": "Cash"}"#,
        )
        .unwrap();

        let draft = payload.to_draft(&products);
        assert_eq!(draft.items[0].product_rate.paise(), 15000);
        assert_eq!(draft.items[0].rent_rate.paise(), 15000);
    }

    #[test]
    fn test_to_draft_honors_negotiated_rate() {
        let payload: OrderPayload = serde_json::from_str(
            r#"{"items": [{"product_id": "p1", "quantity": 1,
                           "rent_rate": 120.0, "number_of_days": 1}]}"#,
        )
        .unwrap();

        // Unknown product: catalog rate 0, negotiated rate kept
        let draft = payload.to_draft(&HashMap::new());
        assert_eq!(draft.items[0].product_rate.paise(), 0);
        assert_eq!(draft.items[0].rent_rate.paise(), 12000);
    }

    #[test]
    fn test_product_dto_converts_to_rupees() {
        let product = Product {
            id: "p1".to_string(),
            name: "Chef's Knife".to_string(),
            quantity: 10,
            rate_paise: 15050,
            rate_unit: RateUnit::Day,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let dto = ProductDto::from(product);
        assert_eq!(dto.rate, 150.5);
    }
}
