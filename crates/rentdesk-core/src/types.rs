//! # Domain Types
//!
//! Core domain types used throughout RentalDesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (ORDnnn)    │       │
//! │  │  name           │   │  name           │   │  customer_id    │       │
//! │  │  rate_paise     │   │  phone          │   │  status         │       │
//! │  │  rate_unit      │   │  aadhar         │   │  price snapshot │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │                 │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌────────▼────────┐       │
//! │  │   OrderStatus   │   │    Discount     │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Active         │   │  Fixed(₹)       │   │  rent_rate      │       │
//! │  │  Returned ◄─┐   │   │  Percentage(%)  │   │  quantity       │       │
//! │  │  Cancelled ◄┴── terminal              │   │  number_of_days │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `Order` freezes its `PriceDetails` at creation; only `status` mutates
//! afterwards. `OrderItem` freezes the catalog rate it saw (`product_rate`)
//! next to the rate actually charged (`rent_rate`) — the two may differ on
//! purpose (manual overrides).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Money, Percent};

// =============================================================================
// Rate Unit
// =============================================================================

/// The billing unit of a product's rental rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum RateUnit {
    /// Charged per day (the common case for utensil rentals).
    Day,
    /// Charged per hour.
    Hour,
    /// Charged per month.
    Month,
}

impl Default for RateUnit {
    fn default() -> Self {
        RateUnit::Day
    }
}

impl RateUnit {
    /// Parses a rate unit from its lowercase wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(RateUnit::Day),
            "hour" => Some(RateUnit::Hour),
            "month" => Some(RateUnit::Month),
            _ => None,
        }
    }

    /// Returns the lowercase wire form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RateUnit::Day => "day",
            RateUnit::Hour => "hour",
            RateUnit::Month => "month",
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A rentable product in the catalog.
///
/// `quantity` is available stock for display; it is NOT decremented or
/// reserved by order placement in this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name ("Chef's Knife", "Stockpot", ...).
    pub name: String,

    /// Units available in stock.
    pub quantity: i64,

    /// Rental rate in paise per rate unit.
    pub rate_paise: i64,

    /// Billing unit for the rate.
    pub rate_unit: RateUnit,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the rental rate as a Money type.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_paise(self.rate_paise)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A party that places orders.
///
/// Orders hold a weak reference to the customer id: deleting a customer does
/// not cascade, historical orders fall back to a placeholder at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    /// Government id on file, if collected.
    pub aadhar: Option<String>,
    /// Free-text referral note ("Bob Smith").
    pub referred_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Vehicle
// =============================================================================

/// A delivery vehicle that can be assigned to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Vehicle {
    pub id: String,
    /// Registration number shown on delivery slips.
    pub number: String,
    pub vehicle_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of an order.
///
/// ## State Machine
/// ```text
/// Active ──► Returned   (terminal)
///    │
///    └─────► Cancelled  (terminal)
/// ```
/// No transition leaves a terminal state. The original UI never enforced
/// this; the rewrite does, because a returned order silently reactivating
/// is a real correctness bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "PascalCase")]
pub enum OrderStatus {
    /// Order placed, utensils out with the customer.
    Active,
    /// Utensils returned; order closed.
    Returned,
    /// Order cancelled.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Active
    }
}

impl OrderStatus {
    /// Checks whether this status permits no further transitions.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Returned | OrderStatus::Cancelled)
    }

    /// Checks whether a transition to `next` is legal.
    ///
    /// Only `Active → Returned` and `Active → Cancelled` are allowed.
    /// Self-transitions are not.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Active, OrderStatus::Returned)
                | (OrderStatus::Active, OrderStatus::Cancelled)
        )
    }

    /// Returns the display form ("Active", "Returned", "Cancelled").
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Active => "Active",
            OrderStatus::Returned => "Returned",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `value` is an absolute amount off.
    Fixed,
    /// `value` is a percentage of the subtotal.
    Percentage,
}

/// A discount applied to an order draft.
///
/// ## Persistence
/// Stored as `(discount_type, discount_value)` where the integer value is
/// paise for `Fixed` and basis points for `Percentage`, so recomputation
/// from stored inputs reproduces the snapshot exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Discount {
    Fixed(Money),
    Percentage(Percent),
}

impl Discount {
    /// Computes the discount amount against a subtotal.
    ///
    /// Deliberately unclamped: a fixed discount larger than the subtotal
    /// drives the total negative, which matches the shop's books.
    pub fn amount(&self, price: Money) -> Money {
        match self {
            Discount::Fixed(value) => *value,
            Discount::Percentage(pct) => price.percent_of(*pct),
        }
    }

    /// Reconstructs a discount from its stored `(type, value)` pair.
    pub fn from_stored(discount_type: DiscountType, value: i64) -> Self {
        match discount_type {
            DiscountType::Fixed => Discount::Fixed(Money::from_paise(value)),
            DiscountType::Percentage => Discount::Percentage(Percent::from_bps(value.max(0) as u32)),
        }
    }

    /// Returns the stored `(type, value)` pair.
    pub fn to_stored(&self) -> (DiscountType, i64) {
        match self {
            Discount::Fixed(value) => (DiscountType::Fixed, value.paise()),
            Discount::Percentage(pct) => (DiscountType::Percentage, pct.bps() as i64),
        }
    }
}

// =============================================================================
// Price Details
// =============================================================================

/// The priced breakdown of an order, frozen at creation time.
///
/// ## Invariants
/// - `total == price - discount_amount + delivery_charge`
/// - `remaining_amount == total - initial_paid`
/// - Never recomputed after the order is placed; reports and invoices read
///   this snapshot as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDetails {
    /// Subtotal: Σ(quantity × rent_rate × number_of_days).
    pub price: Money,
    /// Amount taken off the subtotal.
    pub discount_amount: Money,
    /// Flat delivery charge added on top.
    pub delivery_charge: Money,
    /// `price - discount_amount + delivery_charge`. May be negative.
    pub total: Money,
    /// `total - initial_paid`. Negative means the customer overpaid.
    pub remaining_amount: Money,
}

// =============================================================================
// Order Draft
// =============================================================================

/// One line of an order draft.
///
/// `product_rate` is the catalog rate observed when the line was added
/// (informational); `rent_rate` is what is actually charged and may be
/// overridden by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftItem {
    pub product_id: String,
    pub quantity: i64,
    pub product_rate: Money,
    pub rent_rate: Money,
    pub number_of_days: i64,
}

impl DraftItem {
    /// Line total: quantity × rent_rate × number_of_days.
    ///
    /// A malformed row (zeroed quantity/rate/days) contributes zero rather
    /// than failing; drafts are allowed to be mid-edit.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.rent_rate
            .multiply_quantity(self.quantity)
            .multiply_quantity(self.number_of_days)
    }
}

/// Everything needed to place an order.
///
/// Produced by the order form; validated by
/// [`crate::validation::validate_draft`] before persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_id: String,
    pub items: Vec<DraftItem>,
    pub delivery_address: String,
    pub pickup_required: bool,
    pub vehicle_id: Option<String>,
    pub remarks: Option<String>,
    pub discount: Option<Discount>,
    pub delivery_charge: Money,
    pub payment_method: String,
    pub initial_paid: Money,
}

// =============================================================================
// Order
// =============================================================================

/// A placed order: header row plus frozen pricing snapshot.
///
/// Monetary columns are raw paise (`*_paise: i64`) so the struct maps 1:1
/// onto the database row; use [`Order::price_details`] and friends for the
/// typed view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    /// Business identifier, "ORD001" style.
    pub id: String,
    pub customer_id: String,
    pub delivery_address: String,
    pub pickup_required: bool,
    pub vehicle_id: Option<String>,
    pub remarks: Option<String>,
    /// Discount as stored: type plus raw value (paise or basis points).
    pub discount_type: Option<DiscountType>,
    pub discount_value: i64,
    pub delivery_charge_paise: i64,
    pub payment_method: String,
    pub initial_paid_paise: i64,
    /// Frozen snapshot columns.
    pub price_paise: i64,
    pub discount_amount_paise: i64,
    pub total_paise: i64,
    pub remaining_amount_paise: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the frozen pricing snapshot as typed money.
    pub fn price_details(&self) -> PriceDetails {
        PriceDetails {
            price: Money::from_paise(self.price_paise),
            discount_amount: Money::from_paise(self.discount_amount_paise),
            delivery_charge: Money::from_paise(self.delivery_charge_paise),
            total: Money::from_paise(self.total_paise),
            remaining_amount: Money::from_paise(self.remaining_amount_paise),
        }
    }

    /// Returns the stored discount, if any.
    pub fn discount(&self) -> Option<Discount> {
        self.discount_type
            .map(|t| Discount::from_stored(t, self.discount_value))
    }

    /// Amount paid at placement time.
    #[inline]
    pub fn initial_paid(&self) -> Money {
        Money::from_paise(self.initial_paid_paise)
    }
}

/// A line item on a placed order. Immutable after placement; there are no
/// partial returns per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    /// Catalog rate at the time the line was added (informational).
    pub product_rate_paise: i64,
    /// Rate actually charged; may differ from `product_rate_paise`.
    pub rent_rate_paise: i64,
    pub number_of_days: i64,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Rate actually charged, as Money.
    #[inline]
    pub fn rent_rate(&self) -> Money {
        Money::from_paise(self.rent_rate_paise)
    }

    /// Line total: quantity × rent_rate × number_of_days.
    pub fn line_total(&self) -> Money {
        self.rent_rate()
            .multiply_quantity(self.quantity)
            .multiply_quantity(self.number_of_days)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
