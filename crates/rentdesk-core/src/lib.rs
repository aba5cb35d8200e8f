//! # rentdesk-core: Pure Business Logic for RentalDesk
//!
//! This crate is the **heart** of RentalDesk. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       RentalDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    /api/customers  /api/products  /api/orders  /api/reports    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ rentdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │  report   │  │   │
//! │  │   │   Order   │  │   Money   │  │  engine   │  │  windows  │  │   │
//! │  │   │  Product  │  │  Percent  │  │           │  │  status   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   rentdesk-db (Database Layer)                  │   │
//! │  │             SQLite queries, migrations, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Order, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - The pricing engine: draft inputs → frozen `PriceDetails`
//! - [`validation`] - Order placement preconditions and field validation
//! - [`report`] - Read-only reporting projections over persisted orders
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Single Pricing Source**: `pricing::compute_price_details` is the ONLY
//!    place totals are derived; stored snapshots are never recomputed
//!
//! ## Example Usage
//!
//! ```rust
//! use rentdesk_core::money::Money;
//! use rentdesk_core::pricing::compute_price_details;
//! use rentdesk_core::types::DraftItem;
//!
//! // 2 × ₹150/day × 2 days = ₹600
//! let items = vec![DraftItem {
//!     product_id: "p1".to_string(),
//!     quantity: 2,
//!     product_rate: Money::from_paise(15000),
//!     rent_rate: Money::from_paise(15000),
//!     number_of_days: 2,
//! }];
//!
//! let details = compute_price_details(&items, None, Money::zero(), Money::zero());
//! assert_eq!(details.price.paise(), 60000);
//! assert_eq!(details.total, details.price);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rentdesk_core::Money` instead of
// `use rentdesk_core::money::Money`

pub use error::ValidationError;
pub use money::{Money, Percent};
pub use pricing::compute_price_details;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix for business order identifiers ("ORD001", "ORD002", ...).
///
/// The sequence is zero-padded to [`ORDER_ID_PAD`] digits; it keeps growing
/// past 999 without padding, so the scheme never collides.
pub const ORDER_ID_PREFIX: &str = "ORD";

/// Minimum width of the numeric part of an order id.
pub const ORDER_ID_PAD: usize = 3;

/// Maximum line items allowed on a single order.
///
/// ## Business Reason
/// Prevents runaway drafts and keeps invoices printable on one page.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum rental duration of a single line item, in days.
pub const MAX_RENTAL_DAYS: i64 = 365;
