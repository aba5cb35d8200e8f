//! # Pricing Engine
//!
//! The single source of truth for order money math.
//!
//! ## Why One Engine?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEFORE: every surface re-derived totals                                │
//! │                                                                         │
//! │    Order form ──┐                                                       │
//! │    Dashboard ───┼──► four slightly different subtotal/rounding paths    │
//! │    Reports ─────┤         (field drift, float drift, sadness)           │
//! │    Invoice ─────┘                                                       │
//! │                                                                         │
//! │  NOW: one pure function                                                 │
//! │                                                                         │
//! │    compute_price_details(items, discount, delivery, paid)               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    PriceDetails { price, discount_amount, delivery_charge,              │
//! │                   total, remaining_amount }                             │
//! │                                                                         │
//! │    Frozen onto the order at placement; read back verbatim everywhere.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! - `price = Σ(quantity × rent_rate × number_of_days)` in integer paise
//! - fixed discount: `discount_amount = value`
//! - percentage discount: `discount_amount = price × pct / 100` (half-up)
//! - `total = price - discount_amount + delivery_charge`
//! - `remaining_amount = total - initial_paid`
//! - **No clamping.** Discounts may exceed the subtotal (negative total)
//!   and payments may exceed the total (negative remaining). The shop's
//!   books allow both; hiding them here would be lying.
//! - Deterministic and idempotent: recomputing from an order's stored
//!   inputs reproduces its snapshot bit-for-bit.
//! - Never fails: an empty draft prices to zero, malformed rows arrive
//!   already zero-coerced from the boundary and contribute nothing.

use crate::money::Money;
use crate::types::{DraftItem, Discount, PriceDetails};

/// Computes the full price breakdown for a draft order.
///
/// Pure function: no side effects, no I/O, no hidden state. Safe to call
/// concurrently from any number of request handlers.
///
/// ## Arguments
/// * `items` - Draft line items; may be empty for an in-progress draft
///   (order *placement* rejects empty drafts, pricing does not)
/// * `discount` - Optional discount spec; `None` means no discount
/// * `delivery_charge` - Flat charge added after the discount
/// * `initial_paid` - Amount collected up front
///
/// ## Example
/// ```rust
/// use rentdesk_core::money::Money;
/// use rentdesk_core::pricing::compute_price_details;
/// use rentdesk_core::types::{Discount, DraftItem};
///
/// // 2 × ₹150 × 2 days + 1 × ₹70 × 2 days = ₹740, delivery ₹50
/// let items = vec![
///     DraftItem {
///         product_id: "knife".into(),
///         quantity: 2,
///         product_rate: Money::from_paise(15000),
///         rent_rate: Money::from_paise(15000),
///         number_of_days: 2,
///     },
///     DraftItem {
///         product_id: "board".into(),
///         quantity: 1,
///         product_rate: Money::from_paise(7000),
///         rent_rate: Money::from_paise(7000),
///         number_of_days: 2,
///     },
/// ];
///
/// let details = compute_price_details(
///     &items,
///     Some(&Discount::Fixed(Money::zero())),
///     Money::from_paise(5000),
///     Money::zero(),
/// );
/// assert_eq!(details.price.paise(), 74000);
/// assert_eq!(details.total.paise(), 79000);
/// assert_eq!(details.remaining_amount.paise(), 79000);
/// ```
pub fn compute_price_details(
    items: &[DraftItem],
    discount: Option<&Discount>,
    delivery_charge: Money,
    initial_paid: Money,
) -> PriceDetails {
    let price: Money = items.iter().map(DraftItem::line_total).sum();

    let discount_amount = discount.map_or(Money::zero(), |d| d.amount(price));

    let total = price - discount_amount + delivery_charge;
    let remaining_amount = total - initial_paid;

    PriceDetails {
        price,
        discount_amount,
        delivery_charge,
        total,
        remaining_amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Percent;

    fn item(qty: i64, rate_paise: i64, days: i64) -> DraftItem {
        DraftItem {
            product_id: format!("p-{qty}-{rate_paise}"),
            quantity: qty,
            product_rate: Money::from_paise(rate_paise),
            rent_rate: Money::from_paise(rate_paise),
            number_of_days: days,
        }
    }

    #[test]
    fn test_fixed_discount_scenario() {
        // 2 × ₹150 × 2 = ₹600, 1 × ₹70 × 2 = ₹140, delivery ₹50
        let items = vec![item(2, 15000, 2), item(1, 7000, 2)];
        let details = compute_price_details(
            &items,
            Some(&Discount::Fixed(Money::zero())),
            Money::from_paise(5000),
            Money::zero(),
        );

        assert_eq!(details.price.paise(), 74000);
        assert_eq!(details.discount_amount.paise(), 0);
        assert_eq!(details.delivery_charge.paise(), 5000);
        assert_eq!(details.total.paise(), 79000);
        assert_eq!(details.remaining_amount.paise(), 79000);
    }

    #[test]
    fn test_percentage_discount_scenario() {
        // price ₹660 at 10% → ₹66 off, total ₹594; paid ₹500 → ₹94 remaining
        let items = vec![item(1, 66000, 1)];
        let details = compute_price_details(
            &items,
            Some(&Discount::Percentage(Percent::from_percentage(10.0))),
            Money::zero(),
            Money::from_paise(50000),
        );

        assert_eq!(details.price.paise(), 66000);
        assert_eq!(details.discount_amount.paise(), 6600);
        assert_eq!(details.total.paise(), 59400);
        assert_eq!(details.remaining_amount.paise(), 9400);
    }

    #[test]
    fn test_empty_items_price_zero() {
        let details = compute_price_details(&[], None, Money::zero(), Money::zero());
        assert!(details.price.is_zero());
        assert!(details.total.is_zero());
        assert!(details.remaining_amount.is_zero());
    }

    #[test]
    fn test_empty_items_with_delivery_charge() {
        // An in-progress draft with only a delivery charge filled in
        let details =
            compute_price_details(&[], None, Money::from_paise(5000), Money::zero());
        assert_eq!(details.price.paise(), 0);
        assert_eq!(details.total.paise(), 5000);
    }

    #[test]
    fn test_no_discount_means_zero() {
        let items = vec![item(1, 10000, 1)];
        let details = compute_price_details(&items, None, Money::zero(), Money::zero());
        assert_eq!(details.discount_amount.paise(), 0);
        assert_eq!(details.total.paise(), 10000);
    }

    #[test]
    fn test_discount_exceeding_price_goes_negative() {
        // Fixed ₹200 off a ₹100 order: total is -₹100, not clamped
        let items = vec![item(1, 10000, 1)];
        let details = compute_price_details(
            &items,
            Some(&Discount::Fixed(Money::from_paise(20000))),
            Money::zero(),
            Money::zero(),
        );
        assert_eq!(details.total.paise(), -10000);
        assert_eq!(details.remaining_amount.paise(), -10000);
    }

    #[test]
    fn test_overpayment_goes_negative() {
        let items = vec![item(1, 10000, 1)];
        let details = compute_price_details(
            &items,
            None,
            Money::zero(),
            Money::from_paise(15000),
        );
        assert_eq!(details.remaining_amount.paise(), -5000);
    }

    #[test]
    fn test_zeroed_rows_contribute_nothing() {
        // Rows mid-edit arrive with fields coerced to zero; they must not
        // fail and must not move the subtotal
        let items = vec![item(2, 15000, 2), item(0, 0, 0)];
        let details = compute_price_details(&items, None, Money::zero(), Money::zero());
        assert_eq!(details.price.paise(), 60000);
    }

    #[test]
    fn test_extreme_draft_saturates_instead_of_overflowing() {
        // Quotes skip validation, so a draft can arrive with rates that
        // coerced all the way to i64::MAX paise. Totals must pin at the
        // range limit, never wrap or panic.
        let extreme = DraftItem {
            product_id: "p-extreme".to_string(),
            quantity: 2,
            product_rate: Money::from_rupees(f64::MAX),
            rent_rate: Money::from_rupees(f64::MAX),
            number_of_days: 1,
        };

        let details = compute_price_details(
            &[extreme],
            None,
            Money::from_paise(5000),
            Money::from_paise(10000),
        );

        assert_eq!(details.price.paise(), i64::MAX);
        assert_eq!(details.total.paise(), i64::MAX);
        assert_eq!(details.remaining_amount.paise(), i64::MAX - 10000);
    }

    #[test]
    fn test_idempotent() {
        let items = vec![item(3, 12345, 7), item(1, 99, 2)];
        let discount = Discount::Percentage(Percent::from_percentage(12.5));
        let a = compute_price_details(
            &items,
            Some(&discount),
            Money::from_paise(2500),
            Money::from_paise(10000),
        );
        let b = compute_price_details(
            &items,
            Some(&discount),
            Money::from_paise(2500),
            Money::from_paise(10000),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_invariants_hold() {
        let items = vec![item(4, 7300, 3), item(2, 15000, 5)];
        let details = compute_price_details(
            &items,
            Some(&Discount::Percentage(Percent::from_percentage(7.5))),
            Money::from_paise(9900),
            Money::from_paise(50000),
        );

        assert_eq!(
            details.total,
            details.price - details.discount_amount + details.delivery_charge
        );
        assert_eq!(
            details.remaining_amount,
            details.total - Money::from_paise(50000)
        );
    }
}
