//! # Validation Module
//!
//! Input validation for RentalDesk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Serde (typed deserialization)                                │
//! │  ├── Shape and enum checks (rate_unit must be day/hour/month)          │
//! │  └── Lenient numeric coercion for draft money fields                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE — business rule validation                       │
//! │  ├── Field rules (non-empty name, quantity ≥ 0, rate ≥ 0)              │
//! │  └── Draft preconditions for order placement                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing vs Placement
//! The pricing engine is deliberately tolerant: a half-edited draft prices
//! with zeroes. Placement is strict: [`validate_draft`] rejects any draft a
//! human would not sign an invoice for.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::OrderDraft;
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS, MAX_RENTAL_DAYS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an entity display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use rentdesk_core::validation::validate_name;
///
/// assert!(validate_name("name", "Chef's Knife").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a customer phone number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 20 characters
/// - Digits, spaces, `+`, `-` and parentheses only
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::required("phone"));
    }

    if phone.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 20,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, +, - and parentheses".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock quantity (products).
///
/// Zero is allowed: a product can be listed while fully rented out.
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a line-item quantity (orders).
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_item_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a rental rate.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free loans happen)
pub fn validate_rate(field: &str, rate: Money) -> ValidationResult<()> {
    if rate.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a rental duration in days.
pub fn validate_days(days: i64) -> ValidationResult<()> {
    if days <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "number_of_days".to_string(),
        });
    }

    if days > MAX_RENTAL_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "number_of_days".to_string(),
            min: 1,
            max: MAX_RENTAL_DAYS,
        });
    }

    Ok(())
}

// =============================================================================
// Order Draft Validation
// =============================================================================

/// Validates every precondition for placing an order.
///
/// Returns ALL violations, one `ValidationError` per failed precondition,
/// so the form can mark every bad field at once instead of whack-a-mole.
///
/// ## Preconditions
/// - a customer is selected
/// - at least one line item; at most [`MAX_ORDER_ITEMS`]
/// - every item: non-empty product id, quantity ≥ 1, rent rate ≥ 0, days ≥ 1
/// - delivery address and payment method are non-empty
///
/// ## Example
/// ```rust
/// use rentdesk_core::money::Money;
/// use rentdesk_core::types::OrderDraft;
/// use rentdesk_core::validation::validate_draft;
///
/// let empty = OrderDraft {
///     customer_id: String::new(),
///     items: vec![],
///     delivery_address: String::new(),
///     pickup_required: false,
///     vehicle_id: None,
///     remarks: None,
///     discount: None,
///     delivery_charge: Money::zero(),
///     payment_method: String::new(),
///     initial_paid: Money::zero(),
/// };
///
/// let errors = validate_draft(&empty).unwrap_err();
/// assert!(errors.iter().any(|e| e.field() == "items"));
/// assert!(errors.iter().any(|e| e.field() == "customer_id"));
/// ```
pub fn validate_draft(draft: &OrderDraft) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if draft.customer_id.trim().is_empty() {
        errors.push(ValidationError::required("customer_id"));
    }

    if draft.items.is_empty() {
        errors.push(ValidationError::required("items"));
    } else if draft.items.len() > MAX_ORDER_ITEMS {
        errors.push(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_ORDER_ITEMS as i64,
        });
    }

    for (idx, item) in draft.items.iter().enumerate() {
        if item.product_id.trim().is_empty() {
            errors.push(ValidationError::Required {
                field: format!("items[{idx}].product_id"),
            });
        }
        if let Err(e) = validate_item_quantity(item.quantity) {
            errors.push(prefix_field(e, idx));
        }
        if let Err(e) = validate_rate("rent_rate", item.rent_rate) {
            errors.push(prefix_field(e, idx));
        }
        if let Err(e) = validate_days(item.number_of_days) {
            errors.push(prefix_field(e, idx));
        }
    }

    if draft.delivery_address.trim().is_empty() {
        errors.push(ValidationError::required("delivery_address"));
    }

    if draft.payment_method.trim().is_empty() {
        errors.push(ValidationError::required("payment_method"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Rewrites a per-item error's field to carry its line index.
fn prefix_field(err: ValidationError, idx: usize) -> ValidationError {
    let rewrite = |field: String| format!("items[{idx}].{field}");
    match err {
        ValidationError::Required { field } => ValidationError::Required {
            field: rewrite(field),
        },
        ValidationError::TooLong { field, max } => ValidationError::TooLong {
            field: rewrite(field),
            max,
        },
        ValidationError::OutOfRange { field, min, max } => ValidationError::OutOfRange {
            field: rewrite(field),
            min,
            max,
        },
        ValidationError::MustBePositive { field } => ValidationError::MustBePositive {
            field: rewrite(field),
        },
        ValidationError::MustBeNonNegative { field } => ValidationError::MustBeNonNegative {
            field: rewrite(field),
        },
        ValidationError::InvalidFormat { field, reason } => ValidationError::InvalidFormat {
            field: rewrite(field),
            reason,
        },
        ValidationError::NotAllowed { field, allowed } => ValidationError::NotAllowed {
            field: rewrite(field),
            allowed,
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DraftItem;

    fn valid_draft() -> OrderDraft {
        OrderDraft {
            customer_id: "c1".to_string(),
            items: vec![DraftItem {
                product_id: "p1".to_string(),
                quantity: 2,
                product_rate: Money::from_paise(15000),
                rent_rate: Money::from_paise(15000),
                number_of_days: 2,
            }],
            delivery_address: "123 Maple St, Springfield".to_string(),
            pickup_required: false,
            vehicle_id: None,
            remarks: None,
            discount: None,
            delivery_charge: Money::zero(),
            payment_method: "Cash".to_string(),
            initial_paid: Money::zero(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_draft(&valid_draft()).is_ok());
    }

    #[test]
    fn test_empty_items_rejected_naming_items_field() {
        let mut draft = valid_draft();
        draft.items.clear();

        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field() == "items"));
    }

    #[test]
    fn test_missing_customer_rejected() {
        let mut draft = valid_draft();
        draft.customer_id = "  ".to_string();

        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field() == "customer_id"));
    }

    #[test]
    fn test_one_error_per_violation() {
        let mut draft = valid_draft();
        draft.customer_id.clear();
        draft.delivery_address.clear();
        draft.payment_method.clear();

        let errors = validate_draft(&draft).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_bad_item_fields_carry_index() {
        let mut draft = valid_draft();
        draft.items[0].quantity = 0;
        draft.items[0].number_of_days = 0;
        draft.items[0].rent_rate = Money::from_paise(-100);

        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field() == "items[0].quantity"));
        assert!(errors
            .iter()
            .any(|e| e.field() == "items[0].number_of_days"));
        assert!(errors.iter().any(|e| e.field() == "items[0].rent_rate"));
    }

    #[test]
    fn test_zero_rent_rate_is_allowed() {
        let mut draft = valid_draft();
        draft.items[0].rent_rate = Money::zero();
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Mixing Bowl Set").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("555-0101").is_ok());
        assert!(validate_phone("+91 98765 43210").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("call me maybe").is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(50).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_item_quantity() {
        assert!(validate_item_quantity(1).is_ok());
        assert!(validate_item_quantity(999).is_ok());
        assert!(validate_item_quantity(0).is_err());
        assert!(validate_item_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_days() {
        assert!(validate_days(1).is_ok());
        assert!(validate_days(365).is_ok());
        assert!(validate_days(0).is_err());
        assert!(validate_days(366).is_err());
    }
}
