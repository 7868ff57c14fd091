//! # Validation Module
//!
//! Input validation for catalog records and sale requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (axum Json extractor)                                   │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths, numeric ranges                          │
//! │  └── Runs before any database access                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE names                                                      │
//! │  ├── CHECK (quantity > 0, stock_quantity >= 0)                         │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{NewCategory, NewPaymentMethod, NewProduct, NewSale};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Max length of category and payment method names.
pub const MAX_LABEL_LEN: usize = 50;
/// Max length of product and free-text item names.
pub const MAX_ITEM_NAME_LEN: usize = 100;
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;
pub const MAX_CUSTOMER_PHONE_LEN: usize = 20;
pub const MAX_NOTES_LEN: usize = 1000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required name: non-blank and at most `max` characters.
///
/// ## Example
/// ```rust
/// use cafe_core::validation::validate_name;
///
/// assert!(validate_name("name", "Cappuccino", 100).is_ok());
/// assert!(validate_name("name", "   ", 100).is_err());
/// ```
pub fn validate_name(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    validate_max_len(field, value, max)
}

/// Validates an optional free-form string (may be empty).
pub fn validate_max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
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

/// Validates a price in cents. Zero is allowed (complimentary items).
///
/// ## Example
/// ```rust
/// use cafe_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("price_cents", 1099).is_ok());
/// assert!(validate_price_cents("price_cents", 0).is_ok());
/// assert!(validate_price_cents("price_cents", -100).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a non-negative stock count or threshold.
pub fn validate_stock_level(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use cafe_core::validation::validate_uuid;
///
/// assert!(validate_uuid("product_id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("product_id", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

pub fn validate_new_category(input: &NewCategory) -> ValidationResult<()> {
    validate_name("name", &input.name, MAX_LABEL_LEN)
}

pub fn validate_new_payment_method(input: &NewPaymentMethod) -> ValidationResult<()> {
    validate_name("name", &input.name, MAX_LABEL_LEN)
}

pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_name("name", &input.name, MAX_ITEM_NAME_LEN)?;
    validate_uuid("category_id", &input.category_id)?;
    validate_price_cents("price_cents", input.price_cents)?;
    validate_stock_level("stock_quantity", input.stock_quantity)?;
    validate_stock_level("min_stock_level", input.min_stock_level)?;
    Ok(())
}

/// Validates a sale request's shape. Stock rules are checked separately,
/// once the product has been loaded.
pub fn validate_new_sale(input: &NewSale) -> ValidationResult<()> {
    validate_quantity(input.quantity)?;
    validate_uuid("payment_method_id", &input.payment_method_id)?;

    if let Some(product_id) = &input.product_id {
        validate_uuid("product_id", product_id)?;
    } else {
        match &input.item_name {
            Some(name) => validate_name("item_name", name, MAX_ITEM_NAME_LEN)?,
            None => {
                return Err(ValidationError::Required {
                    field: "product_id".to_string(),
                })
            }
        }
        match &input.category_id {
            Some(category_id) => validate_uuid("category_id", category_id)?,
            None => {
                return Err(ValidationError::Required {
                    field: "category_id".to_string(),
                })
            }
        }
    }

    if let Some(cents) = input.unit_price_cents {
        validate_price_cents("unit_price_cents", cents)?;
    }

    validate_max_len("customer_name", &input.customer_name, MAX_CUSTOMER_NAME_LEN)?;
    validate_max_len("customer_phone", &input.customer_phone, MAX_CUSTOMER_PHONE_LEN)?;
    validate_max_len("notes", &input.notes, MAX_NOTES_LEN)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PM: &str = "550e8400-e29b-41d4-a716-446655440000";
    const PRODUCT: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

    fn sale(quantity: i64) -> NewSale {
        NewSale {
            product_id: Some(PRODUCT.to_string()),
            quantity,
            payment_method_id: PM.to_string(),
            ..NewSale::default()
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Latte", 50).is_ok());
        assert!(validate_name("name", "", 50).is_err());
        assert!(validate_name("name", &"A".repeat(51), 50).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_new_sale() {
        assert!(validate_new_sale(&sale(2)).is_ok());
        assert!(validate_new_sale(&sale(0)).is_err());

        let mut bad_phone = sale(1);
        bad_phone.customer_phone = "0".repeat(21);
        assert!(validate_new_sale(&bad_phone).is_err());

        let mut negative_price = sale(1);
        negative_price.unit_price_cents = Some(-1);
        assert!(validate_new_sale(&negative_price).is_err());
    }

    #[test]
    fn test_free_text_sale_needs_item_and_category() {
        let mut input = sale(1);
        input.product_id = None;
        assert!(matches!(
            validate_new_sale(&input),
            Err(ValidationError::Required { .. })
        ));

        input.item_name = Some("Brownie".to_string());
        input.category_id = Some(PRODUCT.to_string());
        assert!(validate_new_sale(&input).is_ok());
    }

    #[test]
    fn test_validate_new_product() {
        let mut input = NewProduct {
            name: "Croissant".to_string(),
            category_id: PRODUCT.to_string(),
            product_type: Default::default(),
            price_cents: 12000,
            stock_quantity: 10,
            min_stock_level: 2,
            is_quick_action: false,
            is_active: true,
        };
        assert!(validate_new_product(&input).is_ok());

        input.stock_quantity = -1;
        assert!(validate_new_product(&input).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("id", PM).is_ok());
        assert!(validate_uuid("id", "").is_err());
        assert!(validate_uuid("id", "123").is_err());
    }
}
