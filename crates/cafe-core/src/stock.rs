//! # Stock Rules
//!
//! Turns a [`NewSale`] request into a [`SalePlan`]: the exact values to
//! persist and how much stock to take.
//!
//! ## Sale Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog sale (product_id set)                                          │
//! │                                                                         │
//! │  product missing?                  → ProductNotFound   (caller)         │
//! │  stockable && stock <= 0?          → OutOfStock                         │
//! │  stockable && qty > stock?         → InsufficientStock{available,req}   │
//! │  otherwise                         → plan: total = qty × unit_price     │
//! │                                       decrement = qty if stockable      │
//! │                                                                         │
//! │  Free-text sale (item_name + category_id)                               │
//! │                                                                         │
//! │  no stock rules                    → plan: total = qty × unit_price     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The database layer applies the plan inside one transaction and guards the
//! decrement with `stock_quantity >= qty`, so a concurrent sale cannot push
//! the count below what was checked here.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{NewSale, Product};

/// Everything needed to write a sale row and adjust stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalePlan {
    pub product_id: Option<String>,
    pub item_name: String,
    pub category_id: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total_amount: Money,
    /// Units to remove from the product's stock, if it is stockable.
    pub stock_decrement: Option<i64>,
}

/// Checks the stock rules for selling `quantity` units of `product`.
///
/// Non-stockable products always pass.
pub fn check_stock(product: &Product, quantity: i64) -> CoreResult<()> {
    if !product.is_stockable() {
        return Ok(());
    }

    if product.stock_quantity <= 0 {
        return Err(CoreError::OutOfStock {
            product: product.name.clone(),
        });
    }

    if quantity > product.stock_quantity {
        return Err(CoreError::InsufficientStock {
            product: product.name.clone(),
            available: product.stock_quantity,
            requested: quantity,
        });
    }

    Ok(())
}

/// Stock after applying a signed restock/adjustment delta, floored at zero.
#[inline]
pub fn adjusted_stock(current: i64, delta: i64) -> i64 {
    current.saturating_add(delta).max(0)
}

/// `quantity × unit_price`, rejected when it does not fit in the cents column.
pub fn sale_total(unit_price: Money, quantity: i64) -> CoreResult<Money> {
    unit_price.checked_multiply_quantity(quantity).ok_or_else(|| {
        ValidationError::OutOfRange {
            field: "total_amount_cents".to_string(),
            min: 0,
            max: i64::MAX,
        }
        .into()
    })
}

/// Plans a sale of a catalog product.
///
/// The unit price defaults to the product's current price.
pub fn plan_catalog_sale(product: &Product, request: &NewSale) -> CoreResult<SalePlan> {
    check_stock(product, request.quantity)?;

    let unit_price = request
        .unit_price_cents
        .map(Money::from_cents)
        .unwrap_or_else(|| product.price());

    Ok(SalePlan {
        product_id: Some(product.id.clone()),
        item_name: product.name.clone(),
        category_id: product.category_id.clone(),
        quantity: request.quantity,
        unit_price,
        total_amount: sale_total(unit_price, request.quantity)?,
        stock_decrement: product.is_stockable().then_some(request.quantity),
    })
}

/// Plans a free-text sale (no catalog product, no stock).
///
/// The caller is responsible for confirming the category exists.
pub fn plan_free_text_sale(request: &NewSale) -> CoreResult<SalePlan> {
    let item_name = request
        .item_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ValidationError::Required {
            field: "item_name".to_string(),
        })?;

    let category_id = request
        .category_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ValidationError::Required {
            field: "category_id".to_string(),
        })?;

    let unit_price = request
        .unit_price_cents
        .map(Money::from_cents)
        .ok_or_else(|| ValidationError::Required {
            field: "unit_price_cents".to_string(),
        })?;

    Ok(SalePlan {
        product_id: None,
        item_name: item_name.to_string(),
        category_id,
        quantity: request.quantity,
        unit_price,
        total_amount: sale_total(unit_price, request.quantity)?,
        stock_decrement: None,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductType;
    use chrono::Utc;

    fn bottled_water(stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: "p-water".to_string(),
            name: "Bottled Water".to_string(),
            category_id: "c-bev".to_string(),
            category_name: "Beverages".to_string(),
            product_type: ProductType::Stockable,
            price_cents: 3000,
            stock_quantity: stock,
            min_stock_level: 2,
            is_quick_action: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn request(quantity: i64) -> NewSale {
        NewSale {
            product_id: Some("p-water".to_string()),
            quantity,
            payment_method_id: "pm-cash".to_string(),
            ..NewSale::default()
        }
    }

    #[test]
    fn test_out_of_stock_rejected() {
        let err = plan_catalog_sale(&bottled_water(0), &request(1)).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { .. }));
    }

    #[test]
    fn test_insufficient_stock_reports_counts() {
        let err = plan_catalog_sale(&bottled_water(3), &request(5)).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, 3);
                assert_eq!(requested, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_selling_entire_stock_is_allowed() {
        let plan = plan_catalog_sale(&bottled_water(5), &request(5)).unwrap();
        assert_eq!(plan.stock_decrement, Some(5));
        assert_eq!(plan.total_amount.cents(), 15000);
        assert_eq!(plan.item_name, "Bottled Water");
        assert_eq!(plan.category_id, "c-bev");
    }

    #[test]
    fn test_unit_price_override() {
        let mut req = request(2);
        req.unit_price_cents = Some(2500);
        let plan = plan_catalog_sale(&bottled_water(10), &req).unwrap();
        assert_eq!(plan.unit_price.cents(), 2500);
        assert_eq!(plan.total_amount.cents(), 5000);
    }

    #[test]
    fn test_non_stockable_ignores_stock() {
        let mut espresso = bottled_water(0);
        espresso.product_type = ProductType::NonStockable;
        let plan = plan_catalog_sale(&espresso, &request(4)).unwrap();
        assert_eq!(plan.stock_decrement, None);
        assert_eq!(plan.total_amount.cents(), 12000);
    }

    #[test]
    fn test_free_text_sale_requires_name_category_and_price() {
        let mut req = NewSale {
            quantity: 2,
            payment_method_id: "pm-cash".to_string(),
            ..NewSale::default()
        };
        assert!(plan_free_text_sale(&req).is_err());

        req.item_name = Some("  Brownie ".to_string());
        req.category_id = Some("c-dessert".to_string());
        assert!(plan_free_text_sale(&req).is_err());

        req.unit_price_cents = Some(9000);
        let plan = plan_free_text_sale(&req).unwrap();
        assert_eq!(plan.item_name, "Brownie");
        assert_eq!(plan.product_id, None);
        assert_eq!(plan.total_amount.cents(), 18000);
    }

    #[test]
    fn test_overflowing_total_is_a_validation_error() {
        let mut req = request(2);
        req.unit_price_cents = Some(i64::MAX / 2 + 1);

        let err = plan_catalog_sale(&bottled_water(10), &req).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { ref field, .. })
                if field == "total_amount_cents"
        ));

        req.product_id = None;
        req.item_name = Some("Gold Leaf Latte".to_string());
        req.category_id = Some("c-bev".to_string());
        assert!(plan_free_text_sale(&req).is_err());
    }

    #[test]
    fn test_adjusted_stock_floors_at_zero() {
        assert_eq!(adjusted_stock(2, 10), 12);
        assert_eq!(adjusted_stock(2, -10), 0);
    }
}
