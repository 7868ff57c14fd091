//! # Domain Types
//!
//! Records used throughout Cafe POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│     Product     │◄──│      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name (unique)  │   │  name (unique)  │   │  product_id?    │       │
//! │  │  is_active      │   │  product_type   │   │  item_name      │       │
//! │  └─────────────────┘   │  price_cents    │   │  category_id    │       │
//! │           ▲            │  stock_quantity │   │  quantity       │       │
//! │           └────────────┤  min_stock_level│   │  total_amount   │       │
//! │    (sale snapshot)     └─────────────────┘   └────────┬────────┘       │
//! │                                                       │                │
//! │                        ┌─────────────────┐            │                │
//! │                        │  PaymentMethod  │◄───────────┘                │
//! │                        │  name (unique)  │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A sale copies `item_name` and `category_id` at creation time. Product
//! sales copy them from the product; free-text sales (the older form of the
//! sale screen) supply them directly. Reports group on the snapshot so both
//! kinds aggregate the same way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A menu category (Coffee, Tea, Snacks, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Input for creating a category.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// =============================================================================
// Payment Method
// =============================================================================

/// A way a customer can pay (Cash, Card, Mobile Banking, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Input for creating a payment method.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct NewPaymentMethod {
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// =============================================================================
// Product Type
// =============================================================================

/// Whether selling a product consumes tracked inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Packaged goods with a counted stock (bottled drinks, pastries).
    Stockable,
    /// Made to order; selling never touches stock (espresso, tea).
    #[default]
    NonStockable,
}

impl ProductType {
    /// Returns the stored/serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Stockable => "stockable",
            ProductType::NonStockable => "non_stockable",
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category_id: String,
    /// Joined from `categories` when loaded.
    pub category_name: String,
    pub product_type: ProductType,
    /// Price in cents (smallest currency unit).
    pub price_cents: i64,
    /// Current stock. Only meaningful for stockable products; never negative.
    pub stock_quantity: i64,
    /// Threshold at or below which the product is flagged as low stock.
    pub min_stock_level: i64,
    /// Shown in the Quick Actions strip of the sale screen.
    pub is_quick_action: bool,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn is_stockable(&self) -> bool {
        self.product_type == ProductType::Stockable
    }

    /// Stockable and at or below the minimum stock level.
    pub fn is_low_stock(&self) -> bool {
        self.is_stockable() && self.stock_quantity <= self.min_stock_level
    }

    /// Stockable and nothing left.
    pub fn is_out_of_stock(&self) -> bool {
        self.is_stockable() && self.stock_quantity <= 0
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub category_id: String,
    #[serde(default)]
    pub product_type: ProductType,
    pub price_cents: i64,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub min_stock_level: i64,
    #[serde(default)]
    pub is_quick_action: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: String,
    /// `None` for free-text sales.
    pub product_id: Option<String>,
    /// Product name at time of sale, or the free-text item name.
    pub item_name: String,
    /// Category at time of sale.
    pub category_id: String,
    /// Joined from `categories` when loaded.
    pub category_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// Always `quantity × unit_price_cents`.
    pub total_amount_cents: i64,
    pub payment_method_id: String,
    /// Joined from `payment_methods` when loaded.
    pub payment_method_name: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub notes: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the total amount as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

/// A sale request as submitted by the sale screen.
///
/// Either `product_id` is set (catalog sale) or `item_name` + `category_id`
/// are (free-text sale). A client-supplied total is not accepted; the total
/// is always computed.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct NewSale {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    pub quantity: i64,
    /// Defaults to the product's current price for catalog sales.
    #[serde(default)]
    pub unit_price_cents: Option<i64>,
    pub payment_method_id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub notes: String,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(product_type: ProductType, stock: i64, min: i64) -> Product {
        let now = Utc::now();
        Product {
            id: "p-1".to_string(),
            name: "Croissant".to_string(),
            category_id: "c-1".to_string(),
            category_name: "Snacks".to_string(),
            product_type,
            price_cents: 12000,
            stock_quantity: stock,
            min_stock_level: min,
            is_quick_action: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_low_and_out_of_stock_flags() {
        let p = product(ProductType::Stockable, 5, 2);
        assert!(!p.is_low_stock());
        assert!(!p.is_out_of_stock());

        let p = product(ProductType::Stockable, 2, 2);
        assert!(p.is_low_stock());
        assert!(!p.is_out_of_stock());

        let p = product(ProductType::Stockable, 0, 2);
        assert!(p.is_low_stock());
        assert!(p.is_out_of_stock());
    }

    #[test]
    fn test_non_stockable_never_flagged() {
        let p = product(ProductType::NonStockable, 0, 5);
        assert!(!p.is_low_stock());
        assert!(!p.is_out_of_stock());
    }

    #[test]
    fn test_product_type_serde() {
        assert_eq!(
            serde_json::to_string(&ProductType::NonStockable).unwrap(),
            "\"non_stockable\""
        );
        let parsed: ProductType = serde_json::from_str("\"stockable\"").unwrap();
        assert_eq!(parsed, ProductType::Stockable);
        assert_eq!(ProductType::default(), ProductType::NonStockable);
    }

    #[test]
    fn test_new_product_defaults() {
        let input: NewProduct =
            serde_json::from_str(r#"{"name":"Espresso","category_id":"c-1","price_cents":15000}"#)
                .unwrap();
        assert_eq!(input.product_type, ProductType::NonStockable);
        assert_eq!(input.stock_quantity, 0);
        assert!(input.is_active);
        assert!(!input.is_quick_action);
    }
}
