//! # Repository Module
//!
//! Database repository implementations for Cafe POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().list(ProductFilter::LowStock)                   │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self, filter)                                               │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, input)                                              │
//! │  └── adjust_stock(&self, id, delta)                                    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups that the sale transaction also needs are written as free
//! functions over [`sqlx::SqliteExecutor`], so they run against either the
//! pool or an open transaction.
//!
//! ## Available Repositories
//!
//! - [`category::CategoryRepository`] - Menu categories
//! - [`payment_method::PaymentMethodRepository`] - Payment methods
//! - [`product::ProductRepository`] - Products, filters and stock
//! - [`sale::SaleRepository`] - Sale recording and listing
//! - [`report::ReportRepository`] - Dashboard aggregates

pub mod category;
pub mod payment_method;
pub mod product;
pub mod report;
pub mod sale;

/// Generates a new record ID.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Fixtures shared by the repository tests.

    use cafe_core::{
        Category, NewCategory, NewPaymentMethod, NewProduct, PaymentMethod, Product, ProductType,
    };

    use crate::{Database, DbConfig};

    pub async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub async fn category(db: &Database, name: &str) -> Category {
        db.categories()
            .insert(&NewCategory {
                name: name.to_string(),
                is_active: true,
            })
            .await
            .unwrap()
    }

    pub async fn payment_method(db: &Database, name: &str) -> PaymentMethod {
        db.payment_methods()
            .insert(&NewPaymentMethod {
                name: name.to_string(),
                is_active: true,
            })
            .await
            .unwrap()
    }

    pub async fn stockable(
        db: &Database,
        category: &Category,
        name: &str,
        price_cents: i64,
        stock: i64,
        min: i64,
    ) -> Product {
        db.products()
            .insert(&NewProduct {
                name: name.to_string(),
                category_id: category.id.clone(),
                product_type: ProductType::Stockable,
                price_cents,
                stock_quantity: stock,
                min_stock_level: min,
                is_quick_action: false,
                is_active: true,
            })
            .await
            .unwrap()
    }

    pub async fn made_to_order(
        db: &Database,
        category: &Category,
        name: &str,
        price_cents: i64,
    ) -> Product {
        db.products()
            .insert(&NewProduct {
                name: name.to_string(),
                category_id: category.id.clone(),
                product_type: ProductType::NonStockable,
                price_cents,
                stock_quantity: 0,
                min_stock_level: 0,
                is_quick_action: true,
                is_active: true,
            })
            .await
            .unwrap()
    }
}
