//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Filtered listing (category, product type, low stock, quick actions)
//! - Insert with category check
//! - Restock / stock adjustment
//! - Soft delete
//!
//! ## Filters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductFilter          WHERE (always AND p.is_active = 1)             │
//! │  ─────────────          ─────────────────────────────────              │
//! │  All                    (none)                                         │
//! │  ByCategory(id)         p.category_id = ?                              │
//! │  Stockable              p.product_type = 'stockable'                   │
//! │  NonStockable           p.product_type = 'non_stockable'               │
//! │  LowStock               stockable AND stock_quantity <= min_stock_level│
//! │  QuickActions           p.is_quick_action = 1                          │
//! │                                                                         │
//! │  ORDER BY category name, product name                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::category::fetch_category;
use crate::repository::generate_id;
use cafe_core::stock::adjusted_stock;
use cafe_core::validation::validate_new_product;
use cafe_core::{CoreError, NewProduct, Product};

/// Columns of [`Product`], with the category name joined in.
const PRODUCT_SELECT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.category_id,
        c.name AS category_name,
        p.product_type,
        p.price_cents,
        p.stock_quantity,
        p.min_stock_level,
        p.is_quick_action,
        p.is_active,
        p.created_at,
        p.updated_at
    FROM products p
    INNER JOIN categories c ON c.id = p.category_id
"#;

/// Loads a product by ID through any executor (pool or open transaction).
pub(crate) async fn fetch_product<'e, E>(executor: E, id: &str) -> DbResult<Option<Product>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{PRODUCT_SELECT} WHERE p.id = ?1");

    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(product)
}

/// Which active products a listing should return.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductFilter {
    #[default]
    All,
    ByCategory(String),
    Stockable,
    NonStockable,
    /// Stockable products at or below their minimum stock level.
    LowStock,
    QuickActions,
}

impl ProductFilter {
    fn where_clause(&self) -> &'static str {
        match self {
            ProductFilter::All => "WHERE p.is_active = 1",
            ProductFilter::ByCategory(_) => "WHERE p.is_active = 1 AND p.category_id = ?1",
            ProductFilter::Stockable => "WHERE p.is_active = 1 AND p.product_type = 'stockable'",
            ProductFilter::NonStockable => {
                "WHERE p.is_active = 1 AND p.product_type = 'non_stockable'"
            }
            ProductFilter::LowStock => {
                "WHERE p.is_active = 1 AND p.product_type = 'stockable' \
                 AND p.stock_quantity <= p.min_stock_level"
            }
            ProductFilter::QuickActions => "WHERE p.is_active = 1 AND p.is_quick_action = 1",
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let snacks = repo.list(ProductFilter::ByCategory(snacks_id)).await?;
/// let restocked = repo.adjust_stock(&croissant_id, 12).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists active products matching `filter`, ordered by category name
    /// then product name.
    pub async fn list(&self, filter: ProductFilter) -> DbResult<Vec<Product>> {
        debug!(?filter, "Listing products");

        let sql = format!(
            "{PRODUCT_SELECT} {} ORDER BY c.name, p.name",
            filter.where_clause()
        );

        let mut query = sqlx::query_as::<_, Product>(&sql);
        if let ProductFilter::ByCategory(category_id) = &filter {
            query = query.bind(category_id.clone());
        }

        let products = query.fetch_all(&self.pool).await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID, active or not.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        fetch_product(&self.pool, id).await
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Stored product with its category name
    /// * `Err(DbError::Domain(CategoryNotFound))` - Unknown category
    /// * `Err(DbError::UniqueViolation)` - Name already exists
    pub async fn insert(&self, input: &NewProduct) -> DbResult<Product> {
        validate_new_product(input).map_err(CoreError::from)?;

        let category = fetch_category(&self.pool, &input.category_id)
            .await?
            .ok_or_else(|| CoreError::CategoryNotFound(input.category_id.clone()))?;

        let now = Utc::now();
        let product = Product {
            id: generate_id(),
            name: input.name.trim().to_string(),
            category_id: category.id,
            category_name: category.name,
            product_type: input.product_type,
            price_cents: input.price_cents,
            stock_quantity: input.stock_quantity,
            min_stock_level: input.min_stock_level,
            is_quick_action: input.is_quick_action,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };

        debug!(name = %product.name, product_type = product.product_type.as_str(), "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, category_id, product_type,
                price_cents, stock_quantity, min_stock_level,
                is_quick_action, is_active, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7,
                ?8, ?9, ?10, ?11
            )
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category_id)
        .bind(product.product_type)
        .bind(product.price_cents)
        .bind(product.stock_quantity)
        .bind(product.min_stock_level)
        .bind(product.is_quick_action)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&product.name))?;

        Ok(product)
    }

    /// Adjusts a product's stock by a signed delta (positive to restock,
    /// negative for wastage or a recount), clamped at zero.
    ///
    /// Non-stockable products are returned unchanged.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product after the adjustment
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> DbResult<Product> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let mut tx = self.pool.begin().await?;

        let product = fetch_product(&mut *tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        if !product.is_stockable() {
            tx.rollback().await?;
            return Ok(product);
        }

        let new_stock = adjusted_stock(product.stock_quantity, delta);
        let now = Utc::now();

        sqlx::query("UPDATE products SET stock_quantity = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(new_stock)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(Product {
            stock_quantity: new_stock,
            updated_at: now,
            ..product
        })
    }

    /// Soft-deletes a product by setting is_active = false.
    ///
    /// Historical sales keep referencing it.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deactivating product");

        let result =
            sqlx::query("UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1")
                .bind(id)
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support;
    use cafe_core::ProductType;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_filters() {
        let db = test_support::db().await;
        let coffee = test_support::category(&db, "Coffee").await;
        let snacks = test_support::category(&db, "Snacks").await;

        test_support::made_to_order(&db, &coffee, "Latte", 22000).await;
        test_support::made_to_order(&db, &coffee, "Espresso", 15000).await;
        test_support::stockable(&db, &snacks, "Croissant", 12000, 5, 2).await;
        test_support::stockable(&db, &snacks, "Brownie", 9000, 1, 3).await;

        let repo = db.products();

        let all = repo.list(ProductFilter::All).await.unwrap();
        assert_eq!(names(&all), vec!["Espresso", "Latte", "Brownie", "Croissant"]);
        assert_eq!(all[0].category_name, "Coffee");

        let by_cat = repo
            .list(ProductFilter::ByCategory(snacks.id.clone()))
            .await
            .unwrap();
        assert_eq!(names(&by_cat), vec!["Brownie", "Croissant"]);

        let stockable = repo.list(ProductFilter::Stockable).await.unwrap();
        assert!(stockable.iter().all(|p| p.product_type == ProductType::Stockable));
        assert_eq!(stockable.len(), 2);

        let non_stockable = repo.list(ProductFilter::NonStockable).await.unwrap();
        assert_eq!(names(&non_stockable), vec!["Espresso", "Latte"]);

        let low = repo.list(ProductFilter::LowStock).await.unwrap();
        assert_eq!(names(&low), vec!["Brownie"]);

        let quick = repo.list(ProductFilter::QuickActions).await.unwrap();
        assert_eq!(names(&quick), vec!["Espresso", "Latte"]);
    }

    #[tokio::test]
    async fn test_insert_unknown_category() {
        let db = test_support::db().await;

        let err = db
            .products()
            .insert(&NewProduct {
                name: "Mocha".to_string(),
                category_id: generate_id(),
                product_type: ProductType::NonStockable,
                price_cents: 25000,
                stock_quantity: 0,
                min_stock_level: 0,
                is_quick_action: false,
                is_active: true,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Domain(CoreError::CategoryNotFound(_))));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_product_name() {
        let db = test_support::db().await;
        let coffee = test_support::category(&db, "Coffee").await;
        test_support::made_to_order(&db, &coffee, "Latte", 22000).await;

        let err = db
            .products()
            .insert(&NewProduct {
                name: "Latte".to_string(),
                category_id: coffee.id.clone(),
                product_type: ProductType::NonStockable,
                price_cents: 1,
                stock_quantity: 0,
                min_stock_level: 0,
                is_quick_action: false,
                is_active: true,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_adjust_stock_clamps_at_zero() {
        let db = test_support::db().await;
        let snacks = test_support::category(&db, "Snacks").await;
        let croissant = test_support::stockable(&db, &snacks, "Croissant", 12000, 5, 2).await;

        let restocked = db.products().adjust_stock(&croissant.id, 10).await.unwrap();
        assert_eq!(restocked.stock_quantity, 15);

        let drained = db.products().adjust_stock(&croissant.id, -100).await.unwrap();
        assert_eq!(drained.stock_quantity, 0);

        let stored = db.products().get_by_id(&croissant.id).await.unwrap().unwrap();
        assert_eq!(stored.stock_quantity, 0);
        assert!(stored.is_out_of_stock());
    }

    #[tokio::test]
    async fn test_adjust_stock_ignores_non_stockable() {
        let db = test_support::db().await;
        let coffee = test_support::category(&db, "Coffee").await;
        let latte = test_support::made_to_order(&db, &coffee, "Latte", 22000).await;

        let after = db.products().adjust_stock(&latte.id, 7).await.unwrap();
        assert_eq!(after.stock_quantity, 0);

        let err = db.products().adjust_stock("missing", 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_deactivate_hides_from_lists() {
        let db = test_support::db().await;
        let coffee = test_support::category(&db, "Coffee").await;
        let latte = test_support::made_to_order(&db, &coffee, "Latte", 22000).await;

        db.products().deactivate(&latte.id).await.unwrap();

        assert!(db.products().list(ProductFilter::All).await.unwrap().is_empty());
        let stored = db.products().get_by_id(&latte.id).await.unwrap().unwrap();
        assert!(!stored.is_active);

        let err = db.products().deactivate("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
