//! # Sale Repository
//!
//! Records sales and lists them back.
//!
//! ## Sale Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create(NewSale) - one transaction                    │
//! │                                                                         │
//! │  validate_new_sale          quantity, ids, field lengths               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN IMMEDIATE            write lock first; racers queue here        │
//! │       │                                                                 │
//! │       ├── product_id?  load product ── missing → ProductNotFound       │
//! │       │                plan_catalog_sale ── OutOfStock / Insufficient  │
//! │       │                                                                 │
//! │       └── free text    plan_free_text_sale, category must be active    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  payment method must exist                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT INTO sales (total = qty × unit_price)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UPDATE products SET stock = stock - qty                               │
//! │    WHERE id = ? AND stock >= qty   ── 0 rows → InsufficientStock       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT                     (any error before this rolls back)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales are immutable: there is no update path, and deletion exists only
//! for reseeding a development database.

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::category::fetch_category;
use crate::repository::generate_id;
use crate::repository::payment_method::fetch_payment_method;
use crate::repository::product::fetch_product;
use cafe_core::stock::{plan_catalog_sale, plan_free_text_sale, SalePlan};
use cafe_core::validation::validate_new_sale;
use cafe_core::{CoreError, NewSale, ReportWindow, Sale};

/// Columns of [`Sale`], with category and payment method names joined in.
const SALE_SELECT: &str = r#"
    SELECT
        s.id,
        s.product_id,
        s.item_name,
        s.category_id,
        c.name AS category_name,
        s.quantity,
        s.unit_price_cents,
        s.total_amount_cents,
        s.payment_method_id,
        pm.name AS payment_method_name,
        s.customer_name,
        s.customer_phone,
        s.notes,
        s.created_at
    FROM sales s
    INNER JOIN categories c ON c.id = s.category_id
    INNER JOIN payment_methods pm ON pm.id = s.payment_method_id
"#;

const NEWEST_FIRST: &str = "ORDER BY s.created_at DESC, s.rowid DESC";

async fn fetch_sale<'e, E>(executor: E, id: &str) -> DbResult<Option<Sale>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{SALE_SELECT} WHERE s.id = ?1");

    let sale = sqlx::query_as::<_, Sale>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(sale)
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale stamped with the current time.
    ///
    /// ## Returns
    /// * `Ok(Sale)` - The stored sale, with joined names
    /// * `Err(DbError::Domain(..))` - Validation or stock rule failed; nothing
    ///   was written
    pub async fn create(&self, request: &NewSale) -> DbResult<Sale> {
        self.create_at(request, Utc::now()).await
    }

    /// Records a sale stamped with `created_at`.
    ///
    /// Used by the seeder to backdate sample sales.
    pub async fn create_at(&self, request: &NewSale, created_at: DateTime<Utc>) -> DbResult<Sale> {
        validate_new_sale(request).map_err(CoreError::from)?;

        // Reading before taking the write lock would let a concurrent sale
        // fail with SQLITE_BUSY instead of a stock error.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let plan = match &request.product_id {
            Some(product_id) => {
                let product = fetch_product(&mut *tx, product_id)
                    .await?
                    .filter(|p| p.is_active)
                    .ok_or_else(|| CoreError::ProductNotFound(product_id.clone()))?;

                plan_catalog_sale(&product, request)?
            }
            None => {
                let plan = plan_free_text_sale(request)?;

                let category = fetch_category(&mut *tx, &plan.category_id)
                    .await?
                    .filter(|c| c.is_active);
                if category.is_none() {
                    return Err(CoreError::CategoryNotFound(plan.category_id).into());
                }

                plan
            }
        };

        fetch_payment_method(&mut *tx, &request.payment_method_id)
            .await?
            .filter(|m| m.is_active)
            .ok_or_else(|| CoreError::PaymentMethodNotFound(request.payment_method_id.clone()))?;

        let id = generate_id();
        debug!(id = %id, item = %plan.item_name, quantity = plan.quantity, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, product_id, item_name, category_id,
                quantity, unit_price_cents, total_amount_cents,
                payment_method_id, customer_name, customer_phone, notes,
                created_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7,
                ?8, ?9, ?10, ?11,
                ?12
            )
            "#,
        )
        .bind(&id)
        .bind(&plan.product_id)
        .bind(&plan.item_name)
        .bind(&plan.category_id)
        .bind(plan.quantity)
        .bind(plan.unit_price.cents())
        .bind(plan.total_amount.cents())
        .bind(&request.payment_method_id)
        .bind(request.customer_name.trim())
        .bind(request.customer_phone.trim())
        .bind(request.notes.trim())
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        if let Some(quantity) = plan.stock_decrement {
            take_stock(&mut tx, &plan, quantity).await?;
        }

        let sale = fetch_sale(&mut *tx, &id)
            .await?
            .ok_or_else(|| DbError::Internal(format!("sale {id} missing after insert")))?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            id = %sale.id,
            item = %sale.item_name,
            quantity = sale.quantity,
            total = %sale.total_amount(),
            "Sale recorded"
        );

        Ok(sale)
    }

    /// Gets a sale by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        fetch_sale(&self.pool, id).await
    }

    /// Lists every sale, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let sql = format!("{SALE_SELECT} {NEWEST_FIRST}");

        let sales = sqlx::query_as::<_, Sale>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Lists the sales inside `window`, newest first.
    pub async fn list_between(&self, window: &ReportWindow) -> DbResult<Vec<Sale>> {
        debug!(start = %window.start, end = %window.end, "Listing sales in window");

        let sql = format!(
            "{SALE_SELECT} WHERE s.created_at >= ?1 AND s.created_at < ?2 {NEWEST_FIRST}"
        );

        let sales = sqlx::query_as::<_, Sale>(&sql)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// The `limit` newest sales.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sql = format!("{SALE_SELECT} {NEWEST_FIRST} LIMIT ?1");

        let sales = sqlx::query_as::<_, Sale>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Deletes every sale. Only the seeder's `--reset` calls this.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM sales").execute(&self.pool).await?;

        warn!(deleted = result.rows_affected(), "Deleted all sales");
        Ok(result.rows_affected())
    }

    /// Counts all sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Removes `quantity` units of the planned product inside the sale
/// transaction.
///
/// The `stock_quantity >= quantity` guard makes the check-then-write atomic:
/// if another sale took the stock after the plan was made, no row matches
/// and the sale fails instead of overselling.
async fn take_stock(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    plan: &SalePlan,
    quantity: i64,
) -> DbResult<()> {
    let product_id = plan
        .product_id
        .as_deref()
        .ok_or_else(|| DbError::Internal("stock decrement without a product".to_string()))?;

    let result = sqlx::query(
        r#"
        UPDATE products
        SET
            stock_quantity = MAX(stock_quantity - ?2, 0),
            updated_at = ?3
        WHERE id = ?1 AND stock_quantity >= ?2
        "#,
    )
    .bind(product_id)
    .bind(quantity)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        let available: i64 =
            sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = ?1")
                .bind(product_id)
                .fetch_one(&mut **tx)
                .await?;

        warn!(
            product_id = %product_id,
            available,
            requested = quantity,
            "Stock changed during sale"
        );

        return Err(CoreError::InsufficientStock {
            product: plan.item_name.clone(),
            available,
            requested: quantity,
        }
        .into());
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
