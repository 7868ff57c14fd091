//! # Category Repository
//!
//! Menu categories. Names are unique; lists return active categories sorted
//! by name.

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::generate_id;
use cafe_core::validation::validate_new_category;
use cafe_core::{Category, CoreError, NewCategory};

/// Loads a category by ID through any executor (pool or open transaction).
pub(crate) async fn fetch_category<'e, E>(executor: E, id: &str) -> DbResult<Option<Category>>
where
    E: SqliteExecutor<'e>,
{
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, is_active, created_at FROM categories WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(category)
}

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists active categories ordered by name.
    pub async fn list_active(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, is_active, created_at
            FROM categories
            WHERE is_active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        fetch_category(&self.pool, id).await
    }

    /// Finds a category by exact name.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, is_active, created_at FROM categories WHERE name = ?1",
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - The stored category
    /// * `Err(DbError::UniqueViolation)` - Name already taken
    /// * `Err(DbError::Domain)` - Invalid input
    pub async fn insert(&self, input: &NewCategory) -> DbResult<Category> {
        validate_new_category(input).map_err(CoreError::from)?;

        let category = Category {
            id: generate_id(),
            name: input.name.trim().to_string(),
            is_active: input.is_active,
            created_at: Utc::now(),
        };

        debug!(name = %category.name, "Inserting category");

        sqlx::query(
            "INSERT INTO categories (id, name, is_active, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(category.is_active)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&category.name))?;

        Ok(category)
    }

    /// Counts active categories (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE is_active = 1")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
