//! # Payment Method Repository
//!
//! Payment methods (Cash, Card, Mobile Banking, ...). Lists keep creation
//! order so the sale screen shows them the way the shop set them up.

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::generate_id;
use cafe_core::validation::validate_new_payment_method;
use cafe_core::{CoreError, NewPaymentMethod, PaymentMethod};

/// Loads a payment method by ID through any executor.
pub(crate) async fn fetch_payment_method<'e, E>(
    executor: E,
    id: &str,
) -> DbResult<Option<PaymentMethod>>
where
    E: SqliteExecutor<'e>,
{
    let method = sqlx::query_as::<_, PaymentMethod>(
        "SELECT id, name, is_active, created_at FROM payment_methods WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(method)
}

/// Repository for payment method database operations.
#[derive(Debug, Clone)]
pub struct PaymentMethodRepository {
    pool: SqlitePool,
}

impl PaymentMethodRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PaymentMethodRepository { pool }
    }

    /// Lists active payment methods in creation order.
    pub async fn list_active(&self) -> DbResult<Vec<PaymentMethod>> {
        let methods = sqlx::query_as::<_, PaymentMethod>(
            r#"
            SELECT id, name, is_active, created_at
            FROM payment_methods
            WHERE is_active = 1
            ORDER BY created_at, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(methods)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<PaymentMethod>> {
        fetch_payment_method(&self.pool, id).await
    }

    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<PaymentMethod>> {
        let method = sqlx::query_as::<_, PaymentMethod>(
            "SELECT id, name, is_active, created_at FROM payment_methods WHERE name = ?1",
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(method)
    }

    /// Inserts a new payment method. Duplicate names are rejected.
    pub async fn insert(&self, input: &NewPaymentMethod) -> DbResult<PaymentMethod> {
        validate_new_payment_method(input).map_err(CoreError::from)?;

        let method = PaymentMethod {
            id: generate_id(),
            name: input.name.trim().to_string(),
            is_active: input.is_active,
            created_at: Utc::now(),
        };

        debug!(name = %method.name, "Inserting payment method");

        sqlx::query(
            "INSERT INTO payment_methods (id, name, is_active, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&method.id)
        .bind(&method.name)
        .bind(method.is_active)
        .bind(method.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&method.name))?;

        Ok(method)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM payment_methods WHERE is_active = 1")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support;

    #[tokio::test]
    async fn test_list_keeps_creation_order() {
        let db = test_support::db().await;
        for name in ["Cash", "Mobile Banking", "Card"] {
            test_support::payment_method(&db, name).await;
        }

        let names: Vec<String> = db
            .payment_methods()
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();

        assert_eq!(names, vec!["Cash", "Mobile Banking", "Card"]);
    }

    #[tokio::test]
    async fn test_duplicate_rejected() {
        let db = test_support::db().await;
        test_support::payment_method(&db, "Cash").await;

        let err = db
            .payment_methods()
            .insert(&NewPaymentMethod {
                name: "Cash".to_string(),
                is_active: true,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(db.payment_methods().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_name_trims() {
        let db = test_support::db().await;
        let card = test_support::payment_method(&db, "Card").await;

        let found = db.payment_methods().find_by_name(" Card ").await.unwrap();
        assert_eq!(found.map(|m| m.id), Some(card.id));
    }
}
