//! # Report Repository
//!
//! Read-only aggregates over sales for the dashboard.
//!
//! Every figure is computed over a [`ReportWindow`] built in `cafe-core`
//! from "now" and the shop's timezone, so the SQL only ever compares UTC
//! timestamps:
//!
//! ```text
//!   today        = [local 00:00, next local 00:00)
//!   month        = [local 00:00 on the 1st, local 00:00 on next month's 1st)
//!   breakdowns   = GROUP BY snapshot category / payment method
//!                  ORDER BY total DESC, name
//! ```

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::sale::SaleRepository;
use cafe_core::report::local_date;
use cafe_core::{
    Breakdown, Dashboard, ReportWindow, SalesSummary, TodayCount, DASHBOARD_RECENT_LIMIT,
};

/// Repository for report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Count and total of the sales inside `window`.
    pub async fn summary(&self, window: &ReportWindow) -> DbResult<SalesSummary> {
        let summary = sqlx::query_as::<_, SalesSummary>(
            r#"
            SELECT
                COUNT(*) AS count,
                COALESCE(SUM(total_amount_cents), 0) AS total_cents
            FROM sales
            WHERE created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    /// Sales inside `window` grouped by the category snapshot.
    pub async fn by_category(&self, window: &ReportWindow) -> DbResult<Vec<Breakdown>> {
        let rows = sqlx::query_as::<_, Breakdown>(
            r#"
            SELECT
                c.name AS name,
                COALESCE(SUM(s.total_amount_cents), 0) AS total_cents,
                COUNT(s.id) AS count
            FROM sales s
            INNER JOIN categories c ON c.id = s.category_id
            WHERE s.created_at >= ?1 AND s.created_at < ?2
            GROUP BY c.id, c.name
            ORDER BY total_cents DESC, c.name
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Sales inside `window` grouped by payment method.
    pub async fn by_payment_method(&self, window: &ReportWindow) -> DbResult<Vec<Breakdown>> {
        let rows = sqlx::query_as::<_, Breakdown>(
            r#"
            SELECT
                pm.name AS name,
                COALESCE(SUM(s.total_amount_cents), 0) AS total_cents,
                COUNT(s.id) AS count
            FROM sales s
            INNER JOIN payment_methods pm ON pm.id = s.payment_method_id
            WHERE s.created_at >= ?1 AND s.created_at < ?2
            GROUP BY pm.id, pm.name
            ORDER BY total_cents DESC, pm.name
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Builds the dashboard payload for the local day containing `now`.
    pub async fn dashboard(&self, now: DateTime<Utc>, tz: Tz) -> DbResult<Dashboard> {
        let today = ReportWindow::today(now, tz);
        let month = ReportWindow::month_to_date(now, tz);

        debug!(
            today_start = %today.start,
            month_start = %month.start,
            timezone = %tz,
            "Building dashboard"
        );

        let today_summary = self.summary(&today).await?;
        let month_summary = self.summary(&month).await?;
        let recent_sales = SaleRepository::new(self.pool.clone())
            .recent(DASHBOARD_RECENT_LIMIT)
            .await?;

        Ok(Dashboard {
            date: local_date(now, tz).to_string(),
            today_total_cents: today_summary.total_cents,
            today_count: today_summary.count,
            monthly_total_cents: month_summary.total_cents,
            recent_sales,
            category_breakdown: self.by_category(&today).await?,
            payment_breakdown: self.by_payment_method(&today).await?,
        })
    }

    /// Today's count and total for the sale screen header.
    pub async fn today_count(&self, now: DateTime<Utc>, tz: Tz) -> DbResult<TodayCount> {
        let summary = self.summary(&ReportWindow::today(now, tz)).await?;
        Ok(TodayCount::new(local_date(now, tz), summary))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
