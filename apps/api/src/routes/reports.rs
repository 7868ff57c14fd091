//! Dashboard aggregates.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::error::ApiResult;
use crate::state::AppState;
use cafe_core::{Dashboard, TodayCount};

/// `GET /api/dashboard-data`
pub async fn dashboard_data(State(state): State<AppState>) -> ApiResult<Json<Dashboard>> {
    let dashboard = state
        .db
        .reports()
        .dashboard(Utc::now(), state.timezone())
        .await?;

    Ok(Json(dashboard))
}

/// `GET /api/today-sales-count`
pub async fn today_sales_count(State(state): State<AppState>) -> ApiResult<Json<TodayCount>> {
    let counter = state
        .db
        .reports()
        .today_count(Utc::now(), state.timezone())
        .await?;

    Ok(Json(counter))
}
