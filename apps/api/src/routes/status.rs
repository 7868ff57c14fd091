//! Service status.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub shop_name: String,
    pub timezone: String,
    pub database: bool,
    pub counts: RowCounts,
}

#[derive(Debug, Serialize)]
pub struct RowCounts {
    pub categories: i64,
    pub payment_methods: i64,
    pub products: i64,
    pub sales: i64,
}

/// `GET /api/status`
pub async fn status(State(state): State<AppState>) -> ApiResult<Json<StatusResponse>> {
    let db = &state.db;

    let counts = RowCounts {
        categories: db.categories().count().await?,
        payment_methods: db.payment_methods().count().await?,
        products: db.products().count().await?,
        sales: db.sales().count().await?,
    };

    Ok(Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        shop_name: state.config.shop_name.clone(),
        timezone: state.timezone().name().to_string(),
        database: db.health_check().await,
        counts,
    }))
}
