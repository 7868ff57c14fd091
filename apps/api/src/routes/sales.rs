//! # Sale Routes
//!
//! Recording a sale is the one write on the hot path; everything else here
//! lists sales back for the sale screen and the history pages.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use cafe_core::{NewSale, ReportWindow, Sale, RECENT_SALES_LIMIT};

/// `POST /api/sales`
///
/// Returns 201 with the stored sale, or a 400 explaining which rule failed
/// (validation, unknown product/payment method, out of stock, insufficient
/// stock). Nothing is written on failure.
pub async fn create_sale(
    State(state): State<AppState>,
    payload: Result<Json<NewSale>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Sale>)> {
    let Json(request) = payload?;

    let sale = state.db.sales().create(&request).await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

/// `GET /api/sales`
pub async fn list_sales(State(state): State<AppState>) -> ApiResult<Json<Vec<Sale>>> {
    Ok(Json(state.db.sales().list_all().await?))
}

/// `GET /api/sales/today`
pub async fn today_sales(State(state): State<AppState>) -> ApiResult<Json<Vec<Sale>>> {
    let window = ReportWindow::today(Utc::now(), state.timezone());
    Ok(Json(state.db.sales().list_between(&window).await?))
}

/// `GET /api/sales/monthly`
pub async fn monthly_sales(State(state): State<AppState>) -> ApiResult<Json<Vec<Sale>>> {
    let window = ReportWindow::month_to_date(Utc::now(), state.timezone());
    Ok(Json(state.db.sales().list_between(&window).await?))
}

/// `GET /api/sales/recent`
pub async fn recent_sales(State(state): State<AppState>) -> ApiResult<Json<Vec<Sale>>> {
    Ok(Json(state.db.sales().recent(RECENT_SALES_LIMIT).await?))
}

/// `GET /api/sales/{id}`
pub async fn get_sale(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Sale>> {
    let Path(id) = path?;

    let sale = state
        .db
        .sales()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale", &id))?;

    Ok(Json(sale))
}
