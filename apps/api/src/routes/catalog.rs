//! # Catalog Routes
//!
//! Categories and payment methods: list the active ones, create new ones.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;
use cafe_core::{Category, NewCategory, NewPaymentMethod, PaymentMethod};

/// `GET /api/categories`
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.categories().list_active().await?))
}

/// `POST /api/categories`
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(input) = payload?;

    let category = state.db.categories().insert(&input).await?;
    info!(id = %category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// `GET /api/payment-methods`
pub async fn list_payment_methods(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PaymentMethod>>> {
    Ok(Json(state.db.payment_methods().list_active().await?))
}

/// `POST /api/payment-methods`
pub async fn create_payment_method(
    State(state): State<AppState>,
    payload: Result<Json<NewPaymentMethod>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PaymentMethod>)> {
    let Json(input) = payload?;

    let method = state.db.payment_methods().insert(&input).await?;
    info!(id = %method.id, name = %method.name, "Payment method created");

    Ok((StatusCode::CREATED, Json(method)))
}
