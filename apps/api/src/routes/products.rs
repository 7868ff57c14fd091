//! # Product Routes
//!
//! ## Endpoints
//! ```text
//! GET    /api/products                      all active products
//! POST   /api/products                      create
//! GET    /api/products/by-category?category_id=
//! GET    /api/products/stockable
//! GET    /api/products/non-stockable
//! GET    /api/products/low-stock            stockable, stock <= min level
//! GET    /api/products/quick-actions        sale screen shortcuts
//! GET    /api/products/{id}
//! DELETE /api/products/{id}                 deactivate (soft delete)
//! POST   /api/products/{id}/stock           { "delta": n }
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use cafe_core::{NewProduct, Product, ProductType};
use cafe_db::ProductFilter;

/// Product as returned to the browser, with the derived stock flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub category_name: String,
    pub product_type: ProductType,
    pub price_cents: i64,
    pub stock_quantity: i64,
    pub min_stock_level: i64,
    pub is_quick_action: bool,
    pub is_active: bool,
    /// Stockable and at or below the minimum level.
    pub is_low_stock: bool,
    /// Stockable and nothing left; the sale screen disables the item.
    pub is_out_of_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            is_low_stock: p.is_low_stock(),
            is_out_of_stock: p.is_out_of_stock(),
            id: p.id,
            name: p.name,
            category_id: p.category_id,
            category_name: p.category_name,
            product_type: p.product_type,
            price_cents: p.price_cents,
            stock_quantity: p.stock_quantity,
            min_stock_level: p.min_stock_level,
            is_quick_action: p.is_quick_action,
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StockAdjustment {
    /// Units to add (negative to remove).
    pub delta: i64,
}

async fn list_filtered(state: &AppState, filter: ProductFilter) -> ApiResult<Json<Vec<ProductDto>>> {
    let products = state.db.products().list(filter).await?;
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

/// `GET /api/products`
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductDto>>> {
    list_filtered(&state, ProductFilter::All).await
}

/// `GET /api/products/by-category?category_id=`
pub async fn products_by_category(
    State(state): State<AppState>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ProductDto>>> {
    let Query(query) = query?;
    list_filtered(&state, ProductFilter::ByCategory(query.category_id)).await
}

/// `GET /api/products/stockable`
pub async fn stockable_products(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductDto>>> {
    list_filtered(&state, ProductFilter::Stockable).await
}

/// `GET /api/products/non-stockable`
pub async fn non_stockable_products(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProductDto>>> {
    list_filtered(&state, ProductFilter::NonStockable).await
}

/// `GET /api/products/low-stock`
pub async fn low_stock_products(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductDto>>> {
    list_filtered(&state, ProductFilter::LowStock).await
}

/// `GET /api/products/quick-actions`
pub async fn quick_action_products(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProductDto>>> {
    list_filtered(&state, ProductFilter::QuickActions).await
}

/// `POST /api/products`
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProductDto>)> {
    let Json(input) = payload?;

    let product = state.db.products().insert(&input).await?;
    info!(id = %product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// `GET /api/products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ProductDto>> {
    let Path(id) = path?;

    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;

    Ok(Json(product.into()))
}

/// `DELETE /api/products/{id}`
pub async fn deactivate_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;

    state.db.products().deactivate(&id).await?;
    info!(id = %id, "Product deactivated");

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/products/{id}/stock`
pub async fn adjust_stock(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<StockAdjustment>, JsonRejection>,
) -> ApiResult<Json<ProductDto>> {
    let Path(id) = path?;
    let Json(adjustment) = payload?;

    let product = state.db.products().adjust_stock(&id, adjustment.delta).await?;
    info!(
        id = %product.id,
        delta = adjustment.delta,
        stock = product.stock_quantity,
        "Stock adjusted"
    );

    Ok(Json(product.into()))
}
