//! # Routes
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  /api                                                                   │
//! │  ├── /status                         status::status                    │
//! │  ├── /categories                     catalog (GET, POST)               │
//! │  ├── /payment-methods                catalog (GET, POST)               │
//! │  ├── /products ...                   products                          │
//! │  ├── /sales ...                      sales                             │
//! │  ├── /dashboard-data                 reports                           │
//! │  └── /today-sales-count              reports                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod products;
pub mod reports;
pub mod sales;
pub mod status;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Every `/api` route, without the prefix.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/status", get(status::status))
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/payment-methods",
            get(catalog::list_payment_methods).post(catalog::create_payment_method),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/by-category", get(products::products_by_category))
        .route("/products/stockable", get(products::stockable_products))
        .route("/products/non-stockable", get(products::non_stockable_products))
        .route("/products/low-stock", get(products::low_stock_products))
        .route("/products/quick-actions", get(products::quick_action_products))
        .route(
            "/products/{id}",
            get(products::get_product).delete(products::deactivate_product),
        )
        .route("/products/{id}/stock", post(products::adjust_stock))
        .route("/sales", get(sales::list_sales).post(sales::create_sale))
        .route("/sales/today", get(sales::today_sales))
        .route("/sales/monthly", get(sales::monthly_sales))
        .route("/sales/recent", get(sales::recent_sales))
        .route("/sales/{id}", get(sales::get_sale))
        .route("/dashboard-data", get(reports::dashboard_data))
        .route("/today-sales-count", get(reports::today_sales_count))
}
