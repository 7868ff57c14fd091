//! # cafe-api: HTTP JSON server for Cafe POS
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Lifecycle                               │
//! │                                                                         │
//! │  POST /api/sales {"product_id": "...", "quantity": 2, ...}             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TraceLayer ── span per request (method, uri, status, latency)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  routes::sales::create_sale(State<AppState>, Json<NewSale>)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  state.db.sales().create(&request)   ← one SQLite transaction          │
//! │       │                                                                 │
//! │       ├── Ok(Sale)      → 201 + JSON                                   │
//! │       └── Err(DbError)  → ApiError → 4xx/5xx + {"code","error"}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `CAFE_HOST` - Interface to bind (default: 0.0.0.0)
//! - `CAFE_PORT` - HTTP port (default: 8000)
//! - `CAFE_DATABASE_PATH` - SQLite file (default: ./cafe.db)
//! - `CAFE_DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `CAFE_TIMEZONE` - Reporting timezone (default: Asia/Dhaka)
//! - `CAFE_SHOP_NAME` - Display name (default: Coffee Shop)
//! - `RUST_LOG` - Log filter (default: info)

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// HTTP Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cafe_db::{Database, DbConfig};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        app(AppState::new(db, ApiConfig::default()))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, "POST", uri, Some(body)).await
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, "GET", uri, None).await
    }

    /// Creates a category, a payment method and a stockable product.
    /// Returns (product_id, payment_method_id).
    async fn stocked_croissant(app: &Router, stock: i64, min: i64) -> (String, String) {
        let (_, category) = post(app, "/api/categories", json!({"name": "Snacks"})).await;
        let (_, method) = post(app, "/api/payment-methods", json!({"name": "Cash"})).await;
        let (status, product) = post(
            app,
            "/api/products",
            json!({
                "name": "Croissant",
                "category_id": category["id"],
                "product_type": "stockable",
                "price_cents": 12000,
                "stock_quantity": stock,
                "min_stock_level": min,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        (
            product["id"].as_str().unwrap().to_string(),
            method["id"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_status() {
        let app = test_app().await;

        let (status, body) = get(&app, "/api/status").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], true);
        assert_eq!(body["timezone"], "Asia/Dhaka");
        assert_eq!(body["counts"]["sales"], 0);
    }

    #[tokio::test]
    async fn test_selling_out_a_product() {
        let app = test_app().await;
        let (product_id, method_id) = stocked_croissant(&app, 5, 2).await;

        let (status, sale) = post(
            &app,
            "/api/sales",
            json!({"product_id": product_id, "quantity": 5, "payment_method_id": method_id}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(sale["total_amount_cents"], 60000);
        assert_eq!(sale["category_name"], "Snacks");
        assert_eq!(sale["payment_method_name"], "Cash");

        let (_, product) = get(&app, &format!("/api/products/{product_id}")).await;
        assert_eq!(product["stock_quantity"], 0);
        assert_eq!(product["is_out_of_stock"], true);
        assert_eq!(product["is_low_stock"], true);

        let (status, err) = post(
            &app,
            "/api/sales",
            json!({"product_id": product_id, "quantity": 1, "payment_method_id": method_id}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "OUT_OF_STOCK");

        let (_, sales) = get(&app, "/api/sales").await;
        assert_eq!(sales.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insufficient_stock_message() {
        let app = test_app().await;
        let (product_id, method_id) = stocked_croissant(&app, 2, 1).await;

        let (status, err) = post(
            &app,
            "/api/sales",
            json!({"product_id": product_id, "quantity": 3, "payment_method_id": method_id}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "INSUFFICIENT_STOCK");
        let message = err["error"].as_str().unwrap();
        assert!(message.contains("available 2"), "{message}");
        assert!(message.contains("requested 3"), "{message}");
    }

    #[tokio::test]
    async fn test_client_errors() {
        let app = test_app().await;
        let (_, method_id) = stocked_croissant(&app, 5, 1).await;

        let unknown = "550e8400-e29b-41d4-a716-446655440000";
        let (status, err) = post(
            &app,
            "/api/sales",
            json!({"product_id": unknown, "quantity": 1, "payment_method_id": method_id}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "INVALID_REFERENCE");

        let (status, err) = get(&app, &format!("/api/products/{unknown}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err["code"], "NOT_FOUND");

        let (status, err) = post(&app, "/api/categories", json!({"name": "Snacks"})).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(err["code"], "CONFLICT");

        let (status, err) = post(&app, "/api/sales", json!({"quantity": "two"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "VALIDATION_ERROR");

        let (status, err) = get(&app, "/api/products/by-category").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "VALIDATION_ERROR");

        let (status, err) = get(&app, "/api/sales/%FF").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_overflowing_sale_total_is_rejected() {
        let app = test_app().await;
        let (product_id, method_id) = stocked_croissant(&app, 5, 1).await;

        let (status, err) = post(
            &app,
            "/api/sales",
            json!({
                "product_id": product_id,
                "quantity": 2,
                "unit_price_cents": i64::MAX / 2 + 1,
                "payment_method_id": method_id,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "VALIDATION_ERROR");

        let (_, product) = get(&app, &format!("/api/products/{product_id}")).await;
        assert_eq!(product["stock_quantity"], 5);
    }

    #[tokio::test]
    async fn test_product_filters_and_restock() {
        let app = test_app().await;
        let (product_id, _) = stocked_croissant(&app, 1, 3).await;

        let (_, low) = get(&app, "/api/products/low-stock").await;
        assert_eq!(low.as_array().unwrap().len(), 1);

        let (status, restocked) = post(
            &app,
            &format!("/api/products/{product_id}/stock"),
            json!({"delta": 10}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(restocked["stock_quantity"], 11);
        assert_eq!(restocked["is_low_stock"], false);

        let (_, low) = get(&app, "/api/products/low-stock").await;
        assert!(low.as_array().unwrap().is_empty());

        let (_, stockable) = get(&app, "/api/products/stockable").await;
        assert_eq!(stockable.as_array().unwrap().len(), 1);
        let (_, non_stockable) = get(&app, "/api/products/non-stockable").await;
        assert!(non_stockable.as_array().unwrap().is_empty());

        let (status, _) = send(&app, "DELETE", &format!("/api/products/{product_id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, all) = get(&app, "/api/products").await;
        assert!(all.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_counts_todays_sales() {
        let app = test_app().await;
        let (product_id, method_id) = stocked_croissant(&app, 10, 2).await;

        for quantity in [1, 2] {
            let (status, _) = post(
                &app,
                "/api/sales",
                json!({"product_id": product_id, "quantity": quantity, "payment_method_id": method_id}),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, dashboard) = get(&app, "/api/dashboard-data").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(dashboard["today_count"], 2);
        assert_eq!(dashboard["today_total_cents"], 36000);
        assert_eq!(dashboard["monthly_total_cents"], 36000);
        assert_eq!(dashboard["recent_sales"].as_array().unwrap().len(), 2);
        assert_eq!(dashboard["category_breakdown"][0]["name"], "Snacks");
        assert_eq!(dashboard["payment_breakdown"][0]["count"], 2);

        let (_, counter) = get(&app, "/api/today-sales-count").await;
        assert_eq!(counter["today_count"], 2);

        let (_, today) = get(&app, "/api/sales/today").await;
        assert_eq!(today.as_array().unwrap().len(), 2);
        let (_, monthly) = get(&app, "/api/sales/monthly").await;
        assert_eq!(monthly.as_array().unwrap().len(), 2);
        let (_, recent) = get(&app, "/api/sales/recent").await;
        let newest_id = recent[0]["id"].as_str().unwrap().to_string();
        assert_eq!(recent[0]["quantity"], 2);

        let (status, sale) = get(&app, &format!("/api/sales/{newest_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sale["id"], newest_id);
    }
}
