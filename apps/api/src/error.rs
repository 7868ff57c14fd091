//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Cafe POS                               │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │       │                                                                 │
//! │       ├── DbError::Domain(CoreError) ── stock / validation / refs ─┐   │
//! │       ├── DbError::NotFound ─────────── 404                        │   │
//! │       ├── DbError::UniqueViolation ──── 409                        │   │
//! │       └── anything else ─────────────── 500, detail logged only    │   │
//! │                                                                     ▼   │
//! │                                                       ApiError ──► JSON │
//! │                                                                         │
//! │  { "code": "INSUFFICIENT_STOCK",                                       │
//! │    "error": "Insufficient stock for 'Croissant': available 2, ..." }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use cafe_core::CoreError;
use cafe_db::DbError;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "error": "Product not found: 550e8400-..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    #[serde(rename = "error")]
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Request references a product, category or payment method that does
    /// not exist (400)
    InvalidReference,

    /// Stockable product has no stock left (400)
    OutOfStock,

    /// Requested more than is in stock (400)
    InsufficientStock,

    /// Duplicate name (409)
    Conflict,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError
            | ErrorCode::InvalidReference
            | ErrorCode::OutOfStock
            | ErrorCode::InsufficientStock => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Logs `detail` and returns the generic internal error.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Internal error");
        ApiError::new(ErrorCode::Internal, INTERNAL_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(core) => core.into(),
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            err @ DbError::UniqueViolation { .. } => {
                ApiError::new(ErrorCode::Conflict, err.to_string())
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::InvalidReference, "Invalid reference")
            }
            other => ApiError::internal(other),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductNotFound(_)
            | CoreError::CategoryNotFound(_)
            | CoreError::PaymentMethodNotFound(_) => ErrorCode::InvalidReference,
            CoreError::OutOfStock { .. } => ErrorCode::OutOfStock,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };

        ApiError::new(code, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
