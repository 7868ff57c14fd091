//! # Error Types
//!
//! Domain-specific error types for cafe-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cafe-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cafe-db errors (separate crate)                                       │
//! │  └── DbError          - Database failures (wraps CoreError raised      │
//! │                         inside a transaction)                          │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What the client sees (code + message + status) │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant is a client error: the request was well-formed HTTP but the
/// shop's rules refuse it.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The product referenced by a sale does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The category referenced by a product or free-text sale does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// The payment method referenced by a sale does not exist.
    #[error("Payment method not found: {0}")]
    PaymentMethodNotFound(String),

    /// A stockable product has nothing left to sell.
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "Croissant" (stock: 0)
    ///      │
    ///      ▼
    /// OutOfStock { product: "Croissant" }
    ///      │
    ///      ▼
    /// UI shows: "Product 'Croissant' is out of stock. Please restock before selling."
    /// ```
    #[error("Product '{product}' is out of stock. Please restock before selling.")]
    OutOfStock { product: String },

    /// Requested more than the stock on hand.
    #[error("Insufficient stock for '{product}': available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any lookup, so a request that fails here never touches the
/// database.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, unknown timezone).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
