//! # cafe-core: Pure Business Logic for Cafe POS
//!
//! This crate holds the coffee shop's business rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cafe POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Browser client (sale entry, dashboard)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum routes)                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cafe-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   stock   │  │  report   │  │   │
//! │  │   │  Product  │  │   Money   │  │ sale rules│  │  windows  │  │   │
//! │  │   │   Sale    │  │           │  │           │  │ breakdown │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cafe-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Category, PaymentMethod, Product, Sale)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`stock`] - Stock rules applied when a sale is recorded
//! - [`report`] - Timezone-aware report windows and aggregate shapes
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use cafe_core::money::Money;
//!
//! let unit_price = Money::from_cents(18000); // 180.00
//! let total = unit_price.checked_multiply_quantity(3);
//! assert_eq!(total, Some(Money::from_cents(54000)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod report;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::{Breakdown, Dashboard, ReportWindow, SalesSummary, TodayCount};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Timezone used for "today" and "this month" when none is configured.
///
/// All date bucketing happens in one named zone so that "today" is the same
/// wall-clock day for every client, whatever the server's locale.
pub const DEFAULT_TIMEZONE: &str = "Asia/Dhaka";

/// Maximum quantity of a single item in one sale.
///
/// Guards against typing 1000 instead of 10 at the counter.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Number of sales returned by the "recent sales" listing.
pub const RECENT_SALES_LIMIT: u32 = 10;

/// Number of recent sales embedded in the dashboard payload.
pub const DASHBOARD_RECENT_LIMIT: u32 = 5;
