//! # cafe-db: Database Layer for Cafe POS
//!
//! Database access for the coffee shop service, using SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cafe POS Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (POST /api/sales)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     cafe-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ CategoryRepo  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ PaymentRepo   │    │ 001_initial  │  │   │
//! │  │   │               │    │ ProductRepo   │    │   _schema    │  │   │
//! │  │   │               │    │ SaleRepo      │    │              │  │   │
//! │  │   │               │    │ ReportRepo    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (CAFE_DATABASE_PATH)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cafe_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./cafe.db")).await?;
//! let low = db.products().list(ProductFilter::LowStock).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::category::CategoryRepository;
pub use repository::payment_method::PaymentMethodRepository;
pub use repository::product::{ProductFilter, ProductRepository};
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
