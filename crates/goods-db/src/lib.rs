//! # goods-db: Database Layer for Goods Calculator
//!
//! This crate provides database access for Goods Calculator.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Goods Calculator Data Flow                          │
//! │                                                                         │
//! │  App command (add_item)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     goods-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ CategoryRepo  │    │  (embedded)  │  │   │
//! │  │   │               │◄───│ ItemRepo      │    │ 001_init.sql │  │   │
//! │  │   │ SqlitePool    │    │ UnitRepo      │    └──────────────┘  │   │
//! │  │   │ ChangeTracker │    │ PrefsRepo     │                      │   │
//! │  │   └───────┬───────┘    └───────────────┘                      │   │
//! │  │           │ watch channel                                      │   │
//! │  │           ▼                                                    │   │
//! │  │   Subscription<T> (live queries)      TransferService (JSON)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (goods.db in the platform data directory)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`notify`] - Change tracking and live subscriptions
//! - [`repository`] - Repository implementations (category, item, ...)
//! - [`transfer`] - JSON export and import
//!
//! ## Usage
//!
//! ```rust,ignore
//! use goods_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/goods.db")).await?;
//!
//! let mut lists = db.categories().subscribe();
//! let current = lists.next().await;
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod notify;
pub mod pool;
pub mod repository;
pub mod transfer;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, TransferError, TransferResult};
pub use migrations::MigrationStatus;
pub use notify::{ChangeTracker, Subscription, Table};
pub use pool::{Database, DbConfig, DEFAULT_CATEGORY_NAME};
pub use transfer::{ExportDocument, ImportSummary, TransferService};

// Repository re-exports for convenience
pub use repository::category::{CategoryDeletion, CategoryRepository};
pub use repository::item::ItemRepository;
pub use repository::preferences::PreferencesRepository;
pub use repository::quantity_unit::QuantityUnitRepository;
