//! # Repository Module
//!
//! Database repository implementations for Goods Calculator.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  App command                                                           │
//! │       │                                                                 │
//! │       │  db.items().insert(&new_item)                                  │
//! │       ▼                                                                 │
//! │  ItemRepository                                                        │
//! │  ├── list_for_category / get_by_id / count     (reads)                 │
//! │  ├── insert / update / delete                   (writes → notify)      │
//! │  └── subscribe_for_category                     (live query)           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database ──── write committed ────► ChangeTracker              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every write notifies the [`ChangeTracker`](crate::notify::ChangeTracker)
//! after it commits, never before.
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Shopping lists, default list upkeep
//! - [`ItemRepository`](item::ItemRepository) - Item CRUD
//! - [`QuantityUnitRepository`](quantity_unit::QuantityUnitRepository) - Seeded units (read-only)
//! - [`PreferencesRepository`](preferences::PreferencesRepository) - Key-value user settings

pub mod category;
pub mod item;
pub mod preferences;
pub mod quantity_unit;
