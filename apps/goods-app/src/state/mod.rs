//! # State Module
//!
//! Application state owned by the composition root.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │   DbState    │  │  AppConfig   │  │   HomeFeed   │  │ ItemEntry  │  │
//! │  │              │  │              │  │              │  │            │  │
//! │  │  Database    │  │  db path     │  │  live        │  │  form      │  │
//! │  │  (SQLite     │  │  data dir    │  │  HomeView    │  │  fields +  │  │
//! │  │   pool)      │  │  list name   │  │              │  │  validity  │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • AppConfig: Read-only after initialization                           │
//! │  • HomeFeed / ItemEntry: owned by one screen, no sharing               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod entry;
mod home;

pub use config::{AppConfig, DATABASE_FILE_NAME};
pub use db::DbState;
pub use entry::ItemEntry;
pub use home::{load_home, resolve_selection, HomeFeed, HomeView, ItemRow};
