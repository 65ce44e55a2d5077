//! # Commands Module
//!
//! All operations exposed to the UI.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── category.rs  ◄─── List create / rename / delete / select
//! ├── item.rs      ◄─── Item save / delete, cheapest item, home snapshot
//! ├── settings.rs  ◄─── Theme, language, notification duration, sort order
//! └── transfer.rs  ◄─── JSON export / import
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI event                                                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  async fn save_item(                                                    │
//! │      db: &DbState,      ◄── owned by the composition root              │
//! │      form: ItemForm,    ◄── from the screen                            │
//! │  ) -> Result<Item, ApiError>                                            │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  write commits ──► subscriptions (HomeFeed) push a fresh view          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands return results directly; screens that display lists should
//! follow a [`HomeFeed`](crate::state::HomeFeed) instead of re-querying.

pub mod category;
pub mod item;
pub mod settings;
pub mod transfer;
