//! # goods-core: Pure Domain Logic for Goods Calculator
//!
//! This crate holds the domain types and the two computations the rest of
//! the workspace is built around: unit-price normalization and cheapest-item
//! selection. Everything here is a pure function of its inputs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Goods Calculator Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    goods-app (view state, commands)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ goods-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │   form    │  │ validation│  │   │
//! │  │   │ Category  │  │ normalize │  │ ItemForm  │  │   rules   │  │   │
//! │  │   │ Item Unit │  │ cheapest  │  │ lenient   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOCALIZATION • PURE FUNCTIONS      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    goods-db (Database Layer)                    │   │
//! │  │          SQLite queries, migrations, live subscriptions         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Item, QuantityUnit, Unit)
//! - [`preferences`] - User preference values (theme, language, sort order)
//! - [`pricing`] - Unit price normalization and cheapest-item selection
//! - [`form`] - Text-field item form with lenient numeric parsing
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use goods_core::pricing::{normalize, select_cheapest};
//! use goods_core::types::{Item, QuantityUnit, Unit};
//!
//! let units = QuantityUnit::seeded();
//! let kg = Unit::Kg.seed_id();
//!
//! let a = Item { id: 1, name: "A".into(), price: 10.0, quantity: 2.0, category_id: 1, quantity_type: kg };
//! let b = Item { id: 2, name: "B".into(), price: 9.0, quantity: 1.0, category_id: 1, quantity_type: kg };
//!
//! assert_eq!(normalize(10.0, 2.0, 1).unwrap(), 5.0);
//! assert_eq!(select_cheapest(&[a, b], &units).unwrap().name, "A");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod preferences;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, PricingError, ValidationError};
pub use form::ItemForm;
pub use preferences::{Language, SortOrder, Theme, UserPreferences};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Notification (snackbar) duration used until the user picks another one.
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 4_000;

/// Category selected on first launch. The store seeds this category.
pub const DEFAULT_SELECTED_CATEGORY_ID: i64 = 1;

/// Unit assigned by the item form when the unit field is blank or invalid.
pub const DEFAULT_UNIT_ID: i64 = 1;

/// Longest accepted category or item name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;
