//! # Domain Types
//!
//! Core domain types used throughout Goods Calculator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │      Item       │   │  QuantityUnit   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  category_id    │   │  id             │       │
//! │  │  name           │   │  quantity_type  │──►│  name (symbol)  │       │
//! │  └─────────────────┘   │  name           │   │  multiplier     │       │
//! │                        │  price          │   └────────┬────────┘       │
//! │                        │  quantity       │            │                │
//! │                        └─────────────────┘   ┌────────▼────────┐       │
//! │                                              │      Unit       │       │
//! │                                              │  G  Kg  Ml  L   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Categories own items (cascade delete). Items reference a quantity unit
//! but do not own it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// Unit
// =============================================================================

/// A unit of measure with its conversion multiplier.
///
/// Multipliers bring every unit to a price per kilogram or per liter:
/// a price per gram times 1000 is a price per kilogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Grams.
    G,
    /// Kilograms.
    Kg,
    /// Milliliters.
    Ml,
    /// Liters.
    L,
}

impl Unit {
    /// Every unit, in seed order.
    pub const ALL: [Unit; 4] = [Unit::G, Unit::Kg, Unit::Ml, Unit::L];

    /// The symbol stored in `quantity_units.name`.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Ml => "ml",
            Unit::L => "l",
        }
    }

    /// Factor applied to `price / quantity` to reach the base unit.
    pub const fn multiplier(&self) -> i64 {
        match self {
            Unit::G | Unit::Ml => 1000,
            Unit::Kg | Unit::L => 1,
        }
    }

    /// Row id the schema migration seeds for this unit.
    pub const fn seed_id(&self) -> i64 {
        match self {
            Unit::G => 1,
            Unit::Kg => 2,
            Unit::Ml => 3,
            Unit::L => 4,
        }
    }

    /// Symbol of the unit normalized prices are expressed in.
    pub const fn base_symbol(&self) -> &'static str {
        match self {
            Unit::G | Unit::Kg => "kg",
            Unit::Ml | Unit::L => "l",
        }
    }

    /// Looks a unit up by its symbol, ignoring case and surrounding space.
    pub fn from_symbol(symbol: &str) -> Option<Unit> {
        let symbol = symbol.trim();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.symbol().eq_ignore_ascii_case(symbol))
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::from_symbol(s).ok_or_else(|| ValidationError::NotAllowed {
            field: "unit".to_string(),
            allowed: Unit::ALL.iter().map(|u| u.symbol().to_string()).collect(),
        })
    }
}

// =============================================================================
// Quantity Unit
// =============================================================================

/// A persisted quantity unit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct QuantityUnit {
    pub id: i64,
    /// Unit symbol (g, kg, ml, l).
    pub name: String,
    pub multiplier: i64,
}

impl QuantityUnit {
    /// The row for a unit as seeded by the schema migration.
    pub fn from_unit(unit: Unit) -> Self {
        QuantityUnit {
            id: unit.seed_id(),
            name: unit.symbol().to_string(),
            multiplier: unit.multiplier(),
        }
    }

    /// All four seeded rows.
    pub fn seeded() -> Vec<QuantityUnit> {
        Unit::ALL.into_iter().map(QuantityUnit::from_unit).collect()
    }

    /// The enumerated unit this row stands for, if the symbol is known.
    pub fn unit(&self) -> Option<Unit> {
        Unit::from_symbol(&self.name)
    }
}

// =============================================================================
// Category
// =============================================================================

/// A user-named shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Item
// =============================================================================

/// A priced, quantified good belonging to one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// Total price in currency units.
    pub price: f64,
    /// Amount in the unit given by `quantity_type`.
    pub quantity: f64,
    pub category_id: i64,
    /// Id of the referenced [`QuantityUnit`].
    pub quantity_type: i64,
}

/// An item that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub quantity: f64,
    pub category_id: i64,
    pub quantity_type: i64,
}

impl NewItem {
    /// Attaches a generated id.
    pub fn with_id(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            category_id: self.category_id,
            quantity_type: self.quantity_type,
        }
    }
}

impl From<Item> for NewItem {
    fn from(item: Item) -> Self {
        NewItem {
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            category_id: item.category_id,
            quantity_type: item.quantity_type,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
