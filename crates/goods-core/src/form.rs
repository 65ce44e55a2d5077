//! # Item Form
//!
//! The text-field representation of an item used by entry and edit screens.
//!
//! ## Lenient Parsing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field text        parse_decimal()                                      │
//! │  ──────────        ───────────────                                      │
//! │  "12.50"      →    12.5                                                 │
//! │  "12,50"      →    12.5   (comma decimal separator)                     │
//! │  " 3 "        →    3.0                                                  │
//! │  ""           →    0.0                                                  │
//! │  "abc"        →    0.0                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Invalid numbers are not rejected here. The form only requires that the
//! price and quantity fields are non-blank ([`ItemForm::is_entry_valid`]);
//! whatever text they hold is then parsed with the rules above.

use serde::{Deserialize, Serialize};

use crate::types::{Item, NewItem};
use crate::DEFAULT_UNIT_ID;

/// Parses a decimal, accepting `,` as the decimal separator.
///
/// Blank, malformed, or non-finite input yields `0.0`.
pub fn parse_decimal(text: &str) -> f64 {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Parses an integer id, yielding `default` for blank or malformed input.
pub fn parse_id(text: &str, default: i64) -> i64 {
    text.trim().parse::<i64>().unwrap_or(default)
}

/// Editable item fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemForm {
    /// Id of the item being edited, `0` for a new item.
    pub id: i64,
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub category_id: String,
    pub quantity_type: String,
}

impl ItemForm {
    /// An empty form for a new item in the given category.
    pub fn for_category(category_id: i64) -> Self {
        ItemForm {
            category_id: category_id.to_string(),
            quantity_type: DEFAULT_UNIT_ID.to_string(),
            ..ItemForm::default()
        }
    }

    /// A form pre-filled from a stored item.
    pub fn from_item(item: &Item) -> Self {
        ItemForm {
            id: item.id,
            name: item.name.clone(),
            price: item.price.to_string(),
            quantity: item.quantity.to_string(),
            category_id: item.category_id.to_string(),
            quantity_type: item.quantity_type.to_string(),
        }
    }

    /// Whether the form may be saved: price and quantity must be non-blank.
    pub fn is_entry_valid(&self) -> bool {
        !self.price.trim().is_empty() && !self.quantity.trim().is_empty()
    }

    /// Converts the fields into an unsaved item.
    ///
    /// A blank category becomes `0`, which the store rejects as a dangling
    /// reference. A blank unit becomes [`DEFAULT_UNIT_ID`].
    pub fn to_new_item(&self) -> NewItem {
        NewItem {
            name: self.name.trim().to_string(),
            price: parse_decimal(&self.price),
            quantity: parse_decimal(&self.quantity),
            category_id: parse_id(&self.category_id, 0),
            quantity_type: parse_id(&self.quantity_type, DEFAULT_UNIT_ID),
        }
    }

    /// Converts the fields into an item carrying the form's id.
    pub fn to_item(&self) -> Item {
        self.to_new_item().with_id(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12.50"), 12.5);
        assert_eq!(parse_decimal("12,50"), 12.5);
        assert_eq!(parse_decimal("  3 "), 3.0);
        assert_eq!(parse_decimal(""), 0.0);
        assert_eq!(parse_decimal("abc"), 0.0);
        assert_eq!(parse_decimal("inf"), 0.0);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("4", 1), 4);
        assert_eq!(parse_id("", 1), 1);
        assert_eq!(parse_id("x", 9), 9);
    }

    #[test]
    fn test_entry_validity() {
        let mut form = ItemForm::for_category(1);
        assert!(!form.is_entry_valid());

        form.price = "1".to_string();
        assert!(!form.is_entry_valid());

        form.quantity = "  ".to_string();
        assert!(!form.is_entry_valid());

        form.quantity = "2".to_string();
        assert!(form.is_entry_valid());
    }

    #[test]
    fn test_to_new_item_is_lenient() {
        let form = ItemForm {
            id: 0,
            name: " Cheese ".to_string(),
            price: "4,20".to_string(),
            quantity: "oops".to_string(),
            category_id: "3".to_string(),
            quantity_type: "".to_string(),
        };
        let item = form.to_new_item();
        assert_eq!(item.name, "Cheese");
        assert_eq!(item.price, 4.2);
        assert_eq!(item.quantity, 0.0);
        assert_eq!(item.category_id, 3);
        assert_eq!(item.quantity_type, DEFAULT_UNIT_ID);
    }

    #[test]
    fn test_from_item_preserves_values() {
        let item = Item {
            id: 5,
            name: "Rice".to_string(),
            price: 2.25,
            quantity: 900.0,
            category_id: 2,
            quantity_type: 1,
        };
        let form = ItemForm::from_item(&item);
        assert_eq!(form.price, "2.25");
        assert_eq!(form.quantity, "900");
        assert!(form.is_entry_valid());
        assert_eq!(form.to_item(), item);
    }
}
