//! # Item Entry State
//!
//! State of the add/edit item screen.
//!
//! ```text
//! field edit ──► ItemEntry::update(form) ──► is_entry_valid recomputed
//!                                                │
//!                          save button enabled ◄─┘
//! ```

use serde::{Deserialize, Serialize};

use goods_core::{Item, ItemForm};

/// Form fields plus whether they may be saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEntry {
    pub form: ItemForm,
    pub is_entry_valid: bool,
}

impl ItemEntry {
    /// Empty entry for a new item in `category_id`.
    pub fn new_item(category_id: i64) -> Self {
        Self::from_form(ItemForm::for_category(category_id))
    }

    /// Entry pre-filled for editing an existing item.
    pub fn edit(item: &Item) -> Self {
        Self::from_form(ItemForm::from_item(item))
    }

    /// Replaces the fields after user input.
    pub fn update(&mut self, form: ItemForm) {
        *self = Self::from_form(form);
    }

    /// Whether this entry edits a stored item rather than creating one.
    pub fn is_edit(&self) -> bool {
        self.form.id != 0
    }

    fn from_form(form: ItemForm) -> Self {
        let is_entry_valid = form.is_entry_valid();
        ItemEntry {
            form,
            is_entry_valid,
        }
    }
}
