//! # Validation Module
//!
//! Input validation for names and settings.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Item form                                                    │
//! │  └── Non-blank price/quantity, lenient numeric parsing                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: App commands                                                 │
//! │  └── THIS MODULE: name and settings rules                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints (category, quantity unit)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices and quantities are deliberately not validated: lenient parsing
//! maps bad input to `0.0`, and pricing rejects zero quantities later.

use crate::error::ValidationError;
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Shortest notification duration the settings accept, in milliseconds.
pub const MIN_NOTIFICATION_DURATION_MS: u64 = 1_000;

/// Longest notification duration the settings accept, in milliseconds.
pub const MAX_NOTIFICATION_DURATION_MS: u64 = 10_000;

/// Validates a category (shopping list) name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_NAME_LENGTH`] characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use goods_core::validation::validate_category_name;
///
/// assert_eq!(validate_category_name("  Weekly  ").unwrap(), "Weekly");
/// assert!(validate_category_name("   ").is_err());
/// ```
pub fn validate_category_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    check_length("name", name)?;
    Ok(name.to_string())
}

/// Validates an item name.
///
/// Item names may be blank: the entry form only insists on price and
/// quantity. Length is still bounded.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();
    check_length("name", name)?;
    Ok(name.to_string())
}

/// Validates a notification duration in milliseconds.
pub fn validate_notification_duration(duration_ms: u64) -> ValidationResult<()> {
    if !(MIN_NOTIFICATION_DURATION_MS..=MAX_NOTIFICATION_DURATION_MS).contains(&duration_ms) {
        return Err(ValidationError::OutOfRange {
            field: "notification duration".to_string(),
            min: MIN_NOTIFICATION_DURATION_MS as i64,
            max: MAX_NOTIFICATION_DURATION_MS as i64,
        });
    }

    Ok(())
}

fn check_length(field: &str, value: &str) -> ValidationResult<()> {
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}
