//! # Error Types
//!
//! Domain-specific error types for goods-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  goods-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── PricingError     - Unit price / cheapest-item failures            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  goods-db errors (separate crate)                                      │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── TransferError    - JSON import/export failures                    │
//! │                                                                         │
//! │  goods-app errors                                                      │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unit price computation failed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Failures of the unit-price computations.
///
/// ## When These Occur
/// ```text
/// normalize(price, 0.0, m)          → InvalidQuantity { quantity: 0.0 }
/// select_cheapest(&[], units)       → NoItems
/// item.quantity_type not in units   → UnknownUnit { unit_id }
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Quantity is zero, negative, or not a finite number.
    #[error("quantity must be a positive number, got {quantity}")]
    InvalidQuantity { quantity: f64 },

    /// The item references a unit id missing from the supplied unit list.
    #[error("no quantity unit with id {unit_id}")]
    UnknownUnit { unit_id: i64 },

    /// Selection over an empty item list.
    #[error("cannot select the cheapest item of an empty list")]
    NoItems,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_messages() {
        let err = PricingError::InvalidQuantity { quantity: 0.0 };
        assert_eq!(err.to_string(), "quantity must be a positive number, got 0");

        let err = PricingError::UnknownUnit { unit_id: 9 };
        assert_eq!(err.to_string(), "no quantity unit with id 9");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = PricingError::NoItems.into();
        assert!(matches!(core_err, CoreError::Pricing(PricingError::NoItems)));

        let core_err: CoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
