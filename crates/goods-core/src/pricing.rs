//! # Unit Pricing
//!
//! Unit-price normalization and cheapest-item selection.
//!
//! ## How Items Are Compared
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Normalized Unit Price                                │
//! │                                                                         │
//! │  Item A: 10.00 for 2 kg    →  (10.00 / 2)   × 1     =  5.00 per kg     │
//! │  Item B:  9.00 for 1 kg    →  ( 9.00 / 1)   × 1     =  9.00 per kg     │
//! │  Item C:  0.90 for 150 g   →  ( 0.90 / 150) × 1000  =  6.00 per kg     │
//! │                                                                         │
//! │  select_cheapest([A, B, C]) → A                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Edge Cases
//! - A zero, negative or non-finite quantity is rejected rather than
//!   producing infinity or NaN.
//! - When several items share the minimum price, the first one in input
//!   order is selected.
//! - Unit lookup is a linear scan over the unit list. Lists hold a handful
//!   of units and tens of items.

use std::cmp::Ordering;

use crate::error::PricingError;
use crate::preferences::SortOrder;
use crate::types::{Item, QuantityUnit};

/// Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Computes `(price / quantity) * multiplier`.
///
/// ## Example
/// ```rust
/// use goods_core::pricing::normalize;
///
/// assert_eq!(normalize(10.0, 2.0, 1).unwrap(), 5.0);
/// assert!((normalize(0.9, 150.0, 1000).unwrap() - 6.0).abs() < 1e-9);
/// assert!(normalize(1.0, 0.0, 1).is_err());
/// ```
pub fn normalize(price: f64, quantity: f64, multiplier: i64) -> PricingResult<f64> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(PricingError::InvalidQuantity { quantity });
    }

    Ok(price / quantity * multiplier as f64)
}

/// Finds the unit with the given id.
pub fn find_unit(units: &[QuantityUnit], unit_id: i64) -> PricingResult<&QuantityUnit> {
    units
        .iter()
        .find(|unit| unit.id == unit_id)
        .ok_or(PricingError::UnknownUnit { unit_id })
}

/// Normalized unit price of one item.
pub fn unit_price(item: &Item, units: &[QuantityUnit]) -> PricingResult<f64> {
    let unit = find_unit(units, item.quantity_type)?;
    normalize(item.price, item.quantity, unit.multiplier)
}

/// Returns the item with the lowest normalized unit price.
///
/// ## Errors
/// - [`PricingError::NoItems`] when `items` is empty
/// - [`PricingError::UnknownUnit`] when an item's unit is not in `units`
/// - [`PricingError::InvalidQuantity`] when an item's quantity is not positive
pub fn select_cheapest<'a>(items: &'a [Item], units: &[QuantityUnit]) -> PricingResult<&'a Item> {
    let mut best: Option<(&Item, f64)> = None;

    for item in items {
        let price = unit_price(item, units)?;
        match best {
            // Strictly lower replaces, so ties keep the earlier item
            Some((_, best_price)) if best_price <= price => {}
            _ => best = Some((item, price)),
        }
    }

    best.map(|(item, _)| item).ok_or(PricingError::NoItems)
}

/// Pairs every item with its unit price, cheapest first.
///
/// The sort is stable: items with equal prices keep their input order.
pub fn rank_by_unit_price<'a>(
    items: &'a [Item],
    units: &[QuantityUnit],
) -> PricingResult<Vec<(&'a Item, f64)>> {
    let mut ranked = items
        .iter()
        .map(|item| unit_price(item, units).map(|price| (item, price)))
        .collect::<PricingResult<Vec<_>>>()?;

    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(ranked)
}

/// Sorts items in place according to a [`SortOrder`].
///
/// For [`SortOrder::UnitPrice`], items whose unit price cannot be computed
/// are placed after all priced items.
pub fn sort_items(items: &mut [Item], order: SortOrder, units: &[QuantityUnit]) {
    match order {
        SortOrder::Added => items.sort_by_key(|item| item.id),
        SortOrder::Name => items.sort_by_cached_key(|item| item.name.to_lowercase()),
        SortOrder::Price => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::UnitPrice => items.sort_by(|a, b| {
            compare_unit_prices(unit_price(a, units).ok(), unit_price(b, units).ok())
        }),
    }
}

fn compare_unit_prices(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Formats an amount with two decimals for display.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Unit;

    fn item(id: i64, name: &str, price: f64, quantity: f64, unit: Unit) -> Item {
        Item {
            id,
            name: name.to_string(),
            price,
            quantity,
            category_id: 1,
            quantity_type: unit.seed_id(),
        }
    }

    #[test]
    fn test_normalize_matches_formula() {
        let samples = [(10.0, 2.0, 1), (0.0, 3.0, 1000), (7.5, 0.25, 1), (123.45, 500.0, 1000)];
        for (price, quantity, multiplier) in samples {
            let result = normalize(price, quantity, multiplier).unwrap();
            assert_eq!(result, (price / quantity) * multiplier as f64);
            assert!(result >= 0.0);
        }
    }

    #[test]
    fn test_normalize_is_scale_consistent() {
        let base = normalize(12.0, 3.0, 1000).unwrap();
        for k in [0.5, 2.0, 10.0, 1234.5] {
            let scaled = normalize(12.0 * k, 3.0 * k, 1000).unwrap();
            assert!((scaled - base).abs() < 1e-9 * base.max(1.0));
        }
    }

    #[test]
    fn test_normalize_rejects_non_positive_quantity() {
        assert_eq!(
            normalize(5.0, 0.0, 1),
            Err(PricingError::InvalidQuantity { quantity: 0.0 })
        );
        assert!(normalize(5.0, -1.0, 1).is_err());
        assert!(normalize(5.0, f64::NAN, 1).is_err());
        assert!(normalize(5.0, f64::INFINITY, 1).is_err());
    }

    #[test]
    fn test_select_cheapest_scenario() {
        let units = QuantityUnit::seeded();
        let items = vec![
            item(1, "A", 10.0, 2.0, Unit::Kg),
            item(2, "B", 9.0, 1.0, Unit::Kg),
        ];

        assert_eq!(unit_price(&items[0], &units).unwrap(), 5.0);
        assert_eq!(unit_price(&items[1], &units).unwrap(), 9.0);
        assert_eq!(select_cheapest(&items, &units).unwrap().name, "A");
    }

    #[test]
    fn test_select_cheapest_across_units() {
        let units = QuantityUnit::seeded();
        let items = vec![
            item(1, "bag", 4.0, 1.0, Unit::Kg),
            item(2, "pack", 0.9, 300.0, Unit::G),
            item(3, "crate", 11.0, 2.0, Unit::Kg),
        ];

        let best = select_cheapest(&items, &units).unwrap();
        assert_eq!(best.name, "pack");

        let best_price = unit_price(best, &units).unwrap();
        for other in &items {
            assert!(best_price <= unit_price(other, &units).unwrap());
        }
    }

    #[test]
    fn test_select_cheapest_ties_keep_first() {
        let units = QuantityUnit::seeded();
        let items = vec![
            item(1, "first", 4.0, 2.0, Unit::L),
            item(2, "second", 2.0, 1.0, Unit::L),
        ];
        assert_eq!(select_cheapest(&items, &units).unwrap().name, "first");
    }

    #[test]
    fn test_select_cheapest_errors() {
        let units = QuantityUnit::seeded();
        assert_eq!(select_cheapest(&[], &units), Err(PricingError::NoItems));

        let mut orphan = item(1, "orphan", 1.0, 1.0, Unit::Kg);
        orphan.quantity_type = 42;
        assert_eq!(
            select_cheapest(&[orphan], &units),
            Err(PricingError::UnknownUnit { unit_id: 42 })
        );

        let empty = item(2, "empty", 1.0, 0.0, Unit::Kg);
        assert!(matches!(
            select_cheapest(&[empty], &units),
            Err(PricingError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_rank_by_unit_price_is_stable() {
        let units = QuantityUnit::seeded();
        let items = vec![
            item(1, "x", 3.0, 1.0, Unit::Kg),
            item(2, "y", 1.0, 1.0, Unit::Kg),
            item(3, "z", 3.0, 1.0, Unit::Kg),
        ];
        let ranked = rank_by_unit_price(&items, &units).unwrap();
        let names: Vec<&str> = ranked.iter().map(|(i, _)| i.name.as_str()).collect();
        assert_eq!(names, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_sort_items_by_unit_price_puts_unpriced_last() {
        let units = QuantityUnit::seeded();
        let mut items = vec![
            item(1, "broken", 1.0, 0.0, Unit::Kg),
            item(2, "dear", 8.0, 1.0, Unit::Kg),
            item(3, "cheap", 2.0, 1.0, Unit::Kg),
        ];
        sort_items(&mut items, SortOrder::UnitPrice, &units);
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        sort_items(&mut items, SortOrder::Added, &units);
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_items_by_name_ignores_case() {
        let units = QuantityUnit::seeded();
        let mut items = vec![
            item(1, "banana", 1.0, 1.0, Unit::Kg),
            item(2, "Apple", 1.0, 1.0, Unit::Kg),
        ];
        sort_items(&mut items, SortOrder::Name, &units);
        assert_eq!(items[0].name, "Apple");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(5.0), "5.00");
        assert_eq!(format_amount(12.5), "12.50");
    }
}
