//! # Home View State
//!
//! Everything the main screen shows: the lists, the selected list's items
//! with their unit prices, and which item is cheapest.
//!
//! ## Live Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      HomeFeed                                           │
//! │                                                                         │
//! │  write to categories / items / preferences                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Subscription<HomeView> wakes                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load preferences ──► selected list id, sort order                     │
//! │  load categories, units, items of the selected list                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HomeView::build()  (unit prices, cheapest, sorting)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Switching lists is a preference write, so the feed follows it without
//! being recreated.

use serde::Serialize;
use tracing::debug;

use goods_core::pricing::{format_amount, select_cheapest, sort_items, unit_price};
use goods_core::{Category, Item, QuantityUnit, SortOrder};
use goods_db::{Database, DbResult, Subscription, Table};

/// One item as displayed, with its normalized price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    pub item: Item,
    /// Symbol of the item's unit, if the unit is known.
    pub unit_symbol: Option<String>,
    /// Price per kg or per l. `None` when the quantity is not positive.
    pub unit_price: Option<f64>,
    /// `unit_price` with two decimals.
    pub unit_price_label: Option<String>,
    pub is_cheapest: bool,
}

/// Snapshot of the main screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub categories: Vec<Category>,
    pub units: Vec<QuantityUnit>,
    /// The list being shown. Falls back to the first list when the stored
    /// selection no longer exists.
    pub selected_category: Option<Category>,
    pub sort_order: SortOrder,
    pub rows: Vec<ItemRow>,
    /// Cheapest item of the list. `None` for an empty list or when any
    /// item's unit price cannot be computed.
    pub cheapest_item_id: Option<i64>,
}

impl HomeView {
    /// Builds the view from loaded rows.
    ///
    /// `items` must already be restricted to the selected category.
    pub fn build(
        categories: Vec<Category>,
        units: Vec<QuantityUnit>,
        selected_category_id: i64,
        mut items: Vec<Item>,
        sort_order: SortOrder,
    ) -> Self {
        let selected_category = resolve_selection(&categories, selected_category_id).cloned();

        let cheapest_item_id = match select_cheapest(&items, &units) {
            Ok(item) => Some(item.id),
            Err(err) => {
                debug!(error = %err, "No cheapest item");
                None
            }
        };

        sort_items(&mut items, sort_order, &units);

        let rows = items
            .into_iter()
            .map(|item| {
                let unit_price = unit_price(&item, &units).ok();
                ItemRow {
                    unit_symbol: units
                        .iter()
                        .find(|unit| unit.id == item.quantity_type)
                        .map(|unit| unit.name.clone()),
                    unit_price,
                    unit_price_label: unit_price.map(format_amount),
                    is_cheapest: cheapest_item_id == Some(item.id),
                    item,
                }
            })
            .collect();

        HomeView {
            categories,
            units,
            selected_category,
            sort_order,
            rows,
            cheapest_item_id,
        }
    }

    /// The cheapest row, if there is one.
    pub fn cheapest(&self) -> Option<&ItemRow> {
        self.rows.iter().find(|row| row.is_cheapest)
    }
}

/// The stored selection if it exists, otherwise the first category.
pub fn resolve_selection(categories: &[Category], selected_id: i64) -> Option<&Category> {
    categories
        .iter()
        .find(|category| category.id == selected_id)
        .or_else(|| categories.first())
}

/// Loads the current home view.
pub async fn load_home(db: &Database) -> DbResult<HomeView> {
    let prefs = db.preferences().load().await?;
    let categories = db.categories().list().await?;
    let units = db.units().list().await?;

    let items = match resolve_selection(&categories, prefs.selected_category_id) {
        Some(category) => db.items().list_for_category(category.id).await?,
        None => Vec::new(),
    };

    Ok(HomeView::build(
        categories,
        units,
        prefs.selected_category_id,
        items,
        prefs.sort_order,
    ))
}

/// Live home view.
///
/// ## Usage
/// ```rust,ignore
/// let mut feed = HomeFeed::new(db.inner());
/// while let Some(view) = feed.next().await {
///     render(view?);
/// }
/// ```
#[derive(Debug)]
pub struct HomeFeed {
    subscription: Subscription<HomeView>,
}

impl HomeFeed {
    pub fn new(db: &Database) -> Self {
        let db = db.clone();
        let subscription = Subscription::new(
            db.tracker().clone(),
            &[
                Table::Categories,
                Table::Items,
                Table::QuantityUnits,
                Table::Preferences,
            ],
            move || {
                let db = db.clone();
                async move { load_home(&db).await }
            },
        );

        HomeFeed { subscription }
    }

    /// Next view: immediately the first time, then after each change.
    /// `None` once the database is closed.
    pub async fn next(&mut self) -> Option<DbResult<HomeView>> {
        self.subscription.next().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, price: f64, quantity: f64, quantity_type: i64) -> Item {
        Item {
            id,
            name: format!("item-{id}"),
            price,
            quantity,
            category_id: 1,
            quantity_type,
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            Category { id: 1, name: "List".into() },
            Category { id: 2, name: "Party".into() },
        ]
    }

    #[test]
    fn test_build_marks_cheapest_and_prices() {
        // A: 10 per 2 kg = 5/kg, B: 9 per 1 kg = 9/kg
        let items = vec![item(1, 10.0, 2.0, 2), item(2, 9.0, 1.0, 2)];
        let view = HomeView::build(categories(), QuantityUnit::seeded(), 1, items, SortOrder::Added);

        assert_eq!(view.cheapest_item_id, Some(1));
        assert_eq!(view.rows[0].unit_price, Some(5.0));
        assert_eq!(view.rows[0].unit_price_label.as_deref(), Some("5.00"));
        assert_eq!(view.rows[0].unit_symbol.as_deref(), Some("kg"));
        assert!(view.rows[0].is_cheapest);
        assert!(!view.rows[1].is_cheapest);
        assert_eq!(view.cheapest().map(|row| row.item.id), Some(1));
    }

    #[test]
    fn test_zero_quantity_blocks_cheapest_but_keeps_rows() {
        let items = vec![item(1, 10.0, 2.0, 2), item(2, 1.0, 0.0, 2)];
        let view = HomeView::build(categories(), QuantityUnit::seeded(), 1, items, SortOrder::Added);

        assert_eq!(view.cheapest_item_id, None);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[1].unit_price, None);
    }

    #[test]
    fn test_sort_by_unit_price() {
        let items = vec![item(1, 9.0, 1.0, 2), item(2, 10.0, 2.0, 2)];
        let view =
            HomeView::build(categories(), QuantityUnit::seeded(), 1, items, SortOrder::UnitPrice);

        let ids: Vec<i64> = view.rows.iter().map(|row| row.item.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(view.cheapest_item_id, Some(2));
    }

    #[test]
    fn test_missing_selection_falls_back_to_first() {
        let view = HomeView::build(categories(), QuantityUnit::seeded(), 99, vec![], SortOrder::Added);
        assert_eq!(view.selected_category.map(|c| c.id), Some(1));
        assert_eq!(view.cheapest_item_id, None);
    }
}
