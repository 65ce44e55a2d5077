//! # Item Commands
//!
//! Add, edit, and delete items, and find the cheapest one.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ItemForm (text fields)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  is_entry_valid()? ── no ──► ValidationError                           │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  to_new_item()   "4,20" → 4.2, "abc" → 0.0, blank unit → g             │
//! │       │                                                                 │
//! │       ├── form.id == 0 ──► insert                                      │
//! │       └── otherwise    ──► update                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{load_home, DbState, HomeView, ItemEntry};
use goods_core::pricing::select_cheapest;
use goods_core::validation::validate_item_name;
use goods_core::{Item, ItemForm, ValidationError};

/// Lists the items of one list in insertion order.
pub async fn list_items(db: &DbState, category_id: i64) -> Result<Vec<Item>, ApiError> {
    Ok(db.inner().items().list_for_category(category_id).await?)
}

/// Gets one item.
pub async fn get_item(db: &DbState, id: i64) -> Result<Item, ApiError> {
    Ok(db.inner().items().get(id).await?)
}

/// Entry state for editing a stored item.
pub async fn edit_item(db: &DbState, id: i64) -> Result<ItemEntry, ApiError> {
    let item = db.inner().items().get(id).await?;
    Ok(ItemEntry::edit(&item))
}

/// Saves a form: inserts when `form.id` is `0`, otherwise updates.
pub async fn save_item(db: &DbState, form: ItemForm) -> Result<Item, ApiError> {
    if !form.is_entry_valid() {
        return Err(ValidationError::Required {
            field: "price and quantity".to_string(),
        }
        .into());
    }

    let mut new_item = form.to_new_item();
    new_item.name = validate_item_name(&new_item.name)?;

    let repo = db.inner().items();
    let item = if form.id == 0 {
        let item = repo.insert(&new_item).await?;
        info!(id = item.id, category_id = item.category_id, "Item added");
        item
    } else {
        let item = new_item.with_id(form.id);
        repo.update(&item).await?;
        debug!(id = item.id, "Item updated");
        item
    };

    Ok(item)
}

/// Deletes an item.
pub async fn delete_item(db: &DbState, id: i64) -> Result<(), ApiError> {
    db.inner().items().delete(id).await?;
    Ok(())
}

/// The item of a list with the lowest unit price.
///
/// ## Errors
/// `PRICING_ERROR` for an empty list or when some item has a non-positive
/// quantity.
pub async fn cheapest_item(db: &DbState, category_id: i64) -> Result<Item, ApiError> {
    let items = db.inner().items().list_for_category(category_id).await?;
    let units = db.inner().units().list().await?;

    let cheapest = select_cheapest(&items, &units)?;
    Ok(cheapest.clone())
}

/// Current home screen snapshot.
pub async fn get_home(db: &DbState) -> Result<HomeView, ApiError> {
    Ok(load_home(db.inner()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use goods_db::{Database, DbConfig};

    async fn setup() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    fn form(name: &str, price: &str, quantity: &str, unit: &str) -> ItemForm {
        ItemForm {
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
            quantity_type: unit.into(),
            ..ItemForm::for_category(1)
        }
    }

    #[tokio::test]
    async fn test_save_inserts_then_updates() {
        let db = setup().await;

        let item = save_item(&db, form("Rice", "2,40", "1", "2")).await.unwrap();
        assert_eq!(item.price, 2.4);

        let mut edit = edit_item(&db, item.id).await.unwrap().form;
        edit.price = "2.10".into();
        let updated = save_item(&db, edit).await.unwrap();

        assert_eq!(updated.id, item.id);
        assert_eq!(get_item(&db, item.id).await.unwrap().price, 2.1);
        assert_eq!(list_items(&db, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_price_rejected() {
        let db = setup().await;
        let err = save_item(&db, form("Rice", " ", "1", "2")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_cheapest_item_scenario() {
        let db = setup().await;
        let a = save_item(&db, form("A", "10", "2", "2")).await.unwrap();
        save_item(&db, form("B", "9", "1", "2")).await.unwrap();

        assert_eq!(cheapest_item(&db, 1).await.unwrap().id, a.id);
    }

    #[tokio::test]
    async fn test_cheapest_of_empty_list_is_pricing_error() {
        let db = setup().await;
        let err = cheapest_item(&db, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PricingError);
    }

    #[tokio::test]
    async fn test_lenient_quantity_is_stored_but_not_priced() {
        let db = setup().await;
        save_item(&db, form("Odd", "3", "abc", "1")).await.unwrap();

        let home = get_home(&db).await.unwrap();
        assert_eq!(home.rows.len(), 1);
        assert_eq!(home.rows[0].item.quantity, 0.0);
        assert_eq!(home.cheapest_item_id, None);
    }

    #[tokio::test]
    async fn test_delete_item() {
        let db = setup().await;
        let item = save_item(&db, form("Tea", "3", "100", "1")).await.unwrap();
        delete_item(&db, item.id).await.unwrap();

        let err = delete_item(&db, item.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
