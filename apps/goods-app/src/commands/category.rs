//! # Category Commands
//!
//! Create, rename, delete, and select shopping lists.
//!
//! ## Delete Flow
//! ```text
//! delete_category(id)
//!      │
//!      ▼
//! categories().delete(id)    (items cascade, default list recreated if last)
//!      │
//!      ▼
//! was `id` the selected list? ──yes──► select first remaining list
//! ```

use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::DbState;
use goods_core::validation::validate_category_name;
use goods_core::Category;

/// Result of deleting a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCategoryDto {
    pub removed_id: i64,
    /// Default list created because the deleted one was the last.
    pub replacement: Option<Category>,
    /// The selected list after the delete.
    pub selected_category_id: i64,
}

/// Lists all categories in creation order.
pub async fn list_categories(db: &DbState) -> Result<Vec<Category>, ApiError> {
    Ok(db.inner().categories().list().await?)
}

/// Creates a list and selects it.
pub async fn create_category(db: &DbState, name: String) -> Result<Category, ApiError> {
    let name = validate_category_name(&name)?;

    let category = db.inner().categories().insert(&name).await?;
    db.inner()
        .preferences()
        .set_selected_category_id(category.id)
        .await?;

    info!(id = category.id, "List created");
    Ok(category)
}

/// Renames a list.
pub async fn rename_category(db: &DbState, id: i64, name: String) -> Result<Category, ApiError> {
    let name = validate_category_name(&name)?;
    Ok(db.inner().categories().rename(id, &name).await?)
}

/// Deletes a list with its items, keeping the selection valid.
pub async fn delete_category(db: &DbState, id: i64) -> Result<DeletedCategoryDto, ApiError> {
    let deletion = db.inner().categories().delete(id).await?;

    let prefs = db.inner().preferences().load().await?;
    let mut selected_category_id = prefs.selected_category_id;

    if selected_category_id == deletion.removed {
        let first = db.inner().categories().list().await?.into_iter().next();
        if let Some(first) = first {
            selected_category_id = first.id;
            db.inner()
                .preferences()
                .set_selected_category_id(selected_category_id)
                .await?;
        }
    }

    info!(id, selected_category_id, "List deleted");
    Ok(DeletedCategoryDto {
        removed_id: deletion.removed,
        replacement: deletion.replacement,
        selected_category_id,
    })
}

/// Makes `id` the list shown on the home screen.
pub async fn select_category(db: &DbState, id: i64) -> Result<Category, ApiError> {
    let category = db.inner().categories().get(id).await?;
    db.inner().preferences().set_selected_category_id(id).await?;
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use goods_db::{Database, DbConfig};

    async fn setup() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    #[tokio::test]
    async fn test_create_trims_and_selects() {
        let db = setup().await;
        let category = create_category(&db, "  Weekly ".into()).await.unwrap();
        assert_eq!(category.name, "Weekly");

        let prefs = db.inner().preferences().load().await.unwrap();
        assert_eq!(prefs.selected_category_id, category.id);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = setup().await;
        let err = create_category(&db, "   ".into()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(list_categories(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_selected_moves_selection() {
        let db = setup().await;
        let party = create_category(&db, "Party".into()).await.unwrap();

        let result = delete_category(&db, party.id).await.unwrap();
        assert_eq!(result.selected_category_id, 1);
        assert!(result.replacement.is_none());
    }

    #[tokio::test]
    async fn test_deleting_only_list_selects_replacement() {
        let db = setup().await;
        let result = delete_category(&db, 1).await.unwrap();

        let replacement = result.replacement.unwrap();
        assert_eq!(result.selected_category_id, replacement.id);
        assert_eq!(list_categories(&db).await.unwrap(), vec![replacement]);
    }

    #[tokio::test]
    async fn test_deleting_other_list_keeps_selection() {
        let db = setup().await;
        let party = create_category(&db, "Party".into()).await.unwrap();
        select_category(&db, 1).await.unwrap();

        let result = delete_category(&db, party.id).await.unwrap();
        assert_eq!(result.selected_category_id, 1);
    }

    #[tokio::test]
    async fn test_select_missing_category() {
        let db = setup().await;
        let err = select_category(&db, 77).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
