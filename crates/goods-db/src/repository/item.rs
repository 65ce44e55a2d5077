//! # Item Repository
//!
//! Database operations for items.
//!
//! Items are stored exactly as entered. Zero or negative quantities are
//! allowed here; unit-price computation rejects them later.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::notify::{ChangeTracker, Subscription, Table};
use goods_core::{Item, NewItem};

const ITEM_COLUMNS: &str = "id, name, price, quantity, category_id, quantity_type";

/// Repository for item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.items();
///
/// let item = repo.insert(&form.to_new_item()).await?;
/// let in_list = repo.list_for_category(item.category_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
    tracker: Arc<ChangeTracker>,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool, tracker: Arc<ChangeTracker>) -> Self {
        ItemRepository { pool, tracker }
    }

    /// Lists every item ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Item>> {
        list_all_items(&self.pool).await
    }

    /// Lists the items of one category in insertion (id) order.
    pub async fn list_for_category(&self, category_id: i64) -> DbResult<Vec<Item>> {
        list_category_items(&self.pool, category_id).await
    }

    /// Gets an item by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets an item by its ID, failing with `NotFound` if absent.
    pub async fn get(&self, id: i64) -> DbResult<Item> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))
    }

    /// Number of items across all categories.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts a new item.
    ///
    /// ## Errors
    /// `ForeignKeyViolation` if the category or quantity unit does not exist.
    pub async fn insert(&self, item: &NewItem) -> DbResult<Item> {
        debug!(
            name = %item.name,
            category_id = item.category_id,
            "Inserting item"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO items (name, price, quantity, category_id, quantity_type)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&item.name)
        .bind(item.price)
        .bind(item.quantity)
        .bind(item.category_id)
        .bind(item.quantity_type)
        .execute(&self.pool)
        .await?;

        self.tracker.notify(&[Table::Items]);
        Ok(item.clone().with_id(result.last_insert_rowid()))
    }

    /// Replaces every field of an existing item.
    pub async fn update(&self, item: &Item) -> DbResult<()> {
        debug!(id = item.id, "Updating item");

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?1,
                price = ?2,
                quantity = ?3,
                category_id = ?4,
                quantity_type = ?5
            WHERE id = ?6
            "#,
        )
        .bind(&item.name)
        .bind(item.price)
        .bind(item.quantity)
        .bind(item.category_id)
        .bind(item.quantity_type)
        .bind(item.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", item.id));
        }

        self.tracker.notify(&[Table::Items]);
        Ok(())
    }

    /// Deletes an item.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        self.tracker.notify(&[Table::Items]);
        Ok(())
    }

    /// Live query over every item, ordered by name.
    pub fn subscribe_all(&self) -> Subscription<Vec<Item>> {
        let pool = self.pool.clone();
        Subscription::new(self.tracker.clone(), &[Table::Items], move || {
            let pool = pool.clone();
            async move { list_all_items(&pool).await }
        })
    }

    /// Live query over the items of one category.
    pub fn subscribe_for_category(&self, category_id: i64) -> Subscription<Vec<Item>> {
        let pool = self.pool.clone();
        Subscription::new(self.tracker.clone(), &[Table::Items], move || {
            let pool = pool.clone();
            async move { list_category_items(&pool, category_id).await }
        })
    }
}

async fn list_all_items(pool: &SqlitePool) -> DbResult<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(&format!(
        "SELECT {ITEM_COLUMNS} FROM items ORDER BY name, id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(items)
}

async fn list_category_items(pool: &SqlitePool, category_id: i64) -> DbResult<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(&format!(
        "SELECT {ITEM_COLUMNS} FROM items WHERE category_id = ?1 ORDER BY id"
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

// =============================================================================
// Unit Tests
// =============================================================================
