//! # Category Repository
//!
//! Database operations for categories (shopping lists).
//!
//! ## Default List
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  At Least One Category Exists                           │
//! │                                                                         │
//! │  Database::new()  ──► ensure_default()  ──► none? insert "List"        │
//! │                                                                         │
//! │  delete(id)                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │    DELETE FROM categories WHERE id = ?   (items cascade)               │
//! │    SELECT COUNT(*) FROM categories                                     │
//! │    0 left? INSERT default category                                     │
//! │  COMMIT                                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  notify(Categories, Items)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::notify::{ChangeTracker, Subscription, Table};
use goods_core::Category;

/// Outcome of deleting a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDeletion {
    /// Id of the deleted category.
    pub removed: i64,
    /// Default category created because the deleted one was the last.
    pub replacement: Option<Category>,
}

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
    tracker: Arc<ChangeTracker>,
    default_name: Arc<str>,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool, tracker: Arc<ChangeTracker>, default_name: Arc<str>) -> Self {
        CategoryRepository {
            pool,
            tracker,
            default_name,
        }
    }

    /// Lists all categories in creation (id) order.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        list_categories(&self.pool).await
    }

    /// Gets a category by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Category))` - Category found
    /// * `Ok(None)` - Category not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(category)
    }

    /// Gets a category by its ID, failing with `NotFound` if absent.
    pub async fn get(&self, id: i64) -> DbResult<Category> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Category", id))
    }

    /// Finds the most recently created category with exactly this name.
    ///
    /// Names are not unique, so the highest id wins.
    pub async fn find_latest_by_name(&self, name: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name FROM categories WHERE name = ?1 ORDER BY id DESC LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Number of categories.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Creates a category.
    ///
    /// The name is stored as given; callers validate it first.
    pub async fn insert(&self, name: &str) -> DbResult<Category> {
        debug!(name = %name, "Inserting category");

        let id = insert_category(&self.pool, name).await?;
        self.tracker.notify(&[Table::Categories]);

        info!(id, "Category created");
        Ok(Category {
            id,
            name: name.to_string(),
        })
    }

    /// Renames a category.
    pub async fn rename(&self, id: i64, name: &str) -> DbResult<Category> {
        debug!(id, name = %name, "Renaming category");

        let result = sqlx::query("UPDATE categories SET name = ?1 WHERE id = ?2")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        self.tracker.notify(&[Table::Categories]);
        Ok(Category {
            id,
            name: name.to_string(),
        })
    }

    /// Deletes a category and its items.
    ///
    /// If it was the last category, a default one is created in the same
    /// transaction, so no observer ever sees an empty category table.
    pub async fn delete(&self, id: i64) -> DbResult<CategoryDeletion> {
        debug!(id, "Deleting category");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Err(DbError::not_found("Category", id));
        }

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&mut *tx)
            .await?;

        let replacement = if remaining == 0 {
            let new_id = insert_category(&mut *tx, &self.default_name).await?;
            Some(Category {
                id: new_id,
                name: self.default_name.to_string(),
            })
        } else {
            None
        };

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        // Items went with the category
        self.tracker.notify(&[Table::Categories, Table::Items]);

        if let Some(ref category) = replacement {
            info!(id = category.id, "Last category deleted, default recreated");
        }

        Ok(CategoryDeletion {
            removed: id,
            replacement,
        })
    }

    /// Creates the default category if there are none.
    ///
    /// ## Returns
    /// The created category, or `None` if categories already existed.
    pub async fn ensure_default(&self) -> DbResult<Option<Category>> {
        if self.count().await? > 0 {
            return Ok(None);
        }

        info!(name = %self.default_name, "Creating default category");
        self.insert(&self.default_name).await.map(Some)
    }

    /// Name used for the default category.
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Live query over all categories in id order.
    pub fn subscribe(&self) -> Subscription<Vec<Category>> {
        let pool = self.pool.clone();
        Subscription::new(self.tracker.clone(), &[Table::Categories], move || {
            let pool = pool.clone();
            async move { list_categories(&pool).await }
        })
    }
}

async fn list_categories(pool: &SqlitePool) -> DbResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}

async fn insert_category<'e, E>(executor: E, name: &str) -> DbResult<i64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
        .bind(name)
        .execute(executor)
        .await?;

    Ok(result.last_insert_rowid())
}

// =============================================================================
// Unit Tests
// =============================================================================
