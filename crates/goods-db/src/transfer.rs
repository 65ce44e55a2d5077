//! # Import / Export
//!
//! JSON backup of categories and items.
//!
//! ## Document Format
//! ```text
//! {
//!   "categories": [ { "id": 1, "name": "List" }, ... ],
//!   "items": [
//!     { "id": 4, "name": "Milk", "price": 1.2, "quantity": 1.0,
//!       "categoryId": 1, "quantityTypeId": 4 },
//!     ...
//!   ]
//! }
//! ```
//!
//! ## Import Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  parse JSON ──► every item's categoryId listed in "categories"?        │
//! │                     │ no → UnknownCategory (nothing written)           │
//! │                     ▼ yes                                               │
//! │  BEGIN                                                                 │
//! │    INSERT categories, remember old id → new id                         │
//! │    INSERT items with remapped category ids                             │
//! │    (quantity unit ids are kept as-is; unknown ones violate the FK)     │
//! │  COMMIT ──► notify(Categories, Items)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Imported rows are appended. Existing categories and items are untouched,
//! and importing the same file twice yields duplicates.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, TransferError, TransferResult};
use crate::notify::{ChangeTracker, Table};
use goods_core::{Category, Item};

/// A category as written in an export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
}

/// An item as written in an export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: f64,
    pub category_id: i64,
    pub quantity_type_id: i64,
}

impl From<Category> for CategoryRecord {
    fn from(category: Category) -> Self {
        CategoryRecord {
            id: category.id,
            name: category.name,
        }
    }
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        ItemRecord {
            id: item.id,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            category_id: item.category_id,
            quantity_type_id: item.quantity_type,
        }
    }
}

/// A full export: every category and every item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub categories: Vec<CategoryRecord>,
    pub items: Vec<ItemRecord>,
}

impl ExportDocument {
    /// Parses a document from JSON. Unknown fields are ignored.
    pub fn from_json(json: &str) -> TransferResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the document as indented JSON.
    pub fn to_json(&self) -> TransferResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every item refers to a category in this document.
    pub fn check_references(&self) -> TransferResult<()> {
        let known: std::collections::HashSet<i64> =
            self.categories.iter().map(|category| category.id).collect();

        match self
            .items
            .iter()
            .find(|item| !known.contains(&item.category_id))
        {
            Some(item) => Err(TransferError::UnknownCategory {
                item: item.name.clone(),
                category_id: item.category_id,
            }),
            None => Ok(()),
        }
    }
}

/// Counts of rows created by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub categories: usize,
    pub items: usize,
}

/// Export and import of the whole store.
#[derive(Debug, Clone)]
pub struct TransferService {
    pool: SqlitePool,
    tracker: Arc<ChangeTracker>,
}

impl TransferService {
    /// Creates a new TransferService.
    pub fn new(pool: SqlitePool, tracker: Arc<ChangeTracker>) -> Self {
        TransferService { pool, tracker }
    }

    /// Reads every category and item into an export document.
    pub async fn export_document(&self) -> TransferResult<ExportDocument> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, price, quantity, category_id, quantity_type
            FROM items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        info!(
            categories = categories.len(),
            items = items.len(),
            "Exporting data"
        );

        Ok(ExportDocument {
            categories: categories.into_iter().map(CategoryRecord::from).collect(),
            items: items.into_iter().map(ItemRecord::from).collect(),
        })
    }

    /// Exports the store as JSON text.
    pub async fn export_json(&self) -> TransferResult<String> {
        self.export_document().await?.to_json()
    }

    /// Imports a document, all or nothing.
    pub async fn import_document(&self, document: &ExportDocument) -> TransferResult<ImportSummary> {
        document.check_references()?;

        info!(
            categories = document.categories.len(),
            items = document.items.len(),
            "Importing data"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut id_map: HashMap<i64, i64> = HashMap::with_capacity(document.categories.len());
        for category in &document.categories {
            let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
                .bind(&category.name)
                .execute(&mut *tx)
                .await?;

            let new_id = result.last_insert_rowid();
            if id_map.insert(category.id, new_id).is_some() {
                warn!(id = category.id, "Duplicate category id in import, later entry wins");
            }
            debug!(old_id = category.id, new_id, "Category imported");
        }

        for item in &document.items {
            let category_id = id_map
                .get(&item.category_id)
                .copied()
                .ok_or_else(|| TransferError::UnknownCategory {
                    item: item.name.clone(),
                    category_id: item.category_id,
                })?;

            sqlx::query(
                r#"
                INSERT INTO items (name, price, quantity, category_id, quantity_type)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&item.name)
            .bind(item.price)
            .bind(item.quantity)
            .bind(category_id)
            .bind(item.quantity_type_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        self.tracker.notify(&[Table::Categories, Table::Items]);

        let summary = ImportSummary {
            categories: document.categories.len(),
            items: document.items.len(),
        };
        info!(?summary, "Import complete");
        Ok(summary)
    }

    /// Parses and imports JSON text.
    pub async fn import_json(&self, json: &str) -> TransferResult<ImportSummary> {
        let document = ExportDocument::from_json(json)?;
        self.import_document(&document).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use goods_core::NewItem;

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed(db: &Database) {
        let weekly = db.categories().insert("Weekly").await.unwrap();
        let items = [
            ("Milk", 1.2, 1.0, 1, 4),
            ("Cheese", 4.5, 250.0, weekly.id, 1),
            ("Juice", 2.0, 1500.0, weekly.id, 3),
        ];
        for (name, price, quantity, category_id, quantity_type) in items {
            db.items()
                .insert(&NewItem {
                    name: name.to_string(),
                    price,
                    quantity,
                    category_id,
                    quantity_type,
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_export_uses_external_field_names() {
        let db = setup().await;
        seed(&db).await;

        let json = db.transfer().export_json().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["categories"].as_array().unwrap().len(), 2);
        let first_item = value["items"][0].clone();
        assert_eq!(first_item["name"], "Milk");
        assert_eq!(first_item["categoryId"], 1);
        assert_eq!(first_item["quantityTypeId"], 4);
    }

    #[tokio::test]
    async fn test_round_trip_into_fresh_store() {
        let source = setup().await;
        seed(&source).await;
        let json = source.transfer().export_json().await.unwrap();

        let target = setup().await;
        let summary = target.transfer().import_json(&json).await.unwrap();
        assert_eq!(summary, ImportSummary { categories: 2, items: 3 });

        let mut exported = source.items().list_all().await.unwrap();
        let mut imported = target.items().list_all().await.unwrap();
        assert_eq!(exported.len(), imported.len());

        exported.sort_by(|a, b| a.name.cmp(&b.name));
        imported.sort_by(|a, b| a.name.cmp(&b.name));
        for (a, b) in exported.iter().zip(&imported) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.price, b.price);
            assert_eq!(a.quantity, b.quantity);
            assert_eq!(a.quantity_type, b.quantity_type);
        }

        // Target kept its own default list and gained the two imported ones
        assert_eq!(target.categories().count().await.unwrap(), 3);
        let weekly = target
            .categories()
            .find_latest_by_name("Weekly")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(target.items().list_for_category(weekly.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_category_reference_rejected() {
        let db = setup().await;
        let json = r#"{
            "categories": [ { "id": 1, "name": "A" } ],
            "items": [ { "id": 1, "name": "X", "price": 1.0, "quantity": 1.0,
                         "categoryId": 5, "quantityTypeId": 1 } ]
        }"#;

        let err = db.transfer().import_json(json).await.unwrap_err();
        assert!(matches!(err, TransferError::UnknownCategory { category_id: 5, .. }));
        assert_eq!(db.categories().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_bad_unit_rolls_back_whole_import() {
        let db = setup().await;
        let json = r#"{
            "categories": [ { "id": 1, "name": "A" } ],
            "items": [
                { "id": 1, "name": "Ok", "price": 1.0, "quantity": 1.0, "categoryId": 1, "quantityTypeId": 1 },
                { "id": 2, "name": "Bad", "price": 1.0, "quantity": 1.0, "categoryId": 1, "quantityTypeId": 42 }
            ]
        }"#;

        let err = db.transfer().import_json(json).await.unwrap_err();
        assert!(matches!(
            err,
            TransferError::Db(DbError::ForeignKeyViolation { .. })
        ));
        assert_eq!(db.categories().count().await.unwrap(), 1);
        assert_eq!(db.items().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let db = setup().await;
        assert!(matches!(
            db.transfer().import_json("{\"categories\": 3}").await.unwrap_err(),
            TransferError::Json(_)
        ));
    }

    #[tokio::test]
    async fn test_extra_fields_are_ignored() {
        let db = setup().await;
        let json = r#"{ "version": 2, "categories": [ { "id": 9, "name": "B", "color": "red" } ], "items": [] }"#;
        let summary = db.transfer().import_json(json).await.unwrap();
        assert_eq!(summary.categories, 1);
    }
}
