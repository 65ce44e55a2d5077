//! # Quantity Unit Repository
//!
//! Read access to the quantity units seeded by the schema migration.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::notify::{ChangeTracker, Subscription, Table};
use goods_core::{QuantityUnit, Unit};

/// Repository for quantity units.
#[derive(Debug, Clone)]
pub struct QuantityUnitRepository {
    pool: SqlitePool,
    tracker: Arc<ChangeTracker>,
}

impl QuantityUnitRepository {
    /// Creates a new QuantityUnitRepository.
    pub fn new(pool: SqlitePool, tracker: Arc<ChangeTracker>) -> Self {
        QuantityUnitRepository { pool, tracker }
    }

    /// Lists all units in id order.
    pub async fn list(&self) -> DbResult<Vec<QuantityUnit>> {
        list_units(&self.pool).await
    }

    /// Gets a unit by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<QuantityUnit>> {
        let unit = sqlx::query_as::<_, QuantityUnit>(
            "SELECT id, name, multiplier FROM quantity_units WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(unit)
    }

    /// Gets the stored row for a unit by its symbol.
    pub async fn get_by_unit(&self, unit: Unit) -> DbResult<Option<QuantityUnit>> {
        let row = sqlx::query_as::<_, QuantityUnit>(
            "SELECT id, name, multiplier FROM quantity_units WHERE name = ?1",
        )
        .bind(unit.symbol())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Gets a unit by its symbol (`"g"`, `"KG"`, ...). Unknown symbols yield `None`.
    pub async fn get_by_symbol(&self, symbol: &str) -> DbResult<Option<QuantityUnit>> {
        match Unit::from_symbol(symbol) {
            Some(unit) => self.get_by_unit(unit).await,
            None => Ok(None),
        }
    }

    /// Live query over all units.
    ///
    /// Units never change at runtime, so after the first snapshot this only
    /// yields on close (`None`).
    pub fn subscribe(&self) -> Subscription<Vec<QuantityUnit>> {
        let pool = self.pool.clone();
        Subscription::new(self.tracker.clone(), &[Table::QuantityUnits], move || {
            let pool = pool.clone();
            async move { list_units(&pool).await }
        })
    }
}

async fn list_units(pool: &SqlitePool) -> DbResult<Vec<QuantityUnit>> {
    let units =
        sqlx::query_as::<_, QuantityUnit>("SELECT id, name, multiplier FROM quantity_units ORDER BY id")
            .fetch_all(pool)
            .await?;

    Ok(units)
}
