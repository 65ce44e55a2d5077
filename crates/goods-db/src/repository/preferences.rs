//! # Preferences Repository
//!
//! Key-value storage for user preferences.
//!
//! ## Storage
//! ```text
//! ┌──────────────────────────────┬──────────────┐
//! │ key                          │ value        │
//! ├──────────────────────────────┼──────────────┤
//! │ theme                        │ dark         │
//! │ language                     │ russian      │
//! │ notification_duration_ms     │ 4000         │
//! │ selected_category_id         │ 3            │
//! │ sort_order                   │ unit_price   │
//! └──────────────────────────────┴──────────────┘
//! ```
//!
//! Missing keys read as their defaults. A value that no longer parses (hand
//! edited, or written by a newer build) is logged and also reads as the
//! default, so preferences never fail to load.

use std::str::FromStr;
use std::sync::Arc;

use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::notify::{ChangeTracker, Subscription, Table};
use goods_core::{Language, SortOrder, Theme, UserPreferences, DEFAULT_NOTIFICATION_DURATION_MS};

/// Preference keys as stored in the `preferences` table.
pub mod keys {
    pub const THEME: &str = "theme";
    pub const LANGUAGE: &str = "language";
    pub const NOTIFICATION_DURATION_MS: &str = "notification_duration_ms";
    pub const SELECTED_CATEGORY_ID: &str = "selected_category_id";
    pub const SORT_ORDER: &str = "sort_order";
}

/// Repository for user preferences.
#[derive(Debug, Clone)]
pub struct PreferencesRepository {
    pool: SqlitePool,
    tracker: Arc<ChangeTracker>,
}

impl PreferencesRepository {
    /// Creates a new PreferencesRepository.
    pub fn new(pool: SqlitePool, tracker: Arc<ChangeTracker>) -> Self {
        PreferencesRepository { pool, tracker }
    }

    /// Loads every preference, substituting defaults where needed.
    pub async fn load(&self) -> DbResult<UserPreferences> {
        load_preferences(&self.pool).await
    }

    /// Reads a raw value.
    pub async fn get_raw(&self, key: &str) -> DbResult<Option<String>> {
        get_value(&self.pool, key).await
    }

    /// Writes a raw value, replacing any previous one.
    pub async fn set_raw(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, value = %value, "Setting preference");
        put_value(&self.pool, key, value).await?;
        self.tracker.notify(&[Table::Preferences]);
        Ok(())
    }

    /// Removes a value so it reads as its default again.
    pub async fn remove(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM preferences WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        self.tracker.notify(&[Table::Preferences]);
        Ok(())
    }

    pub async fn set_theme(&self, theme: Theme) -> DbResult<()> {
        self.set_raw(keys::THEME, theme.as_str()).await
    }

    pub async fn set_language(&self, language: Language) -> DbResult<()> {
        self.set_raw(keys::LANGUAGE, language.as_str()).await
    }

    /// Stores the notification duration. Range checks happen in the caller.
    pub async fn set_notification_duration_ms(&self, duration_ms: u64) -> DbResult<()> {
        self.set_raw(keys::NOTIFICATION_DURATION_MS, &duration_ms.to_string())
            .await
    }

    /// Restores the default notification duration.
    pub async fn reset_notification_duration(&self) -> DbResult<()> {
        self.remove(keys::NOTIFICATION_DURATION_MS).await
    }

    pub async fn set_selected_category_id(&self, category_id: i64) -> DbResult<()> {
        self.set_raw(keys::SELECTED_CATEGORY_ID, &category_id.to_string())
            .await
    }

    pub async fn set_sort_order(&self, order: SortOrder) -> DbResult<()> {
        self.set_raw(keys::SORT_ORDER, order.as_str()).await
    }

    /// Writes every preference at once in a single transaction.
    pub async fn save(&self, prefs: &UserPreferences) -> DbResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        put_value(&mut *tx, keys::THEME, prefs.theme.as_str()).await?;
        put_value(&mut *tx, keys::LANGUAGE, prefs.language.as_str()).await?;
        put_value(
            &mut *tx,
            keys::NOTIFICATION_DURATION_MS,
            &prefs.notification_duration_ms.to_string(),
        )
        .await?;
        put_value(
            &mut *tx,
            keys::SELECTED_CATEGORY_ID,
            &prefs.selected_category_id.to_string(),
        )
        .await?;
        put_value(&mut *tx, keys::SORT_ORDER, prefs.sort_order.as_str()).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        self.tracker.notify(&[Table::Preferences]);
        Ok(())
    }

    /// Live query over the full preference set.
    pub fn subscribe(&self) -> Subscription<UserPreferences> {
        let pool = self.pool.clone();
        Subscription::new(self.tracker.clone(), &[Table::Preferences], move || {
            let pool = pool.clone();
            async move { load_preferences(&pool).await }
        })
    }
}

async fn load_preferences(pool: &SqlitePool) -> DbResult<UserPreferences> {
    let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM preferences")
        .fetch_all(pool)
        .await?;

    let mut prefs = UserPreferences::default();
    for (key, value) in rows {
        match key.as_str() {
            keys::THEME => prefs.theme = parse_or_default(&key, &value, prefs.theme),
            keys::LANGUAGE => prefs.language = parse_or_default(&key, &value, prefs.language),
            keys::NOTIFICATION_DURATION_MS => {
                prefs.notification_duration_ms =
                    parse_or_default(&key, &value, DEFAULT_NOTIFICATION_DURATION_MS)
            }
            keys::SELECTED_CATEGORY_ID => {
                prefs.selected_category_id =
                    parse_or_default(&key, &value, prefs.selected_category_id)
            }
            keys::SORT_ORDER => {
                prefs.sort_order = parse_or_default(&key, &value, prefs.sort_order)
            }
            _ => debug!(key = %key, "Ignoring unknown preference"),
        }
    }

    Ok(prefs)
}

fn parse_or_default<T: FromStr>(key: &str, value: &str, default: T) -> T {
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(key = %key, value = %value, "Unreadable preference, using default");
            default
        }
    }
}

async fn get_value(pool: &SqlitePool, key: &str) -> DbResult<Option<String>> {
    let value = sqlx::query_scalar("SELECT value FROM preferences WHERE key = ?1")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(value)
}

async fn put_value<'e, E>(executor: E, key: &str, value: &str) -> DbResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO preferences (key, value) VALUES (?1, ?2)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(executor)
    .await?;

    Ok(())
}
