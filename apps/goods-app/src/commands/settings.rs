//! # Settings Commands
//!
//! Read and change user preferences.

use tracing::info;

use crate::error::ApiError;
use crate::state::DbState;
use goods_core::validation::validate_notification_duration;
use goods_core::{Language, SortOrder, Theme, UserPreferences};

/// Current preferences, with defaults for anything unset.
pub async fn get_preferences(db: &DbState) -> Result<UserPreferences, ApiError> {
    Ok(db.inner().preferences().load().await?)
}

pub async fn set_theme(db: &DbState, theme: Theme) -> Result<(), ApiError> {
    db.inner().preferences().set_theme(theme).await?;
    info!(theme = theme.as_str(), "Theme changed");
    Ok(())
}

pub async fn set_language(db: &DbState, language: Language) -> Result<(), ApiError> {
    db.inner().preferences().set_language(language).await?;
    info!(language = language.as_str(), "Language changed");
    Ok(())
}

/// Sets how long notifications stay visible.
///
/// ## Errors
/// `VALIDATION_ERROR` outside 1000..=10000 ms.
pub async fn set_notification_duration(db: &DbState, duration_ms: u64) -> Result<(), ApiError> {
    validate_notification_duration(duration_ms)?;
    db.inner()
        .preferences()
        .set_notification_duration_ms(duration_ms)
        .await?;
    Ok(())
}

/// Restores the default notification duration.
pub async fn reset_notification_duration(db: &DbState) -> Result<u64, ApiError> {
    let prefs = db.inner().preferences();
    prefs.reset_notification_duration().await?;
    Ok(prefs.load().await?.notification_duration_ms)
}

pub async fn set_sort_order(db: &DbState, order: SortOrder) -> Result<(), ApiError> {
    db.inner().preferences().set_sort_order(order).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use goods_core::DEFAULT_NOTIFICATION_DURATION_MS;
    use goods_db::{Database, DbConfig};

    async fn setup() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    #[tokio::test]
    async fn test_changes_are_persisted() {
        let db = setup().await;
        set_theme(&db, Theme::Dark).await.unwrap();
        set_language(&db, Language::Russian).await.unwrap();
        set_sort_order(&db, SortOrder::Price).await.unwrap();

        let prefs = get_preferences(&db).await.unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.language, Language::Russian);
        assert_eq!(prefs.sort_order, SortOrder::Price);
    }

    #[tokio::test]
    async fn test_duration_bounds() {
        let db = setup().await;
        let err = set_notification_duration(&db, 50).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        set_notification_duration(&db, 7_000).await.unwrap();
        assert_eq!(get_preferences(&db).await.unwrap().notification_duration_ms, 7_000);

        assert_eq!(
            reset_notification_duration(&db).await.unwrap(),
            DEFAULT_NOTIFICATION_DURATION_MS
        );
    }
}
