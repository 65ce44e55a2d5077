//! # User Preferences
//!
//! Values persisted in the key-value preferences store.
//!
//! Every value has a stable storage string (`as_str` / `FromStr`) so the
//! store can keep plain text, and a default used whenever a key is missing.
//! Display strings (localized theme names, etc.) are not part of this crate.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::{DEFAULT_NOTIFICATION_DURATION_MS, DEFAULT_SELECTED_CATEGORY_ID};

fn not_allowed(field: &str, allowed: &[&str]) -> ValidationError {
    ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Follow the platform setting.
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(not_allowed("theme", &["system", "light", "dark"])),
        }
    }
}

// =============================================================================
// Language
// =============================================================================

/// Interface language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    Russian,
}

impl Language {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Russian => "russian",
        }
    }

    /// BCP 47 tag handed to the platform locale API.
    pub const fn locale_tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
        }
    }

    /// Maps a locale tag back to a language. Unknown tags fall back to English.
    pub fn from_locale_tag(tag: &str) -> Language {
        match tag.trim().to_ascii_lowercase().split(['-', '_']).next() {
            Some("ru") => Language::Russian,
            _ => Language::English,
        }
    }
}

impl std::str::FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "russian" | "ru" => Ok(Language::Russian),
            _ => Err(not_allowed("language", &["english", "russian"])),
        }
    }
}

// =============================================================================
// Sort Order
// =============================================================================

/// Order in which a category's items are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Order of insertion (item id).
    #[default]
    Added,
    Name,
    Price,
    /// Normalized unit price, cheapest first.
    UnitPrice,
}

impl SortOrder {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Added => "added",
            SortOrder::Name => "name",
            SortOrder::Price => "price",
            SortOrder::UnitPrice => "unit_price",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "added" => Ok(SortOrder::Added),
            "name" => Ok(SortOrder::Name),
            "price" => Ok(SortOrder::Price),
            "unit_price" => Ok(SortOrder::UnitPrice),
            _ => Err(not_allowed(
                "sort_order",
                &["added", "name", "price", "unit_price"],
            )),
        }
    }
}

// =============================================================================
// User Preferences
// =============================================================================

/// The full set of user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    pub language: Language,
    /// How long notifications stay visible, in milliseconds.
    pub notification_duration_ms: u64,
    /// Last category the user had open.
    pub selected_category_id: i64,
    pub sort_order: SortOrder,
}

impl Default for UserPreferences {
    fn default() -> Self {
        UserPreferences {
            theme: Theme::default(),
            language: Language::default(),
            notification_duration_ms: DEFAULT_NOTIFICATION_DURATION_MS,
            selected_category_id: DEFAULT_SELECTED_CATEGORY_ID,
            sort_order: SortOrder::default(),
        }
    }
}
