//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GOODS_*`)
//! 2. Platform data directory (`directories::ProjectDirs`)
//! 3. Defaults (this file)
//!
//! User-editable settings (theme, language, ...) are not configuration:
//! they live in the database preferences table.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use goods_db::{DbConfig, DEFAULT_CATEGORY_NAME};

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "goods.db";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Explicit database file. Wins over `data_dir`.
    pub database_path: Option<PathBuf>,

    /// Directory holding the database. `None` means the platform default.
    pub data_dir: Option<PathBuf>,

    /// Name of the list created when none exist (localized by the UI).
    pub default_list_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            data_dir: None,
            default_list_name: DEFAULT_CATEGORY_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Creates a new AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `GOODS_DB_PATH`: Use this database file
    /// - `GOODS_DATA_DIR`: Keep `goods.db` in this directory
    /// - `GOODS_DEFAULT_LIST_NAME`: Name of the default list
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key lookup (used by `from_env`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("GOODS_DB_PATH").filter(|v| !v.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("GOODS_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(name) = lookup("GOODS_DEFAULT_LIST_NAME") {
            let name = name.trim();
            if !name.is_empty() {
                config.default_list_name = name.to_string();
            }
        }

        config
    }

    /// Determines the database file path.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.goods.calculator/goods.db`
    /// - **Windows**: `%APPDATA%\goods\calculator\data\goods.db`
    /// - **Linux**: `~/.local/share/calculator/goods.db`
    pub fn database_path(&self) -> Result<PathBuf, ApiError> {
        if let Some(ref path) = self.database_path {
            return Ok(path.clone());
        }

        Ok(self.data_dir()?.join(DATABASE_FILE_NAME))
    }

    /// Directory holding the database and default export location.
    pub fn data_dir(&self) -> Result<PathBuf, ApiError> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        if let Some(dir) = self.database_path.as_deref().and_then(Path::parent) {
            return Ok(dir.to_path_buf());
        }

        let proj_dirs = ProjectDirs::from("com", "goods", "calculator")
            .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Database configuration for the resolved path.
    pub fn db_config(&self) -> Result<DbConfig, ApiError> {
        Ok(DbConfig::new(self.database_path()?).default_category_name(&self.default_list_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_list_name, "List");
    }

    #[test]
    fn test_db_path_override_wins() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GOODS_DB_PATH", "/tmp/custom.db"),
            ("GOODS_DATA_DIR", "/var/goods"),
        ]));
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/custom.db"));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/var/goods"));
    }

    #[test]
    fn test_data_dir_override() {
        let config = AppConfig::from_lookup(lookup(&[("GOODS_DATA_DIR", "/var/goods")]));
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/var/goods").join(DATABASE_FILE_NAME)
        );
    }

    #[test]
    fn test_blank_list_name_ignored() {
        let config = AppConfig::from_lookup(lookup(&[("GOODS_DEFAULT_LIST_NAME", "  ")]));
        assert_eq!(config.default_list_name, "List");

        let config = AppConfig::from_lookup(lookup(&[
            ("GOODS_DEFAULT_LIST_NAME", "Список"),
            ("GOODS_DATA_DIR", "/var/goods"),
        ]));
        let db_config = config.db_config().unwrap();
        assert_eq!(db_config.default_category_name, "Список");
        assert!(db_config.database_path.ends_with(DATABASE_FILE_NAME));
    }
}
