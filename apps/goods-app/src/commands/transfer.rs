//! # Import / Export Commands
//!
//! Write the whole store to a JSON file and read it back.
//!
//! The UI picks the path; [`suggested_export_file_name`] supplies a default
//! file name such as `goods-export-20261016-093015.json`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::{AppConfig, DbState};
use goods_db::{ImportSummary, TransferError};

/// Result of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub path: PathBuf,
    pub categories: usize,
    pub items: usize,
}

/// Default export file name for a moment in time.
pub fn suggested_export_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("goods-export-{}.json", at.format("%Y%m%d-%H%M%S"))
}

/// Default export path: the data directory plus a time-stamped name.
pub fn default_export_path(config: &AppConfig) -> Result<PathBuf, ApiError> {
    Ok(config
        .data_dir()?
        .join(suggested_export_file_name(&Local::now())))
}

/// Exports every list and item to `path`, replacing the file if it exists.
pub async fn export_to_path(db: &DbState, path: &Path) -> Result<ExportReport, ApiError> {
    let document = db
        .inner()
        .transfer()
        .export_document()
        .await
        .map_err(ApiError::export_failed)?;
    let json = document.to_json().map_err(ApiError::export_failed)?;

    tokio::fs::write(path, json)
        .await
        .map_err(|e| ApiError::export_failed(TransferError::Io(e)))?;

    info!(path = %path.display(), "Export written");
    Ok(ExportReport {
        path: path.to_path_buf(),
        categories: document.categories.len(),
        items: document.items.len(),
    })
}

/// Imports lists and items from `path`. On any failure nothing is imported.
pub async fn import_from_path(db: &DbState, path: &Path) -> Result<ImportSummary, ApiError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ApiError::import_failed(TransferError::Io(e)))?;

    let summary = db
        .inner()
        .transfer()
        .import_json(&json)
        .await
        .map_err(ApiError::import_failed)?;

    info!(path = %path.display(), ?summary, "Import finished");
    Ok(summary)
}
