//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! ## Thread Safety
//! The `Database` struct from `goods-db` contains a `SqlitePool` which
//! is inherently thread-safe. Multiple commands can execute queries
//! concurrently without explicit locking.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn list_categories(db: &DbState) -> Result<Vec<Category>, ApiError> {
//!     Ok(db.inner().categories().list().await?)
//! }
//! ```

use goods_db::Database;

/// Wrapper around `Database` owned by the composition root.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
