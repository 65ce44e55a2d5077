//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Lifecycle                                 │
//! │                                                                         │
//! │  Composition root (goods-app)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       ├── create pool (WAL, foreign keys ON)                           │
//! │       ├── run migrations (schema + seeded quantity units)              │
//! │       └── ensure a default category exists                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.categories() / db.items() / db.units() / db.preferences()          │
//! │  db.transfer()                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.close().await ← ends subscriptions, closes the pool                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File databases use SQLite WAL (Write-Ahead Logging) so live-query reads
//! do not block writes. In-memory databases keep the default journal.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationStatus};
use crate::notify::ChangeTracker;
use crate::repository::category::CategoryRepository;
use crate::repository::item::ItemRepository;
use crate::repository::preferences::PreferencesRepository;
use crate::repository::quantity_unit::QuantityUnitRepository;
use crate::transfer::TransferService;

const IN_MEMORY_PATH: &str = ":memory:";

/// Name given to the category created when none exists.
pub const DEFAULT_CATEGORY_NAME: &str = "List";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/goods.db")
///     .max_connections(4)
///     .default_category_name("Список");
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 4 (one app, a few live queries)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps connections.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,

    /// Name of the category created when the store has none. The UI passes
    /// a localized placeholder here.
    /// Default: "List"
    pub default_category_name: String,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
            default_category_name: DEFAULT_CATEGORY_NAME.to_string(),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Sets the name of the default category.
    pub fn default_category_name(mut self, name: impl Into<String>) -> Self {
        self.default_category_name = name.into();
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let config = DbConfig::in_memory();
    /// let db = Database::new(config).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            // Closing the last connection would drop the data
            idle_timeout: None,
            run_migrations: true,
            default_category_name: DEFAULT_CATEGORY_NAME.to_string(),
        }
    }

    /// Whether this configuration points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_PATH)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                // WAL mode: readers don't block writers
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true)
        };

        // SQLite has foreign keys disabled by default; cascades depend on them
        Ok(options.foreign_keys(true))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// The handle is cheap to clone. All clones share one pool and one
/// [`ChangeTracker`], so a write through any clone reaches every
/// subscription.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    tracker: Arc<ChangeTracker>,
    default_category_name: Arc<str>,
}

impl Database {
    /// Opens the database.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Creates the connection pool (WAL, foreign keys on)
    /// 3. Runs migrations (if enabled), which seed the quantity units
    /// 4. Creates the default category if there is none
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_options = config.connect_options()?;
        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);
        if config.is_in_memory() {
            pool_options = pool_options.max_lifetime(None::<Duration>);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database {
            pool,
            tracker: Arc::new(ChangeTracker::new()),
            default_category_name: Arc::from(config.default_category_name.as_str()),
        };

        if config.run_migrations {
            db.run_migrations().await?;
            db.categories().ensure_default().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// ## When To Call
    /// - Automatically called by `new()` if `run_migrations` is true
    /// - Manually call when migrations are disabled in config
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Reports embedded versus applied migrations.
    pub async fn migration_status(&self) -> DbResult<MigrationStatus> {
        migrations::migration_status(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    ///
    /// Writes made directly through the pool are not seen by subscriptions
    /// unless followed by [`ChangeTracker::notify`].
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the shared change tracker.
    pub fn tracker(&self) -> &Arc<ChangeTracker> {
        &self.tracker
    }

    /// Returns the category repository.
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(
            self.pool.clone(),
            self.tracker.clone(),
            self.default_category_name.clone(),
        )
    }

    /// Returns the item repository.
    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.pool.clone(), self.tracker.clone())
    }

    /// Returns the quantity unit repository.
    pub fn units(&self) -> QuantityUnitRepository {
        QuantityUnitRepository::new(self.pool.clone(), self.tracker.clone())
    }

    /// Returns the preferences repository.
    pub fn preferences(&self) -> PreferencesRepository {
        PreferencesRepository::new(self.pool.clone(), self.tracker.clone())
    }

    /// Returns the import/export service.
    pub fn transfer(&self) -> TransferService {
        TransferService::new(self.pool.clone(), self.tracker.clone())
    }

    /// Closes the database.
    ///
    /// ## Note
    /// Pending and future `Subscription::next` calls return `None`, and all
    /// repository operations fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.tracker.close();
        self.pool.close().await;
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_new_database_has_default_category_and_units() {
        let db = Database::new(DbConfig::in_memory().default_category_name("Список"))
            .await
            .unwrap();

        let categories = db.categories().list().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[0].name, "Список");

        assert_eq!(db.units().list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_close_marks_database_closed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(db.is_closed());
        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_file_database_persists_between_opens() {
        let path = std::env::temp_dir().join(format!("goods-db-test-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.categories().insert("Weekend").await.unwrap();
        db.close().await;

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let names: Vec<String> = db
            .categories()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["List".to_string(), "Weekend".to_string()]);
        db.close().await;

        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .default_category_name("Groceries");

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.default_category_name, "Groceries");
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }
}
