//! # Goods App Library
//!
//! Application layer for Goods Calculator: startup, configuration, view
//! state, and the commands the UI calls.
//!
//! ## Module Organization
//! ```text
//! goods_app/
//! ├── lib.rs          ◄─── You are here (startup & logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (env, data directory)
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── home.rs     ◄─── Home screen view + live feed
//! │   └── entry.rs    ◄─── Item entry form state
//! ├── commands/
//! │   ├── category.rs ◄─── List commands
//! │   ├── item.rs     ◄─── Item commands
//! │   ├── settings.rs ◄─── Preference commands
//! │   └── transfer.rs ◄─── Export / import commands
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

pub use error::{ApiError, ErrorCode};
use goods_db::Database;
pub use state::{AppConfig, DbState, HomeFeed, HomeView, ItemEntry};

/// A started application: configuration plus the open database.
#[derive(Debug, Clone)]
pub struct GoodsApp {
    pub config: AppConfig,
    pub db: DbState,
}

impl GoodsApp {
    /// Starts the application.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │                       Application Startup                               │
    /// │                                                                         │
    /// │  1. Determine Database Path ──────────────────────────────────────────► │
    /// │     • GOODS_DB_PATH / GOODS_DATA_DIR overrides                          │
    /// │     • Otherwise the platform data directory                             │
    /// │                                                                         │
    /// │  2. Connect to Database ──────────────────────────────────────────────► │
    /// │     • SQLite with WAL mode                                              │
    /// │     • Run pending migrations (seeds quantity units)                     │
    /// │     • Create the default list if there is none                          │
    /// │                                                                         │
    /// │  3. Wrap in DbState for commands                                        │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// Logging is not initialized here; call [`init_tracing`] first.
    pub async fn start(config: AppConfig) -> Result<Self, ApiError> {
        info!("Starting Goods Calculator");

        let db_config = config.db_config()?;
        info!(db_path = %db_config.database_path.display(), "Database path determined");

        if let Some(dir) = db_config.database_path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await.map_err(|e| {
                    ApiError::internal(format!("Could not create data directory: {}", e))
                })?;
            }
        }

        let db = Database::new(db_config).await?;
        info!("Database connected and migrations applied");

        Ok(GoodsApp {
            config,
            db: DbState::new(db),
        })
    }

    /// Live home screen feed.
    pub fn home_feed(&self) -> HomeFeed {
        HomeFeed::new(self.db.inner())
    }

    /// Closes the database; every live feed ends.
    pub async fn shutdown(&self) {
        info!("Shutting down Goods Calculator");
        self.db.inner().close().await;
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=goods=trace` - Show trace for goods crates only
/// - Default: INFO, with debug for goods crates
///
/// Safe to call more than once; later calls leave the first subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,goods=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
