//! Vibe Storage
//!
//! `SQLite` persistence for listening progress.
//!
//! The same schema backs two deployments: the device-local progress tier
//! (one database per device) and the shared store behind the progress
//! server. Both rely on the conditional upsert in [`progress::upsert`] to
//! keep `updated_at` non-decreasing per (owner, item).
//!
//! # Example
//!
//! ```rust,no_run
//! use vibe_storage::{create_pool, run_migrations, LocalProgressStore};
//! use vibe_core::{LocalProgressTier, OwnerId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://vibe.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = LocalProgressStore::new(pool);
//! let records = store.get_all(&OwnerId::new("user_123")).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

pub mod progress;

pub use context::LocalProgressStore;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://vibe.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    debug!("SQLite pool created");

    Ok(pool)
}
