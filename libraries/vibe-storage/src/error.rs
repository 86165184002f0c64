/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// SQLite primary result code for a full database or disk
const SQLITE_FULL: &str = "13";

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// The database or the disk under it is full
    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Stored row failed validation
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if is_quota_error(&err) {
            return Self::QuotaExceeded(err.to_string());
        }
        Self::Database(err)
    }
}

fn is_quota_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(SQLITE_FULL)
                || db_err.message().contains("database or disk is full")
        }
        _ => false,
    }
}

impl From<StorageError> for vibe_core::VibeError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::QuotaExceeded(msg) => vibe_core::VibeError::quota_exceeded(msg),
            other => vibe_core::VibeError::storage(other.to_string()),
        }
    }
}
