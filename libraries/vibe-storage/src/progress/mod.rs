//! Progress record persistence
//!
//! One row per (owner, content item). Writes overwrite the row unless the
//! stored row is strictly newer, so replayed or out-of-order writes cannot
//! move a record backwards in time.
//!
//! # Example
//!
//! ```rust,no_run
//! use vibe_storage::progress;
//! use vibe_core::{ContentItemId, OwnerId, ProgressRecord};
//! # async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! let record = ProgressRecord::new(
//!     OwnerId::new("user_123"),
//!     ContentItemId::new("b1"),
//!     2,
//!     340.0,
//!     1800.0,
//!     1_700_000_000_000,
//! );
//! progress::upsert(pool, &record).await?;
//!
//! let all = progress::get_all(pool, &OwnerId::new("user_123")).await?;
//! # Ok(())
//! # }
//! ```

use sqlx::SqlitePool;
use tracing::debug;
use vibe_core::types::{ContentItemId, OwnerId, ProgressRecord, PutStatus};

use crate::error::{Result, StorageError};

#[derive(sqlx::FromRow)]
struct ProgressRow {
    owner_id: String,
    content_item_id: String,
    part_index: i64,
    position: f64,
    total_duration: f64,
    updated_at: i64,
}

impl TryFrom<ProgressRow> for ProgressRecord {
    type Error = StorageError;

    fn try_from(row: ProgressRow) -> Result<Self> {
        let part_index = u32::try_from(row.part_index).map_err(|_| {
            StorageError::InvalidRow(format!(
                "part_index {} out of range for {}/{}",
                row.part_index, row.owner_id, row.content_item_id
            ))
        })?;

        Ok(ProgressRecord::new(
            OwnerId::new(row.owner_id),
            ContentItemId::new(row.content_item_id),
            part_index,
            row.position,
            row.total_duration,
            row.updated_at,
        ))
    }
}

/// Write or overwrite a record
///
/// Returns [`PutStatus::Superseded`] without changing anything when the
/// stored record has a strictly later `updated_at`. Equal timestamps are
/// re-applied, which makes repeating a write idempotent.
pub async fn upsert(pool: &SqlitePool, record: &ProgressRecord) -> Result<PutStatus> {
    let record = record.clone().normalized();

    let result = sqlx::query(
        "INSERT INTO progress_records
         (owner_id, content_item_id, part_index, position, total_duration, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)
         ON CONFLICT(owner_id, content_item_id)
         DO UPDATE SET
            part_index = excluded.part_index,
            position = excluded.position,
            total_duration = excluded.total_duration,
            updated_at = excluded.updated_at
         WHERE excluded.updated_at >= progress_records.updated_at",
    )
    .bind(record.owner_id.as_str())
    .bind(record.content_item_id.as_str())
    .bind(i64::from(record.part_index))
    .bind(record.position)
    .bind(record.total_duration)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    let status = if result.rows_affected() > 0 {
        PutStatus::Applied
    } else {
        PutStatus::Superseded
    };

    debug!(
        owner_id = %record.owner_id,
        content_item_id = %record.content_item_id,
        updated_at = record.updated_at,
        ?status,
        "Upserted progress record"
    );

    Ok(status)
}

/// Get all records for an owner, most recently updated first
///
/// Returns an empty vec when the owner has no progress.
pub async fn get_all(pool: &SqlitePool, owner_id: &OwnerId) -> Result<Vec<ProgressRecord>> {
    let rows = sqlx::query_as::<_, ProgressRow>(
        "SELECT owner_id, content_item_id, part_index, position, total_duration, updated_at
         FROM progress_records
         WHERE owner_id = ?
         ORDER BY updated_at DESC, content_item_id",
    )
    .bind(owner_id.as_str())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ProgressRecord::try_from).collect()
}

/// Get the record for one (owner, item) pair
pub async fn get(
    pool: &SqlitePool,
    owner_id: &OwnerId,
    content_item_id: &ContentItemId,
) -> Result<Option<ProgressRecord>> {
    let row = sqlx::query_as::<_, ProgressRow>(
        "SELECT owner_id, content_item_id, part_index, position, total_duration, updated_at
         FROM progress_records
         WHERE owner_id = ? AND content_item_id = ?",
    )
    .bind(owner_id.as_str())
    .bind(content_item_id.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(ProgressRecord::try_from).transpose()
}

/// Count records for an owner
pub async fn count(pool: &SqlitePool, owner_id: &OwnerId) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM progress_records WHERE owner_id = ?")
        .bind(owner_id.as_str())
        .fetch_one(pool)
        .await?;

    Ok(count)
}
