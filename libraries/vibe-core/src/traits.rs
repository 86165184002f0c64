/// Core traits for Vibe
///
/// The reconciler talks to both persistence tiers, the network probe and the
/// clock only through these seams.
use crate::error::Result;
use crate::types::{OwnerId, ProgressRecord, PutStatus};
use async_trait::async_trait;

/// Device-scoped progress store
///
/// Always available; only fails on storage problems such as quota
/// exhaustion, never on connectivity.
#[async_trait]
pub trait LocalProgressTier: Send + Sync {
    /// Write or overwrite the record for its (owner, item) key
    ///
    /// A write older than the stored record is not applied and reports
    /// [`PutStatus::Superseded`].
    async fn put(&self, record: &ProgressRecord) -> Result<PutStatus>;

    /// All records stored for an owner (empty when there are none)
    async fn get_all(&self, owner_id: &OwnerId) -> Result<Vec<ProgressRecord>>;
}

/// Progress store shared by every device of an owner
///
/// Only reachable when the network is. Arrival order of writes is not
/// guaranteed, so implementations must keep the record with the latest
/// `updated_at` rather than the last one to arrive.
#[async_trait]
pub trait RemoteProgressTier: Send + Sync {
    /// Write or overwrite the record for its (owner, item) key
    async fn put(&self, record: &ProgressRecord) -> Result<PutStatus>;

    /// All records stored for an owner
    async fn get(&self, owner_id: &OwnerId) -> Result<Vec<ProgressRecord>>;
}

/// Cheap "is the network reachable right now" signal
///
/// A hint consulted before remote writes, not a guarantee the write will land.
pub trait ConnectivityProbe: Send + Sync {
    /// Whether a remote attempt is worth making
    fn is_online(&self) -> bool;
}

/// Source of `updated_at` stamps
pub trait Clock: Send + Sync {
    /// Current time in Unix epoch milliseconds
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
