//! Write routing and merged reads across the local and remote tiers

use std::sync::Arc;
use tracing::{debug, warn};
use vibe_core::{
    Clock, ConnectivityProbe, ContentItemId, LocalProgressTier, LocalWrite, MergedProgress,
    OwnerId, ProgressRecord, PutStatus, RecordOutcome, RemoteProgressTier, RemoteRead,
    RemoteWrite, SystemClock, VibeError,
};

use crate::config::ProgressConfig;
use crate::merge::merge_tiers;

/// Single authority on where progress lands and which record wins
///
/// Nothing a tier returns escapes as an error. Failures are logged and
/// reported through the outcome types instead, so a caller in the middle of
/// playback never has to handle a tier failure.
#[derive(Clone)]
pub struct Reconciler {
    local: Arc<dyn LocalProgressTier>,
    remote: Arc<dyn RemoteProgressTier>,
    connectivity: Arc<dyn ConnectivityProbe>,
    clock: Arc<dyn Clock>,
    config: ProgressConfig,
}

impl Reconciler {
    /// Create a reconciler stamping records with the system clock
    pub fn new(
        local: Arc<dyn LocalProgressTier>,
        remote: Arc<dyn RemoteProgressTier>,
        connectivity: Arc<dyn ConnectivityProbe>,
        config: ProgressConfig,
    ) -> Self {
        Self {
            local,
            remote,
            connectivity,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the clock used for `updated_at` stamps
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    /// Persist the current playback position for an item, stamped now
    pub async fn record_progress(
        &self,
        owner_id: &OwnerId,
        content_item_id: &ContentItemId,
        part_index: u32,
        position: f64,
        total_duration: f64,
    ) -> RecordOutcome {
        let record = ProgressRecord::new(
            owner_id.clone(),
            content_item_id.clone(),
            part_index,
            position,
            total_duration,
            self.clock.now_millis(),
        );

        self.record(record).await
    }

    /// Write an already stamped record to both tiers
    ///
    /// Positions under `min_position_secs` are suppressed without touching
    /// either tier, so a near-zero position never overwrites a real one.
    pub async fn record(&self, record: ProgressRecord) -> RecordOutcome {
        let record = record.normalized();

        if record.position < self.config.min_position_secs {
            debug!(
                content_item_id = %record.content_item_id,
                position = record.position,
                "Skipping progress below threshold"
            );
            return RecordOutcome::Suppressed {
                position: record.position,
            };
        }

        // Local first; it must land before the caller gets control back
        let local = self.write_local(&record).await;
        let remote = self.write_remote(&record).await;

        RecordOutcome::Recorded {
            record,
            local,
            remote,
        }
    }

    async fn write_local(&self, record: &ProgressRecord) -> LocalWrite {
        let error = match self.local.put(record).await {
            Ok(PutStatus::Applied) => return LocalWrite::Stored,
            Ok(PutStatus::Superseded) => {
                debug!(
                    content_item_id = %record.content_item_id,
                    "Local tier holds newer progress"
                );
                return LocalWrite::Superseded;
            }
            Err(e) => e,
        };

        let warning = match &error {
            VibeError::QuotaExceeded(_) => {
                format!("Local storage full, progress not saved: {}", error)
            }
            _ => format!("Local progress write failed: {}", error),
        };
        warn!(
            content_item_id = %record.content_item_id,
            error = %error,
            "Dropped local progress write"
        );

        LocalWrite::Dropped { warning }
    }

    async fn write_remote(&self, record: &ProgressRecord) -> RemoteWrite {
        if !self.connectivity.is_online() {
            debug!(
                content_item_id = %record.content_item_id,
                "Offline, skipping remote write"
            );
            return RemoteWrite::Offline;
        }

        let timeout = self.config.remote_timeout;
        let error = match tokio::time::timeout(timeout, self.remote.put(record)).await {
            Ok(Ok(PutStatus::Applied)) => return RemoteWrite::Synced,
            Ok(Ok(PutStatus::Superseded)) => return RemoteWrite::Superseded,
            Ok(Err(e)) => e,
            Err(_) => VibeError::Timeout(timeout),
        };

        warn!(
            content_item_id = %record.content_item_id,
            error = %error,
            "Remote progress write failed"
        );

        RemoteWrite::Degraded {
            reason: error.to_string(),
        }
    }

    /// One authoritative record per content item for an owner
    ///
    /// The remote tier is always asked, whatever the connectivity flag says.
    /// When it cannot answer the view falls back to local records and
    /// `remote` reports why.
    pub async fn get_merged_progress(&self, owner_id: &OwnerId) -> MergedProgress {
        let (remote_records, remote) = self.fetch_remote(owner_id).await;

        let local_records = match self.local.get_all(owner_id).await {
            Ok(records) => records,
            Err(e) => {
                warn!(owner_id = %owner_id, error = %e, "Local progress read failed");
                Vec::new()
            }
        };

        let records = merge_tiers(owner_id, remote_records, local_records);
        debug!(owner_id = %owner_id, records = records.len(), "Merged progress");

        MergedProgress { records, remote }
    }

    async fn fetch_remote(&self, owner_id: &OwnerId) -> (Vec<ProgressRecord>, RemoteRead) {
        let timeout = self.config.remote_timeout;
        let error = match tokio::time::timeout(timeout, self.remote.get(owner_id)).await {
            Ok(Ok(records)) => {
                let count = records.len();
                return (records, RemoteRead::Fetched { count });
            }
            Ok(Err(e)) => e,
            Err(_) => VibeError::Timeout(timeout),
        };

        warn!(
            owner_id = %owner_id,
            error = %error,
            "Remote progress read failed, using local only"
        );
        (
            Vec::new(),
            RemoteRead::Degraded {
                reason: error.to_string(),
            },
        )
    }

    /// Where playback of an item should resume, if anywhere
    ///
    /// `None` means start from the beginning. Callers must still check the
    /// part index against the item's current parts.
    pub async fn find_resume_point(
        &self,
        owner_id: &OwnerId,
        content_item_id: &ContentItemId,
    ) -> Option<ProgressRecord> {
        self.get_merged_progress(owner_id)
            .await
            .records
            .remove(content_item_id)
    }

    /// Merged records, most recently touched first
    pub async fn continue_listening(&self, owner_id: &OwnerId) -> Vec<ProgressRecord> {
        self.get_merged_progress(owner_id).await.most_recent_first()
    }
}
