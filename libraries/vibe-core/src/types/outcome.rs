/// Explicit outcomes for tier writes and merged reads
///
/// Tier failures never reach the playback layer as errors. Instead every
/// write and read reports how far it got, so callers can tell success from
/// degradation without catching anything.
use serde::Serialize;
use std::collections::HashMap;

use super::ids::ContentItemId;
use super::progress::ProgressRecord;

/// Result of a single tier `put`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PutStatus {
    /// The record now holds the written value
    Applied,
    /// The tier already held a strictly newer record; nothing changed
    Superseded,
}

/// What happened to the local-tier half of a write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LocalWrite {
    /// Written to the device store
    Stored,
    /// The device store already had a newer record
    Superseded,
    /// The write was dropped (e.g. quota exhausted); playback continues
    Dropped { warning: String },
}

/// What happened to the remote-tier half of a write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RemoteWrite {
    /// Accepted by the remote store
    Synced,
    /// The remote store already had a newer record
    Superseded,
    /// Connectivity was down, no attempt was made
    Offline,
    /// Attempted but failed or timed out; the local tier is the backstop
    Degraded { reason: String },
}

impl RemoteWrite {
    /// Whether the remote store has seen this write
    pub fn reached_remote(&self) -> bool {
        matches!(self, Self::Synced | Self::Superseded)
    }
}

/// Result of `record_progress`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum RecordOutcome {
    /// Position was below the persistence threshold; no tier was touched
    Suppressed { position: f64 },
    /// The record was stamped and routed to the tiers
    Recorded {
        record: ProgressRecord,
        local: LocalWrite,
        remote: RemoteWrite,
    },
}

impl RecordOutcome {
    /// The persisted record, if any
    pub fn record(&self) -> Option<&ProgressRecord> {
        match self {
            Self::Suppressed { .. } => None,
            Self::Recorded { record, .. } => Some(record),
        }
    }
}

/// How the remote half of a merged read went
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RemoteRead {
    /// Remote records were fetched
    Fetched { count: usize },
    /// The remote read failed; the view is local-only
    Degraded { reason: String },
}

/// One authoritative record per content item, merged from both tiers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedProgress {
    /// Winning record per content item (order not significant)
    pub records: HashMap<ContentItemId, ProgressRecord>,
    /// Whether remote data contributed to the view
    pub remote: RemoteRead,
}

impl MergedProgress {
    /// Get the merged record for an item
    pub fn get(&self, id: &ContentItemId) -> Option<&ProgressRecord> {
        self.records.get(id)
    }

    /// Number of items with progress
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no item has progress
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ordered most recent first, ties broken by item id
    pub fn most_recent_first(self) -> Vec<ProgressRecord> {
        let mut records: Vec<ProgressRecord> = self.records.into_values().collect();
        records.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.content_item_id.cmp(&b.content_item_id))
        });
        records
    }
}
