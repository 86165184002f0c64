//! Playback session: one content item being listened to
//!
//! A session owns everything about the active playback (which item, which
//! part, the ticker task) and hands the reconciler plain snapshots. Dropping
//! the session stops its ticker.

use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use vibe_core::{
    finite_or_zero, ContentItem, ContentItemId, OwnerId, Part, ProgressRecord, RecordOutcome,
    Result, VibeError,
};

use crate::reconciler::Reconciler;

/// Platform media primitive (an audio element, a decoder, a test double)
///
/// Methods take `&self` because the ticker task shares the element with the
/// session; implementations use interior mutability.
pub trait MediaElement: Send + Sync + 'static {
    /// Elapsed seconds within the loaded part
    fn current_time(&self) -> f64;

    /// Duration of the loaded part in seconds; NaN or 0 when not yet known
    fn duration(&self) -> f64;

    fn is_paused(&self) -> bool;

    fn set_current_time(&self, seconds: f64);

    /// Load a part and start it at `start_at` seconds
    fn load_part(&self, index: u32, part: &Part, start_at: f64);

    fn pause(&self);
}

/// Plain data view of a session at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub content_item_id: ContentItemId,
    pub part_index: u32,
    pub position: f64,
    pub total_duration: f64,
}

/// Where a session begins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResumePoint {
    pub part_index: u32,
    pub position: f64,
}

impl ResumePoint {
    pub const START: Self = Self {
        part_index: 0,
        position: 0.0,
    };

    /// Validate a stored record against the item's current part list
    ///
    /// A record pointing at a part that no longer exists restarts from the
    /// beginning of the item.
    pub fn resolve(record: Option<&ProgressRecord>, item: &ContentItem) -> Self {
        match record {
            Some(record) if item.has_part(record.part_index) => Self {
                part_index: record.part_index,
                position: record.position,
            },
            _ => Self::START,
        }
    }
}

struct SessionInner<M> {
    reconciler: Reconciler,
    owner_id: OwnerId,
    item: ContentItem,
    media: M,
    part_index: AtomicU32,
}

impl<M: MediaElement> SessionInner<M> {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            content_item_id: self.item.id.clone(),
            part_index: self.part_index.load(Ordering::SeqCst),
            position: finite_or_zero(self.media.current_time()),
            total_duration: finite_or_zero(self.media.duration()),
        }
    }

    async fn flush(&self) -> RecordOutcome {
        let snapshot = self.snapshot();
        self.reconciler
            .record_progress(
                &self.owner_id,
                &snapshot.content_item_id,
                snapshot.part_index,
                snapshot.position,
                snapshot.total_duration,
            )
            .await
    }
}

/// Active playback of one content item
pub struct PlaybackSession<M: MediaElement> {
    inner: Arc<SessionInner<M>>,
    ticker: Option<JoinHandle<()>>,
}

impl<M: MediaElement> PlaybackSession<M> {
    /// Open an item at its resume point and load that part into `media`
    pub async fn start(
        reconciler: Reconciler,
        owner_id: OwnerId,
        item: ContentItem,
        media: M,
    ) -> Result<Self> {
        let Some(first) = item.part(0) else {
            return Err(VibeError::invalid_input(format!(
                "content item {} has no parts",
                item.id
            )));
        };

        let stored = reconciler.find_resume_point(&owner_id, &item.id).await;
        let resume = ResumePoint::resolve(stored.as_ref(), &item);
        if stored.is_some() && resume == ResumePoint::START {
            debug!(content_item_id = %item.id, "Stored part no longer exists, starting over");
        }

        let part = item.part(resume.part_index).unwrap_or(first);
        media.load_part(resume.part_index, part, resume.position);

        info!(
            content_item_id = %item.id,
            part_index = resume.part_index,
            position = resume.position,
            "Playback session started"
        );

        Ok(Self {
            inner: Arc::new(SessionInner {
                reconciler,
                owner_id,
                item,
                media,
                part_index: AtomicU32::new(resume.part_index),
            }),
            ticker: None,
        })
    }

    pub fn item(&self) -> &ContentItem {
        &self.inner.item
    }

    pub fn media(&self) -> &M {
        &self.inner.media
    }

    pub fn part_index(&self) -> u32 {
        self.inner.part_index.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.snapshot()
    }

    /// Record the current position
    pub async fn tick(&self) -> RecordOutcome {
        self.inner.flush().await
    }

    /// Pause the media and record where it stopped
    pub async fn pause(&self) -> RecordOutcome {
        self.inner.media.pause();
        self.inner.flush().await
    }

    /// Jump to `position` within the current part
    ///
    /// Clamped to `[0, duration]`; with an unknown duration only the lower
    /// bound applies.
    pub async fn seek(&self, position: f64) -> RecordOutcome {
        let position = finite_or_zero(position);
        let position = match finite_or_zero(self.inner.media.duration()) {
            total if total > 0.0 => position.min(total),
            _ => position,
        };

        self.inner.media.set_current_time(position);
        self.inner.flush().await
    }

    /// Move forward (positive) or back (negative) by `seconds`
    pub async fn skip(&self, seconds: f64) -> RecordOutcome {
        let current = finite_or_zero(self.inner.media.current_time());
        self.seek(current + seconds).await
    }

    /// Advance to the next part; `None` on the last part
    ///
    /// The outgoing part's position is recorded before switching.
    pub async fn next_part(&self) -> Option<RecordOutcome> {
        let next = self.part_index().checked_add(1)?;
        self.change_part(next).await
    }

    /// Go back to the previous part; `None` on the first part
    pub async fn previous_part(&self) -> Option<RecordOutcome> {
        let previous = self.part_index().checked_sub(1)?;
        self.change_part(previous).await
    }

    async fn change_part(&self, index: u32) -> Option<RecordOutcome> {
        let part = self.inner.item.part(index)?;

        let outgoing = self.inner.flush().await;

        // Publish the index only once the new part is loaded
        self.inner.media.load_part(index, part, 0.0);
        self.inner.part_index.store(index, Ordering::SeqCst);
        debug!(content_item_id = %self.inner.item.id, part_index = index, "Changed part");

        Some(outgoing)
    }

    /// Record progress every `tick_interval` while the media is playing
    ///
    /// Replaces any ticker already running. A zero `tick_interval` leaves the
    /// session without a ticker.
    pub fn spawn_ticker(&mut self) {
        self.stop_ticker();

        let inner = Arc::clone(&self.inner);
        let period = inner.reconciler.config().tick_interval;
        if period.is_zero() {
            warn!(
                content_item_id = %inner.item.id,
                "Tick interval is zero, not recording periodically"
            );
            return;
        }

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if !inner.media.is_paused() {
                    inner.flush().await;
                }
            }
        }));
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    /// End the session, recording the final position
    pub async fn stop(mut self) -> RecordOutcome {
        self.stop_ticker();
        info!(content_item_id = %self.inner.item.id, "Playback session stopped");
        self.inner.flush().await
    }
}

impl<M: MediaElement> Drop for PlaybackSession<M> {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
