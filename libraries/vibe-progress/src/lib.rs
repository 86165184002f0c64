//! Vibe - Progress Reconciliation
//!
//! Decides where listening progress is written and which record wins when
//! the device store and the shared server disagree.
//!
//! This crate provides:
//! - [`Reconciler`]: write routing to both tiers, merged reads, resume lookup
//! - [`merge_record`] / [`merge_tiers`]: the last-write-wins rule as pure functions
//! - [`PlaybackSession`]: the active playback of one item, with a periodic ticker
//!
//! # Architecture
//!
//! `vibe-progress` knows nothing about SQLite or HTTP. Both tiers, the
//! connectivity probe and the clock arrive as trait objects from `vibe-core`,
//! so the same reconciler runs against `vibe-storage` and
//! `vibe-server-client` in the player and against in-memory fakes in tests.
//!
//! # Example
//!
//! ```rust
//! use vibe_core::{ContentItemId, OwnerId, ProgressRecord};
//! use vibe_progress::merge_record;
//!
//! let owner = OwnerId::new("user_123");
//! let item = ContentItemId::new("b1");
//! let local = ProgressRecord::new(owner.clone(), item.clone(), 0, 10.0, 0.0, 50);
//! let remote = ProgressRecord::new(owner, item, 3, 900.0, 0.0, 50);
//!
//! // Equal stamps keep the remote record
//! assert_eq!(merge_record(&local, &remote).part_index, 3);
//! ```

pub mod config;
pub mod merge;
pub mod reconciler;
pub mod session;

pub use config::ProgressConfig;
pub use merge::{merge_record, merge_tiers};
pub use reconciler::Reconciler;
pub use session::{MediaElement, PlaybackSession, ResumePoint, SessionSnapshot};
