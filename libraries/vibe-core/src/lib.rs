//! Vibe Core
//!
//! Platform-agnostic core types, traits, and error handling for Vibe's
//! listening-progress tracking.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `ProgressRecord`, `ContentItem`, `OwnerId`, `ContentItemId`
//! - **Tier Traits**: `LocalProgressTier`, `RemoteProgressTier`, `ConnectivityProbe`, `Clock`
//! - **Outcomes**: explicit results for writes and reads that degrade instead of failing
//! - **Error Handling**: Unified `VibeError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use vibe_core::types::{ContentItemId, OwnerId, ProgressRecord};
//!
//! let record = ProgressRecord::new(
//!     OwnerId::new("user_123"),
//!     ContentItemId::new("b1"),
//!     2,
//!     340.0,
//!     f64::NAN,
//!     1_700_000_000_000,
//! );
//!
//! // Non-finite durations never enter the store
//! assert_eq!(record.total_duration, 0.0);
//! assert!(!record.is_completed());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod connectivity;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use connectivity::ConnectivityFlag;
pub use error::{Result, VibeError};
pub use traits::{Clock, ConnectivityProbe, LocalProgressTier, RemoteProgressTier, SystemClock};

pub use types::{
    finite_or_zero, ContentItem, ContentItemId, LocalWrite, MergedProgress, OwnerId, Part,
    ProgressRecord, PutStatus, RecordOutcome, RemoteRead, RemoteWrite,
};
