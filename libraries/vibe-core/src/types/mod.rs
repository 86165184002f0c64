mod content;
mod ids;
mod outcome;
mod progress;

pub use content::{ContentItem, Part};
pub use ids::{ContentItemId, OwnerId};
pub use outcome::{LocalWrite, MergedProgress, PutStatus, RecordOutcome, RemoteRead, RemoteWrite};
pub use progress::{finite_or_zero, ProgressRecord, COMPLETION_RATIO};
