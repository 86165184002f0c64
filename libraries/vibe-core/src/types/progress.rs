/// Listening progress records
use serde::{Deserialize, Serialize};

use super::ids::{ContentItemId, OwnerId};

/// Fraction of a part that must be played before it counts as finished
pub const COMPLETION_RATIO: f64 = 0.9;

/// Playback position within one content item, owned by one (owner, item) pair
///
/// Records are replaced wholesale, never mutated in place. Every way of
/// building one (constructor or deserialisation) runs [`ProgressRecord::new`]'s
/// normalisation, so `position` and `total_duration` are always finite and
/// non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProgressRecord")]
pub struct ProgressRecord {
    /// Owner this record belongs to
    pub owner_id: OwnerId,

    /// Content item being consumed
    pub content_item_id: ContentItemId,

    /// Ordinal of the current part (chapter)
    pub part_index: u32,

    /// Elapsed offset within the current part, in seconds
    pub position: f64,

    /// Duration of the current part in seconds (0 when unknown)
    pub total_duration: f64,

    /// Last mutation time (Unix epoch milliseconds), the sole ordering key
    pub updated_at: i64,
}

impl ProgressRecord {
    /// Build a record, coercing non-finite or negative numbers to 0
    pub fn new(
        owner_id: OwnerId,
        content_item_id: ContentItemId,
        part_index: u32,
        position: f64,
        total_duration: f64,
        updated_at: i64,
    ) -> Self {
        Self {
            owner_id,
            content_item_id,
            part_index,
            position: finite_or_zero(position),
            total_duration: finite_or_zero(total_duration),
            updated_at,
        }
    }

    /// Re-apply normalisation to a record whose fields were set directly
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.position = finite_or_zero(self.position);
        self.total_duration = finite_or_zero(self.total_duration);
        self
    }

    /// Known duration of the current part
    pub fn duration(&self) -> Option<f64> {
        (self.total_duration > 0.0).then_some(self.total_duration)
    }

    /// Whether the current part has been (nearly) finished
    ///
    /// A part with unknown duration is never reported as completed.
    pub fn is_completed(&self) -> bool {
        self.duration()
            .is_some_and(|total| self.position > COMPLETION_RATIO * total)
    }

    /// Progress through the current part as a whole percentage (0-100)
    pub fn percent_complete(&self) -> u8 {
        match self.duration() {
            Some(total) => ((self.position / total) * 100.0).floor().clamp(0.0, 100.0) as u8,
            None => 0,
        }
    }

    /// Whether `self` is strictly newer than `other`
    pub fn is_newer_than(&self, other: &ProgressRecord) -> bool {
        self.updated_at > other.updated_at
    }
}

/// Coerce NaN, infinities and negatives to 0
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Wire shape accepted from tiers before validation
#[derive(Deserialize)]
struct RawProgressRecord {
    owner_id: OwnerId,
    content_item_id: ContentItemId,
    #[serde(default)]
    part_index: u32,
    #[serde(default)]
    position: Option<f64>,
    #[serde(default)]
    total_duration: Option<f64>,
    #[serde(default)]
    updated_at: i64,
}

impl From<RawProgressRecord> for ProgressRecord {
    fn from(raw: RawProgressRecord) -> Self {
        ProgressRecord::new(
            raw.owner_id,
            raw.content_item_id,
            raw.part_index,
            raw.position.unwrap_or(0.0),
            raw.total_duration.unwrap_or(0.0),
            raw.updated_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(position: f64, total_duration: f64) -> ProgressRecord {
        ProgressRecord::new(
            OwnerId::new("user_123"),
            ContentItemId::new("b1"),
            0,
            position,
            total_duration,
            100,
        )
    }

    #[test]
    fn non_finite_numbers_are_coerced_to_zero() {
        assert_eq!(record(200.0, f64::NAN).total_duration, 0.0);
        assert_eq!(record(200.0, f64::INFINITY).total_duration, 0.0);
        assert_eq!(record(200.0, f64::NEG_INFINITY).total_duration, 0.0);
        assert_eq!(record(f64::NAN, 1200.0).position, 0.0);
        assert_eq!(record(-3.0, 1200.0).position, 0.0);
    }

    #[test]
    fn completion_requires_known_duration() {
        assert!(record(1000.0, 1000.0).is_completed());
        assert!(record(901.0, 1000.0).is_completed());
        assert!(!record(900.0, 1000.0).is_completed());
        assert!(!record(500.0, 0.0).is_completed());
    }

    #[test]
    fn percent_complete_is_clamped() {
        assert_eq!(record(250.0, 1000.0).percent_complete(), 25);
        assert_eq!(record(1500.0, 1000.0).percent_complete(), 100);
        assert_eq!(record(250.0, 0.0).percent_complete(), 0);
    }

    #[test]
    fn deserialization_fills_defaults_and_normalizes() {
        let json = r#"{"owner_id":"user_123","content_item_id":12,"total_duration":-1.0}"#;
        let parsed: ProgressRecord = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.content_item_id, ContentItemId::new("12"));
        assert_eq!(parsed.part_index, 0);
        assert_eq!(parsed.position, 0.0);
        assert_eq!(parsed.total_duration, 0.0);
        assert_eq!(parsed.updated_at, 0);
    }

    #[test]
    fn serialization_round_trips_fields() {
        let before = record(340.0, 1800.0);
        let json = serde_json::to_value(&before).unwrap();
        assert_eq!(json["content_item_id"], "b1");
        assert_eq!(json["position"], 340.0);

        let back: ProgressRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, before);
    }

    #[test]
    fn newer_is_strict() {
        let a = record(10.0, 0.0);
        let mut b = a.clone();
        assert!(!a.is_newer_than(&b));
        b.updated_at = 101;
        assert!(b.is_newer_than(&a));
    }
}
