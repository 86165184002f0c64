/// Catalog types the progress subsystem needs to validate resume points
use serde::{Deserialize, Serialize};

use super::ids::ContentItemId;

/// One playable segment (chapter) of a content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Display name
    pub title: String,

    /// Duration in seconds, if the catalog knows it
    #[serde(default)]
    pub duration: Option<f64>,
}

impl Part {
    /// Create a part with a known duration
    pub fn new(title: impl Into<String>, duration: Option<f64>) -> Self {
        Self {
            title: title.into(),
            duration,
        }
    }
}

/// A book, audiobook or podcast entry with ordered parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Catalog identifier
    pub id: ContentItemId,

    /// Display title
    pub title: String,

    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl ContentItem {
    /// Create a new content item
    pub fn new(id: impl Into<ContentItemId>, title: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            parts,
        }
    }

    /// Get a part by index
    pub fn part(&self, index: u32) -> Option<&Part> {
        self.parts.get(index as usize)
    }

    /// Number of parts
    pub fn part_count(&self) -> u32 {
        self.parts.len() as u32
    }

    /// Whether a part index still exists in the current part list
    pub fn has_part(&self, index: u32) -> bool {
        self.part(index).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_part_tracks_part_list() {
        let item = ContentItem::new(
            "b1",
            "The Book",
            vec![Part::new("Intro", Some(60.0)), Part::new("One", None)],
        );

        assert!(item.has_part(1));
        assert!(!item.has_part(2));
        assert_eq!(item.part_count(), 2);
    }
}
