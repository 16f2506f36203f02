//! Which part of the story a segment is.

use serde::{Deserialize, Serialize};

/// Position of a segment in the story.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    /// Opening segment of a new story
    #[display("initial")]
    Initial,
    /// Next segment of an ongoing story
    #[display("continuation")]
    Continuation,
    /// Concluding segment
    #[display("ending")]
    Ending,
}

impl SegmentMode {
    /// Whether this segment closes the story.
    pub fn is_ending(self) -> bool {
        matches!(self, SegmentMode::Ending)
    }
}
