//! Narrative state carried across turns of one story.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Characters, setting and theme derived from the opening segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StoryMetadata {
    /// Character names, first occurrence order, no duplicates
    characters: Vec<String>,
    /// Short description of where the story happens
    setting: String,
    /// One-word theme
    theme: String,
}

impl StoryMetadata {
    /// Create metadata, dropping repeated character names.
    pub fn new(characters: Vec<String>, setting: impl Into<String>, theme: impl Into<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(characters.len());
        for name in characters {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self {
            characters: unique,
            setting: setting.into(),
            theme: theme.into(),
        }
    }

    /// Metadata used when extraction output cannot be read.
    pub fn fallback() -> Self {
        Self::new(
            vec!["Main character".to_string()],
            "A friendly place",
            "Adventure",
        )
    }
}

/// Everything accepted into one story so far.
///
/// Only the owning session writes to this; the pipeline reads it for prompt
/// context.
///
/// # Examples
///
/// ```
/// use taleweaver_story::NarrativeState;
///
/// let mut state = NarrativeState::default();
/// assert_eq!(state.append("The bunny woke up."), 1);
/// assert_eq!(state.append("She went outside."), 2);
/// assert_eq!(state.transcript(), "The bunny woke up.\n\nShe went outside.");
/// assert_eq!(state.current_segment(), "She went outside.");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct NarrativeState {
    /// Accepted segments separated by blank lines
    transcript: String,
    /// Characters from the opening segment
    characters: Vec<String>,
    /// Setting from the opening segment
    setting: String,
    /// Theme from the opening segment
    theme: String,
    /// Most recently appended segment
    current_segment: String,
    /// Segments appended through [`NarrativeState::append`]
    segment_count: u32,
    /// Steering suggestions the reader gave, oldest first
    user_choices: Vec<String>,
}

impl NarrativeState {
    /// Append an accepted segment and return the new segment count.
    pub fn append(&mut self, segment: impl Into<String>) -> u32 {
        let segment = segment.into();
        if self.segment_count > 0 {
            self.transcript.push_str("\n\n");
        }
        self.transcript.push_str(&segment);
        self.current_segment = segment;
        self.segment_count += 1;
        self.segment_count
    }

    /// Fold extracted metadata into the state.
    pub fn apply_metadata(&mut self, metadata: StoryMetadata) {
        self.characters = metadata.characters;
        self.setting = metadata.setting;
        self.theme = metadata.theme;
    }

    /// Replace the whole transcript. The segment count is unchanged.
    pub fn replace_transcript(&mut self, transcript: impl Into<String>) {
        self.transcript = transcript.into();
    }

    /// Remember a steering suggestion.
    pub fn record_choice(&mut self, choice: impl Into<String>) {
        self.user_choices.push(choice.into());
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.transcript.trim().is_empty()
    }

    /// Characters joined for prompt text, or `none` when there are none.
    pub fn character_list_or<'a>(&'a self, none: &'a str) -> std::borrow::Cow<'a, str> {
        if self.characters.is_empty() {
            std::borrow::Cow::Borrowed(none)
        } else {
            std::borrow::Cow::Owned(self.characters.join(", "))
        }
    }
}
