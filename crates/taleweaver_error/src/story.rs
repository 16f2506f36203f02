//! Story pipeline error types.

/// Specific error conditions for story operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// Retry budget must allow at least one attempt
    #[display("max_retry_attempts must be at least 1, got {}", _0)]
    InvalidRetryBudget(u32),
    /// A whole-story operation was requested before any segment exists
    #[display("Cannot {} an empty story", _0)]
    EmptyTranscript(String),
}

/// Error type for story operations.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::InvalidRetryBudget(0));
/// assert!(format!("{}", err).contains("at least 1"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
