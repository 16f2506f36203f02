//! Top-level error wrapper types.

use crate::{ConfigError, ConsoleError, ModelsError, RetryableError, StoryError};

/// Every error condition a Taleweaver operation can end in.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{TaleweaverError, StoryError, StoryErrorKind};
///
/// let story_err = StoryError::new(StoryErrorKind::EmptyTranscript("rewrite".into()));
/// let err: TaleweaverError = story_err.into();
/// assert!(format!("{}", err).contains("Story Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TaleweaverErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Model provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Story pipeline error
    #[from(StoryError)]
    Story(StoryError),
    /// Interactive console error
    #[from(ConsoleError)]
    Console(ConsoleError),
}

/// Taleweaver error with kind discrimination.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{TaleweaverResult, ConfigError};
///
/// fn might_fail() -> TaleweaverResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Taleweaver Error: {}", _0)]
pub struct TaleweaverError(Box<TaleweaverErrorKind>);

impl TaleweaverError {
    /// Create a new error from a kind.
    pub fn new(kind: TaleweaverErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TaleweaverErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TaleweaverErrorKind
impl<T> From<T> for TaleweaverError
where
    T: Into<TaleweaverErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for TaleweaverError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            TaleweaverErrorKind::Models(err) => err.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for Taleweaver operations.
pub type TaleweaverResult<T> = std::result::Result<T, TaleweaverError>;
