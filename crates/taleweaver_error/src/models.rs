//! Model provider errors.

use crate::RetryableError;

/// Model provider error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelsErrorKind {
    /// API key environment variable not set
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),

    /// Request could not be sent or the connection failed
    #[display("HTTP request failed: {}", _0)]
    Http(String),

    /// Provider answered with a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },

    /// Provider signalled a rate limit (HTTP 429)
    #[display("Rate limited: {}", _0)]
    RateLimited(String),

    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    ResponseParse(String),

    /// Builder error (derive_builder failures)
    #[display("Builder error: {}", _0)]
    Builder(String),
}

impl ModelsErrorKind {
    /// Check if this error is a transient rate-limit condition.
    ///
    /// Only rate limiting is retried; every other provider failure is fatal.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelsErrorKind::RateLimited(_) => true,
            ModelsErrorKind::Api { status, .. } => *status == 429,
            _ => false,
        }
    }
}

/// Model provider error with location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{ModelsError, ModelsErrorKind, RetryableError};
///
/// let err = ModelsError::new(ModelsErrorKind::Api {
///     status: 429,
///     message: "slow down".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = ModelsError::new(ModelsErrorKind::Api {
///     status: 401,
///     message: "bad key".to_string(),
/// });
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl RetryableError for ModelsError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;
