//! Retry classification shared by backend errors.

/// Trait for errors that support retry logic.
///
/// Transient conditions (a provider rate limit) return true and are retried
/// with backoff by the backend wrapper. Everything else is permanent and
/// propagates immediately.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}
