//! Error recovery for backend calls.
//!
//! Text generation providers throttle callers with HTTP 429 responses. This
//! crate retries those transient failures with exponential backoff, a bounded
//! number of times, and lets every other failure through untouched.
//!
//! The retry loop here is deliberately independent of the story pipeline's
//! own validation retries: exhausting it is a fatal error for the caller,
//! and it never consumes pipeline attempts.

mod retry;

pub use retry::RetryPolicy;
