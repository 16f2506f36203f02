//! Error types for the Taleweaver workspace.
//!
//! This crate provides the error types shared by every Taleweaver crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Only fatal conditions live here. Recoverable parse outcomes (an unreadable
//! judge verdict, a prose-only generation) are handled where they occur and
//! never become a [`TaleweaverError`].
//!
//! # Examples
//!
//! ```
//! use taleweaver_error::{ModelsError, ModelsErrorKind, TaleweaverResult};
//!
//! fn fetch_data() -> TaleweaverResult<String> {
//!     Err(ModelsError::new(ModelsErrorKind::Http("Connection refused".into())))?
//! }
//!
//! assert!(fetch_data().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod console;
mod error;
mod models;
mod retry;
mod story;

pub use config::ConfigError;
pub use console::{ConsoleError, ConsoleErrorKind};
pub use error::{TaleweaverError, TaleweaverErrorKind, TaleweaverResult};
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
pub use retry::RetryableError;
pub use story::{StoryError, StoryErrorKind};
