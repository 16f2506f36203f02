//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the taleweaver binary.

mod commands;
mod tell;

pub use commands::{Cli, Commands};
pub use tell::tell_story;
