//! Errors raised while reading `taleweaver.toml`.

/// A configuration file could not be read or did not match the expected
/// sections.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config error: {} ({}:{})", message, file, line)]
pub struct ConfigError {
    /// What went wrong
    pub message: String,
    /// Line that raised the error
    pub line: u32,
    /// Source file that raised the error
    pub file: &'static str,
}

impl ConfigError {
    /// Record a configuration failure at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_error::ConfigError;
    ///
    /// let err = ConfigError::new("unknown rewrite_gate \"maybe\"");
    /// assert!(err.to_string().starts_with("Config error: unknown rewrite_gate"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
