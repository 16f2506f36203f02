//! Sampling parameters attached to each backend call.

use serde::{Deserialize, Serialize};

/// Length and randomness settings for a single backend call.
///
/// Different call sites use different profiles: story generation runs warm,
/// the judge and metadata extraction run close to deterministic.
///
/// # Examples
///
/// ```
/// use taleweaver_core::SamplingParams;
///
/// let judge = SamplingParams::new(400, 0.1);
/// assert_eq!(*judge.max_tokens(), 400);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SamplingParams {
    /// Maximum number of tokens to generate
    max_tokens: u32,
    /// Sampling temperature
    temperature: f32,
}

impl SamplingParams {
    /// Create sampling parameters.
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::new(3000, 0.1)
    }
}
