//! Request and response types for text generation.

use crate::{Message, SamplingParams};
use serde::{Deserialize, Serialize};

/// Generic generation request.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{GenerateRequest, Message, SamplingParams};
///
/// let request = GenerateRequest::from_prompt("Hello!", SamplingParams::new(100, 0.7));
///
/// assert_eq!(request.messages, vec![Message::user("Hello!")]);
/// assert_eq!(request.max_tokens, Some(100));
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Model identifier override
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Create a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Single user-message request with the given sampling parameters.
    pub fn from_prompt(prompt: impl Into<String>, params: SamplingParams) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            max_tokens: Some(*params.max_tokens()),
            temperature: Some(*params.temperature()),
            model: None,
        }
    }
}

/// Token accounting reported by the provider, when available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use taleweaver_core::GenerateResponse;
///
/// let response = GenerateResponse::from_text("Once upon a time...");
/// assert_eq!(response.text(), "Once upon a time...");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Text outputs, one per returned choice
    pub outputs: Vec<String>,
    /// Provider-reported token usage
    pub usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Response carrying a single text output.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            outputs: vec![text.into()],
            usage: None,
        }
    }

    /// All text outputs joined into one string.
    pub fn text(&self) -> String {
        self.outputs.concat()
    }
}
