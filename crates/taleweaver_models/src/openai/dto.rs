//! Wire types for the chat completions endpoint.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One message in a chat completions request or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatMessage {
    /// "system", "user" or "assistant"
    role: String,
    /// Message text; providers may return null for tool-only turns
    #[serde(default)]
    content: Option<String>,
}

impl ChatMessage {
    /// Create a message.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(content.into()),
        }
    }
}

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, derive_builder::Builder, Getters)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl ChatCompletionRequest {
    /// Create a new request builder.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

/// One returned completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct ChatChoice {
    /// The generated message
    message: ChatMessage,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token accounting for a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Getters)]
pub struct ChatUsage {
    /// Prompt tokens
    #[serde(default)]
    prompt_tokens: u32,
    /// Completion tokens
    #[serde(default)]
    completion_tokens: u32,
}

/// Response body from `POST /v1/chat/completions`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    /// Provider response id
    #[serde(default)]
    id: String,
    /// Returned choices
    #[serde(default)]
    choices: Vec<ChatChoice>,
    /// Token accounting
    #[serde(default)]
    usage: Option<ChatUsage>,
}
