//! OpenAI-compatible chat completions backend.

mod client;
mod dto;

pub use client::{OPENAI_API_URL, OpenAiClient, classify_status};
pub use dto::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, ChatUsage,
};
