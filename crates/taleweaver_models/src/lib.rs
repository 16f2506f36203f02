//! Text generation backends for Taleweaver.
//!
//! The reference backend is any OpenAI-compatible chat-completions endpoint
//! (OpenAI itself, or a local server speaking the same protocol).
//!
//! # Example
//!
//! ```no_run
//! use taleweaver_models::OpenAiClient;
//! use taleweaver_interface::TaleweaverDriver;
//! use taleweaver_core::{GenerateRequest, SamplingParams};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::from_env("OPENAI_API_KEY", "gpt-3.5-turbo")?;
//! let request = GenerateRequest::from_prompt("Hello", SamplingParams::new(50, 0.7));
//! let response = client.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, ChatUsage, OPENAI_API_URL, OpenAiClient, classify_status,
};
