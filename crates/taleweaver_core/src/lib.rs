//! Core data types for the Taleweaver storytelling pipeline.
//!
//! This crate provides the request and response types exchanged with a text
//! generation backend, the sampling parameters attached to every call, and
//! tracing initialisation for binaries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod request;
mod role;
mod sampling;
mod telemetry;

pub use message::Message;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, TokenUsage};
pub use role::Role;
pub use sampling::SamplingParams;
pub use telemetry::init_tracing;
