//! Taleweaver - interactive children's storytelling with a judge in the loop.
//!
//! Every story segment a model writes is scored by a second model call for
//! safety and quality. Rejected segments are revised a bounded number of
//! times, and if none pass, a hand-written safe segment is used instead.
//!
//! # Architecture
//!
//! Taleweaver is organized as a workspace with focused crates:
//!
//! - `taleweaver_error` - Error types
//! - `taleweaver_core` - Request/response types, sampling parameters, tracing setup
//! - `taleweaver_interface` - The `TaleweaverDriver` backend trait
//! - `taleweaver_rate_limit` - Backoff retry for rate-limited calls
//! - `taleweaver_models` - OpenAI-compatible chat completions driver
//! - `taleweaver_story` - The validation-gated pipeline and story session
//!
//! This crate re-exports everything for convenience and hosts the
//! interactive console behind the `taleweaver` binary.
//!
//! # Cargo Features
//!
//! - `api` - Enable tests that call the real backend

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod console;

pub use console::{MenuChoice, StoryConsole};

pub use taleweaver_core::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, Message, Role, SamplingParams,
    TokenUsage, init_tracing,
};
pub use taleweaver_error::{
    ConfigError, ConsoleError, ConsoleErrorKind, ModelsError, ModelsErrorKind, ModelsResult,
    RetryableError, StoryError, StoryErrorKind, TaleweaverError, TaleweaverErrorKind,
    TaleweaverResult,
};
pub use taleweaver_interface::TaleweaverDriver;
pub use taleweaver_models::{OPENAI_API_URL, OpenAiClient};
pub use taleweaver_rate_limit::RetryPolicy;
pub use taleweaver_story::{
    BackendConfig, Evaluation, LlmMetadataExtractor, LlmRewriter, MetadataExtractor,
    NarrativeState, PipelineConfig, RewriteGate, RewriteKind, RewriteOutcome, SafetyJudge,
    SamplingProfile, SegmentGenerator, SegmentJudge, SegmentMode, SegmentOutcome, SegmentReviser,
    StoryMetadata, StoryRewriter, StorySession, Storyteller, TaleweaverConfig, TextBackend,
    ValidationGatedPipeline,
};
