//! Validation-gated story generation for Taleweaver.
//!
//! A [`ValidationGatedPipeline`] asks a [`SegmentGenerator`] for a candidate
//! segment, has a [`SegmentJudge`] score it, and either accepts it, hands it
//! to a [`SegmentReviser`] for another attempt, or gives up and substitutes a
//! fixed fallback segment. A [`StorySession`] owns the [`NarrativeState`] the
//! pipeline reads from and is the only thing that writes to it.
//!
//! # Example
//!
//! ```no_run
//! use taleweaver_models::OpenAiClient;
//! use taleweaver_story::{StorySession, TaleweaverConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TaleweaverConfig::load()?;
//! let driver = OpenAiClient::from_env("OPENAI_API_KEY", "gpt-3.5-turbo")?;
//! let mut session = StorySession::from_driver(driver, &config)?;
//!
//! let outcome = session.begin("a turtle who wants to fly").await?;
//! println!("{}", outcome.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod evaluation;
mod extraction;
mod generator;
mod judge;
mod metadata;
mod mode;
mod pipeline;
mod prompts;
mod rewrite;
mod session;
mod state;

pub use backend::TextBackend;
pub use config::{BackendConfig, PipelineConfig, SamplingProfile, TaleweaverConfig};
pub use evaluation::{ACCEPTANCE_THRESHOLD, Evaluation, decode_evaluation, parse_evaluation};
pub use extraction::{ParseFailure, decode_structured, extract_prose, structured_span};
pub use generator::{SegmentGenerator, SegmentReviser, Storyteller};
pub use judge::{SafetyJudge, SegmentJudge};
pub use metadata::{LlmMetadataExtractor, MetadataExtractor, decode_metadata, parse_metadata};
pub use mode::SegmentMode;
pub use pipeline::{SegmentOutcome, ValidationGatedPipeline, fallback_segment};
pub use rewrite::{LlmRewriter, RewriteGate, RewriteKind, RewriteOutcome, StoryRewriter};
pub use session::StorySession;
pub use state::{NarrativeState, StoryMetadata};
