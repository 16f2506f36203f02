//! Whole-story rewrites requested by the reader.

use crate::{Evaluation, NarrativeState, SamplingProfile, TextBackend, prompts};
use async_trait::async_trait;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::TaleweaverDriver;
use tracing::instrument;

/// What the reader wants changed across the whole story.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum RewriteKind {
    /// Free-form change request
    #[display("change request")]
    ChangeRequest,
    /// New tone or style
    #[display("tone change")]
    Tone,
    /// Add a character
    #[display("character addition")]
    Character,
    /// Move to a new setting
    #[display("setting change")]
    Setting,
}

/// Whether rewritten stories go past the judge.
///
/// `Bypass` applies the rewrite unchecked and logs a warning each time.
/// `Judged` evaluates it once and keeps the old transcript on rejection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteGate {
    /// Apply rewrites without judging them
    #[default]
    Bypass,
    /// Judge rewrites before applying them
    Judged,
}

/// Result of a rewrite request.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct RewriteOutcome {
    /// Which rewrite was requested
    kind: RewriteKind,
    /// Whether the transcript was replaced
    applied: bool,
    /// Story text the backend proposed
    proposed: String,
    /// Judge verdict, when the gate asked for one
    evaluation: Option<Evaluation>,
}

impl RewriteOutcome {
    pub(crate) fn new(
        kind: RewriteKind,
        applied: bool,
        proposed: String,
        evaluation: Option<Evaluation>,
    ) -> Self {
        Self {
            kind,
            applied,
            proposed,
            evaluation,
        }
    }
}

/// Produces a replacement transcript.
#[async_trait]
pub trait StoryRewriter: Send + Sync {
    /// Rewrite the whole story in `state` according to `request`.
    async fn rewrite(
        &self,
        state: &NarrativeState,
        kind: RewriteKind,
        request: &str,
    ) -> TaleweaverResult<String>;
}

/// Rewriter that asks the backend for the full replacement story.
#[derive(Debug, Clone)]
pub struct LlmRewriter<D> {
    backend: TextBackend<D>,
    sampling: SamplingProfile,
}

impl<D: TaleweaverDriver> LlmRewriter<D> {
    /// Create a rewriter using the per-kind sampling in `sampling`.
    pub fn new(backend: TextBackend<D>, sampling: SamplingProfile) -> Self {
        Self { backend, sampling }
    }
}

#[async_trait]
impl<D: TaleweaverDriver> StoryRewriter for LlmRewriter<D> {
    #[instrument(skip(self, state, request), fields(kind = %kind))]
    async fn rewrite(
        &self,
        state: &NarrativeState,
        kind: RewriteKind,
        request: &str,
    ) -> TaleweaverResult<String> {
        let prompt = prompts::rewrite_prompt(state, kind, request);
        let params = self.sampling.for_rewrite(kind);
        let raw = self.backend.complete(&prompt, params).await?;
        Ok(raw.trim().to_string())
    }
}
