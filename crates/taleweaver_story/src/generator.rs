//! Candidate segment generation and revision.

use crate::extraction::extract_prose;
use crate::{Evaluation, NarrativeState, SegmentMode, TextBackend, prompts};
use async_trait::async_trait;
use taleweaver_core::SamplingParams;
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::TaleweaverDriver;
use tracing::instrument;

/// Produces a first candidate for a segment.
#[async_trait]
pub trait SegmentGenerator: Send + Sync {
    /// Write a candidate segment for `mode`, optionally steered by the reader.
    async fn generate(
        &self,
        state: &NarrativeState,
        mode: SegmentMode,
        steering: Option<&str>,
    ) -> TaleweaverResult<String>;
}

/// Rewrites a rejected candidate using the judge's feedback.
#[async_trait]
pub trait SegmentReviser: Send + Sync {
    /// Revise `candidate` to address `evaluation`.
    async fn revise(
        &self,
        state: &NarrativeState,
        candidate: &str,
        evaluation: &Evaluation,
    ) -> TaleweaverResult<String>;
}

/// Backend-driven generator and reviser.
///
/// Both responses are read leniently: a `{"story": ...}` payload is
/// unwrapped, anything else is taken as the story text.
#[derive(Debug, Clone)]
pub struct Storyteller<D> {
    backend: TextBackend<D>,
    story_params: SamplingParams,
    revision_params: SamplingParams,
}

impl<D: TaleweaverDriver> Storyteller<D> {
    /// Create a storyteller with separate sampling for drafts and revisions.
    pub fn new(
        backend: TextBackend<D>,
        story_params: SamplingParams,
        revision_params: SamplingParams,
    ) -> Self {
        Self {
            backend,
            story_params,
            revision_params,
        }
    }
}

#[async_trait]
impl<D: TaleweaverDriver> SegmentGenerator for Storyteller<D> {
    #[instrument(skip(self, state, steering), fields(mode = %mode, steered = steering.is_some()))]
    async fn generate(
        &self,
        state: &NarrativeState,
        mode: SegmentMode,
        steering: Option<&str>,
    ) -> TaleweaverResult<String> {
        let prompt = prompts::segment_prompt(state, mode, steering);
        let raw = self.backend.complete(&prompt, self.story_params).await?;
        Ok(extract_prose(&raw))
    }
}

#[async_trait]
impl<D: TaleweaverDriver> SegmentReviser for Storyteller<D> {
    #[instrument(skip_all, fields(concerns = evaluation.concerns().len()))]
    async fn revise(
        &self,
        state: &NarrativeState,
        candidate: &str,
        evaluation: &Evaluation,
    ) -> TaleweaverResult<String> {
        let prompt = prompts::revision_prompt(state, candidate, evaluation);
        let raw = self.backend.complete(&prompt, self.revision_params).await?;
        Ok(extract_prose(&raw))
    }
}
