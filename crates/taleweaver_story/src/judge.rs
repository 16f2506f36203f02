//! Content judging.

use crate::evaluation::parse_evaluation;
use crate::{Evaluation, NarrativeState, TextBackend, prompts};
use async_trait::async_trait;
use taleweaver_core::SamplingParams;
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::TaleweaverDriver;
use tracing::instrument;

/// Scores a candidate segment against the story so far.
#[async_trait]
pub trait SegmentJudge: Send + Sync {
    /// Evaluate `candidate` in the context of `state`.
    ///
    /// An unreadable verdict must come back as a rejecting [`Evaluation`],
    /// never as an error. Errors are reserved for backend failures.
    async fn evaluate(&self, state: &NarrativeState, candidate: &str)
    -> TaleweaverResult<Evaluation>;
}

/// Judge that asks the backend for a JSON verdict.
#[derive(Debug, Clone)]
pub struct SafetyJudge<D> {
    backend: TextBackend<D>,
    params: SamplingParams,
}

impl<D: TaleweaverDriver> SafetyJudge<D> {
    /// Create a judge.
    pub fn new(backend: TextBackend<D>, params: SamplingParams) -> Self {
        Self { backend, params }
    }
}

#[async_trait]
impl<D: TaleweaverDriver> SegmentJudge for SafetyJudge<D> {
    #[instrument(skip_all, fields(candidate_len = candidate.len()))]
    async fn evaluate(
        &self,
        state: &NarrativeState,
        candidate: &str,
    ) -> TaleweaverResult<Evaluation> {
        let prompt = prompts::evaluation_prompt(state, candidate);
        let raw = self.backend.complete(&prompt, self.params).await?;
        Ok(parse_evaluation(&raw))
    }
}
