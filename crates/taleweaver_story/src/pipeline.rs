//! The generate, evaluate, revise, fall back loop.

use crate::{Evaluation, NarrativeState, SegmentGenerator, SegmentJudge, SegmentMode, SegmentReviser};
use derive_getters::Getters;
use std::sync::Arc;
use taleweaver_error::{StoryError, StoryErrorKind, TaleweaverResult};
use tracing::{debug, info, instrument, warn};

const FALLBACK_OPENING: &str = "Once upon a time, in a meadow full of daisies, there lived a \
    cheerful little hedgehog named Hazel who loved helping her neighbours. One bright morning \
    Hazel packed a basket of berries and set off to visit her friend Oliver the otter, who \
    had promised to show her the prettiest stones in the stream.";

const FALLBACK_ENDING: &str = "And so the adventure came to a happy end. The friends had \
    discovered that being kind and working together could solve almost any problem. As the \
    sun went down they waved goodbye, already dreaming about what they would do tomorrow. \
    The End.";

/// Fixed safe segment used when every attempt was rejected.
///
/// Endings get their own text; openings and continuations share one.
pub fn fallback_segment(mode: SegmentMode) -> &'static str {
    if mode.is_ending() {
        FALLBACK_ENDING
    } else {
        FALLBACK_OPENING
    }
}

/// Result of one [`ValidationGatedPipeline::produce_segment`] call.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct SegmentOutcome {
    /// Segment text: the accepted candidate or the fallback
    text: String,
    /// Whether a candidate passed the judge
    accepted: bool,
    /// Generate or revise attempts spent
    attempts: u32,
    /// The last verdict the judge gave
    evaluation: Option<Evaluation>,
}

impl SegmentOutcome {
    /// Whether the fixed fallback was substituted.
    pub fn used_fallback(&self) -> bool {
        !self.accepted
    }

    /// The `(text, accepted)` pair.
    pub fn into_parts(self) -> (String, bool) {
        (self.text, self.accepted)
    }
}

/// Bounded generate/judge/revise loop with a deterministic fallback.
///
/// Attempt one asks the generator; each later attempt asks the reviser to
/// fix the previous candidate using the judge's last verdict. The judge is
/// consulted once per attempt. Nothing here mutates the narrative state.
pub struct ValidationGatedPipeline {
    generator: Arc<dyn SegmentGenerator>,
    reviser: Arc<dyn SegmentReviser>,
    judge: Arc<dyn SegmentJudge>,
    max_retry_attempts: u32,
}

impl std::fmt::Debug for ValidationGatedPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationGatedPipeline")
            .field("max_retry_attempts", &self.max_retry_attempts)
            .finish_non_exhaustive()
    }
}

impl ValidationGatedPipeline {
    /// Default attempt budget.
    pub const DEFAULT_MAX_RETRY_ATTEMPTS: u32 = 3;

    /// Create a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`StoryErrorKind::InvalidRetryBudget`] when
    /// `max_retry_attempts` is zero.
    pub fn new(
        generator: Arc<dyn SegmentGenerator>,
        reviser: Arc<dyn SegmentReviser>,
        judge: Arc<dyn SegmentJudge>,
        max_retry_attempts: u32,
    ) -> TaleweaverResult<Self> {
        if max_retry_attempts == 0 {
            return Err(StoryError::new(StoryErrorKind::InvalidRetryBudget(max_retry_attempts)).into());
        }
        Ok(Self {
            generator,
            reviser,
            judge,
            max_retry_attempts,
        })
    }

    /// Attempt budget per segment.
    pub fn max_retry_attempts(&self) -> u32 {
        self.max_retry_attempts
    }

    /// The judge, shared with callers that gate other content.
    pub fn judge(&self) -> Arc<dyn SegmentJudge> {
        Arc::clone(&self.judge)
    }

    /// Produce one segment for `mode`.
    ///
    /// # Errors
    ///
    /// Backend failures that survive the backend's own retry are returned
    /// as-is. Running out of attempts is not an error: the outcome carries
    /// the fallback text with `accepted == false`.
    #[instrument(skip(self, state, steering), fields(mode = %mode, max_attempts = self.max_retry_attempts))]
    pub async fn produce_segment(
        &self,
        state: &NarrativeState,
        mode: SegmentMode,
        steering: Option<&str>,
    ) -> TaleweaverResult<SegmentOutcome> {
        let mut candidate = String::new();
        let mut last_evaluation: Option<Evaluation> = None;

        for attempt in 0..self.max_retry_attempts {
            candidate = match &last_evaluation {
                None => self.generator.generate(state, mode, steering).await?,
                Some(evaluation) => self.reviser.revise(state, &candidate, evaluation).await?,
            };
            debug!(attempt = attempt + 1, candidate_len = candidate.len(), "Candidate ready");

            let evaluation = self.judge.evaluate(state, &candidate).await?;
            info!(
                attempt = attempt + 1,
                safe = evaluation.is_safe(),
                quality = evaluation.quality_score(),
                "Judge verdict"
            );

            if evaluation.is_accepted() {
                return Ok(SegmentOutcome {
                    text: candidate,
                    accepted: true,
                    attempts: attempt + 1,
                    evaluation: Some(evaluation),
                });
            }

            if attempt + 1 < self.max_retry_attempts {
                debug!(concerns = ?evaluation.concerns(), "Revising rejected candidate");
            }
            last_evaluation = Some(evaluation);
        }

        warn!(attempts = self.max_retry_attempts, "Every candidate rejected, using fallback segment");
        Ok(SegmentOutcome {
            text: fallback_segment(mode).to_string(),
            accepted: false,
            attempts: self.max_retry_attempts,
            evaluation: last_evaluation,
        })
    }
}
