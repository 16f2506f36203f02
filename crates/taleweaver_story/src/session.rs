//! A single reader's story, from first request to "The End".

use crate::{
    LlmMetadataExtractor, LlmRewriter, MetadataExtractor, NarrativeState, RewriteGate,
    RewriteKind, RewriteOutcome, SafetyJudge, SegmentJudge, SegmentMode, SegmentOutcome,
    StoryRewriter, Storyteller, TaleweaverConfig, TextBackend, ValidationGatedPipeline,
};
use std::sync::Arc;
use taleweaver_error::{StoryError, StoryErrorKind, TaleweaverResult};
use taleweaver_interface::TaleweaverDriver;
use tracing::{debug, info, instrument, warn};

/// Owns one story's [`NarrativeState`] and every collaborator that reads it.
///
/// The session is the only writer of the state: segments enter through
/// [`StorySession::accept`], and whole-story rewrites through
/// [`StorySession::rewrite`].
pub struct StorySession {
    state: NarrativeState,
    pipeline: ValidationGatedPipeline,
    metadata: Arc<dyn MetadataExtractor>,
    rewriter: Arc<dyn StoryRewriter>,
    rewrite_gate: RewriteGate,
}

impl std::fmt::Debug for StorySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorySession")
            .field("state", &self.state)
            .field("pipeline", &self.pipeline)
            .field("rewrite_gate", &self.rewrite_gate)
            .finish_non_exhaustive()
    }
}

impl StorySession {
    /// Create a session with an empty story and unjudged rewrites.
    pub fn new(
        pipeline: ValidationGatedPipeline,
        metadata: Arc<dyn MetadataExtractor>,
        rewriter: Arc<dyn StoryRewriter>,
    ) -> Self {
        Self {
            state: NarrativeState::default(),
            pipeline,
            metadata,
            rewriter,
            rewrite_gate: RewriteGate::default(),
        }
    }

    /// Builder method to choose how rewrites are gated.
    pub fn with_rewrite_gate(mut self, gate: RewriteGate) -> Self {
        self.rewrite_gate = gate;
        self
    }

    /// Wire a session to `driver` using the backend-driven collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured retry budget is zero.
    pub fn from_driver<D>(driver: D, config: &TaleweaverConfig) -> TaleweaverResult<Self>
    where
        D: TaleweaverDriver + 'static,
    {
        let backend = TextBackend::new(driver, config.retry().clone());
        let sampling = *config.sampling();

        let storyteller = Arc::new(Storyteller::new(
            backend.clone(),
            *sampling.story(),
            *sampling.revision(),
        ));
        let judge = Arc::new(SafetyJudge::new(backend.clone(), *sampling.judge()));
        let pipeline = ValidationGatedPipeline::new(
            storyteller.clone(),
            storyteller,
            judge,
            *config.pipeline().max_retry_attempts(),
        )?;

        let metadata = Arc::new(LlmMetadataExtractor::new(
            backend.clone(),
            *sampling.metadata(),
        ));
        let rewriter = Arc::new(LlmRewriter::new(backend, sampling));

        Ok(Self::new(pipeline, metadata, rewriter)
            .with_rewrite_gate(*config.pipeline().rewrite_gate()))
    }

    /// Start a new story from the reader's request.
    ///
    /// Clears the current story first. The produced segment is accepted even
    /// when it is the fallback; check [`SegmentOutcome::accepted`].
    #[instrument(skip(self, request))]
    pub async fn begin(&mut self, request: &str) -> TaleweaverResult<SegmentOutcome> {
        self.reset();
        info!("Starting new story");
        self.produce_and_accept(SegmentMode::Initial, Some(request))
            .await
    }

    /// Continue the story, optionally steered by a reader suggestion.
    ///
    /// The suggestion is kept in [`NarrativeState::user_choices`] only once
    /// the segment has been appended.
    #[instrument(skip(self, suggestion), fields(segment = self.state.segment_count() + 1))]
    pub async fn continue_story(
        &mut self,
        suggestion: Option<&str>,
    ) -> TaleweaverResult<SegmentOutcome> {
        let outcome = self
            .produce_and_accept(SegmentMode::Continuation, suggestion)
            .await?;
        if let Some(suggestion) = suggestion {
            self.state.record_choice(suggestion);
        }
        Ok(outcome)
    }

    /// Write the ending.
    #[instrument(skip(self))]
    pub async fn end_story(&mut self) -> TaleweaverResult<SegmentOutcome> {
        self.produce_and_accept(SegmentMode::Ending, None).await
    }

    async fn produce_and_accept(
        &mut self,
        mode: SegmentMode,
        steering: Option<&str>,
    ) -> TaleweaverResult<SegmentOutcome> {
        let outcome = self
            .pipeline
            .produce_segment(&self.state, mode, steering)
            .await?;
        if outcome.used_fallback() {
            warn!(%mode, "Accepting fallback segment");
        }
        self.accept(outcome.text().clone()).await?;
        Ok(outcome)
    }

    /// Append a segment to the story.
    ///
    /// The first segment ever appended also sets characters, setting and
    /// theme. If that extraction fails on the backend, the segment stays
    /// appended and the error is returned.
    #[instrument(skip(self, segment))]
    pub async fn accept(&mut self, segment: impl Into<String>) -> TaleweaverResult<()> {
        let count = self.state.append(segment);
        debug!(segment_count = count, "Segment appended");

        if count == 1 {
            let metadata = self.metadata.extract(self.state.current_segment()).await?;
            info!(
                characters = ?metadata.characters(),
                setting = %metadata.setting(),
                theme = %metadata.theme(),
                "Story metadata extracted"
            );
            self.state.apply_metadata(metadata);
        }
        Ok(())
    }

    /// Rewrite the whole story.
    ///
    /// Under [`RewriteGate::Judged`] a rewrite the judge rejects leaves the
    /// transcript unchanged and comes back with `applied == false`.
    ///
    /// # Errors
    ///
    /// Returns [`StoryErrorKind::EmptyTranscript`] when there is no story yet,
    /// and backend errors as-is. The transcript is untouched on error.
    #[instrument(skip(self, request), fields(kind = %kind, gate = ?self.rewrite_gate))]
    pub async fn rewrite(
        &mut self,
        kind: RewriteKind,
        request: &str,
    ) -> TaleweaverResult<RewriteOutcome> {
        if self.state.is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyTranscript(kind.to_string())).into());
        }

        let proposed = self.rewriter.rewrite(&self.state, kind, request).await?;

        let evaluation = match self.rewrite_gate {
            RewriteGate::Bypass => {
                warn!("Applying rewrite without judging it");
                None
            }
            RewriteGate::Judged => {
                let judge: Arc<dyn SegmentJudge> = self.pipeline.judge();
                let evaluation = judge.evaluate(&self.state, &proposed).await?;
                if !evaluation.is_accepted() {
                    warn!(
                        safe = evaluation.is_safe(),
                        quality = evaluation.quality_score(),
                        "Judge rejected rewrite, keeping current story"
                    );
                    return Ok(RewriteOutcome::new(kind, false, proposed, Some(evaluation)));
                }
                Some(evaluation)
            }
        };

        self.state.replace_transcript(proposed.clone());
        info!("Story rewritten");
        Ok(RewriteOutcome::new(kind, true, proposed, evaluation))
    }

    /// Drop the current story.
    pub fn reset(&mut self) {
        debug!("Resetting narrative state");
        self.state = NarrativeState::default();
    }

    /// The full narrative state.
    pub fn state(&self) -> &NarrativeState {
        &self.state
    }

    /// Accepted segments joined by blank lines.
    pub fn transcript(&self) -> &str {
        self.state.transcript()
    }

    /// Characters from the opening segment.
    pub fn characters(&self) -> &[String] {
        self.state.characters()
    }

    /// Setting from the opening segment.
    pub fn setting(&self) -> &str {
        self.state.setting()
    }

    /// Theme from the opening segment.
    pub fn theme(&self) -> &str {
        self.state.theme()
    }

    /// Segments appended so far.
    pub fn segment_count(&self) -> u32 {
        *self.state.segment_count()
    }

    /// Most recently appended segment.
    pub fn current_segment(&self) -> &str {
        self.state.current_segment()
    }

    /// Reader suggestions, oldest first.
    pub fn user_choices(&self) -> &[String] {
        self.state.user_choices()
    }

    /// Whether rewrites are judged.
    pub fn rewrite_gate(&self) -> RewriteGate {
        self.rewrite_gate
    }
}
