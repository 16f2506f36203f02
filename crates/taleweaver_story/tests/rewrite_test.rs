//! Whole-story rewrites and the rewrite gate.

mod test_utils;

use std::sync::Arc;
use taleweaver_core::SamplingParams;
use taleweaver_error::{StoryErrorKind, TaleweaverErrorKind};
use taleweaver_rate_limit::RetryPolicy;
use taleweaver_story::{
    LlmRewriter, NarrativeState, RewriteGate, RewriteKind, SamplingProfile, StoryRewriter,
    StorySession, TextBackend, ValidationGatedPipeline,
};
use test_utils::{
    CountingGenerator, CountingReviser, FixedMetadata, FixedRewriter, ScriptedDriver,
    ScriptedJudge, verdict,
};

struct Harness {
    judge: Arc<ScriptedJudge>,
    rewriter: Arc<FixedRewriter>,
    session: StorySession,
}

fn harness(gate: RewriteGate, verdicts: Vec<taleweaver_story::Evaluation>, fail: bool) -> Harness {
    let judge = Arc::new(ScriptedJudge::new(verdicts));
    let rewriter = Arc::new(FixedRewriter {
        fail,
        ..FixedRewriter::default()
    });
    let pipeline = ValidationGatedPipeline::new(
        Arc::new(CountingGenerator::default()),
        Arc::new(CountingReviser::default()),
        judge.clone(),
        3,
    )
    .unwrap();
    let session = StorySession::new(pipeline, Arc::new(FixedMetadata::default()), rewriter.clone())
        .with_rewrite_gate(gate);
    Harness {
        judge,
        rewriter,
        session,
    }
}

#[tokio::test]
async fn test_bypass_overwrites_without_judging() {
    let mut h = harness(RewriteGate::Bypass, vec![], false);
    h.session.accept("Benny hopped.").await.unwrap();

    let outcome = h
        .session
        .rewrite(RewriteKind::Tone, "make it funny")
        .await
        .unwrap();

    assert!(*outcome.applied());
    assert!(outcome.evaluation().is_none());
    assert_eq!(h.session.transcript(), "Benny hopped. [rewritten: make it funny]");
    assert_eq!(h.session.segment_count(), 1);
    assert_eq!(h.judge.calls.get(), 0);
}

#[tokio::test]
async fn test_judged_gate_applies_accepted_rewrite() {
    let mut h = harness(RewriteGate::Judged, vec![verdict(true, 4)], false);
    h.session.accept("Benny hopped.").await.unwrap();

    let outcome = h
        .session
        .rewrite(RewriteKind::Setting, "on the moon")
        .await
        .unwrap();

    assert!(*outcome.applied());
    assert_eq!(h.judge.calls.get(), 1);
    assert_eq!(h.session.transcript(), "Benny hopped. [rewritten: on the moon]");
}

#[tokio::test]
async fn test_judged_gate_keeps_story_on_rejection() {
    let mut h = harness(RewriteGate::Judged, vec![verdict(false, 4)], false);
    h.session.accept("Benny hopped.").await.unwrap();

    let outcome = h
        .session
        .rewrite(RewriteKind::Character, "a scary ghost")
        .await
        .unwrap();

    assert!(!*outcome.applied());
    assert_eq!(outcome.proposed(), "Benny hopped. [rewritten: a scary ghost]");
    assert_eq!(h.session.transcript(), "Benny hopped.");
    assert_eq!(
        outcome.evaluation().as_ref().map(|e| *e.is_safe()),
        Some(false)
    );
}

#[tokio::test]
async fn test_rewrite_empty_story_is_error() {
    let mut h = harness(RewriteGate::Bypass, vec![], false);

    let err = h
        .session
        .rewrite(RewriteKind::ChangeRequest, "more dragons")
        .await
        .unwrap_err();

    match err.kind() {
        TaleweaverErrorKind::Story(e) => {
            assert!(matches!(e.kind, StoryErrorKind::EmptyTranscript(_)))
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(h.rewriter.calls.get(), 0);
}

#[tokio::test]
async fn test_backend_failure_leaves_story_unchanged() {
    let mut h = harness(RewriteGate::Bypass, vec![], true);
    h.session.accept("Benny hopped.").await.unwrap();

    let result = h.session.rewrite(RewriteKind::Tone, "sillier").await;

    assert!(result.is_err());
    assert_eq!(h.session.transcript(), "Benny hopped.");
}

#[tokio::test]
async fn test_llm_rewriter_sampling_per_kind() {
    let driver = Arc::new(ScriptedDriver::always("  A whole new story.  "));
    let backend = TextBackend::from_arc(driver.clone(), RetryPolicy::default());
    let rewriter = LlmRewriter::new(backend, SamplingProfile::default());
    let mut state = NarrativeState::default();
    state.append("Once there was a fox.");

    let kinds = [
        RewriteKind::ChangeRequest,
        RewriteKind::Tone,
        RewriteKind::Character,
        RewriteKind::Setting,
    ];
    for kind in kinds {
        let story = rewriter.rewrite(&state, kind, "a request").await.unwrap();
        assert_eq!(story, "A whole new story.");
    }

    let sampled: Vec<(Option<u32>, Option<f32>)> = (0..4)
        .map(|i| {
            let request = driver.request(i);
            (request.max_tokens, request.temperature)
        })
        .collect();
    assert_eq!(
        sampled,
        vec![
            (Some(1000), Some(0.6)),
            (Some(1000), Some(0.7)),
            (Some(800), Some(0.6)),
            (Some(1000), Some(0.6)),
        ]
    );
    assert!(driver.prompt(0).contains("Once there was a fox."));
    assert_eq!(
        SamplingProfile::default().for_rewrite(RewriteKind::Character),
        SamplingParams::new(800, 0.6)
    );
}
