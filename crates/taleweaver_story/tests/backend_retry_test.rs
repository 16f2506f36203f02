//! Rate-limit retry below the pipeline.
//!
//! Backoff sleeps run on paused tokio time, so these tests finish instantly.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use taleweaver_core::SamplingParams;
use taleweaver_error::{ModelsErrorKind, RetryableError, TaleweaverErrorKind};
use taleweaver_rate_limit::RetryPolicy;
use taleweaver_story::{
    NarrativeState, SafetyJudge, SegmentMode, Storyteller, TextBackend, ValidationGatedPipeline,
};
use test_utils::{ScriptedDriver, Step, text};

fn params() -> SamplingParams {
    SamplingParams::new(500, 0.7)
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_then_success() {
    let backend = TextBackend::new(
        ScriptedDriver::new(vec![Step::RateLimited, Step::RateLimited, text("Hello")]),
        RetryPolicy::default(),
    );

    let started = tokio::time::Instant::now();
    let reply = backend.complete("hi", params()).await.unwrap();

    assert_eq!(reply, "Hello");
    assert_eq!(backend.driver().calls.get(), 3);
    assert!(started.elapsed() >= Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_fatal_error_not_retried() {
    let backend = TextBackend::new(
        ScriptedDriver::new(vec![Step::Fatal, text("never reached")]),
        RetryPolicy::default(),
    );

    let err = backend.complete("hi", params()).await.unwrap_err();

    assert!(!err.is_retryable());
    assert_eq!(backend.driver().calls.get(), 1);
    match err.kind() {
        TaleweaverErrorKind::Models(e) => assert!(matches!(e.kind, ModelsErrorKind::Api { status: 401, .. })),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_exhaustion_is_error() {
    let backend = TextBackend::new(
        ScriptedDriver::new(vec![Step::RateLimited]),
        RetryPolicy::default(),
    );

    let err = backend.complete("hi", params()).await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(backend.driver().calls.get(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_backend_retries_do_not_spend_pipeline_attempts() {
    let driver = Arc::new(ScriptedDriver::new(vec![
        Step::RateLimited,
        text(r#"{"story": "Pip found a shiny shell."}"#),
        Step::RateLimited,
        text(r#"{"verdict": "SAFE", "quality_score": 4}"#),
    ]));
    let backend = TextBackend::from_arc(driver.clone(), RetryPolicy::default());
    let storyteller = Arc::new(Storyteller::new(backend.clone(), params(), params()));
    let judge = Arc::new(SafetyJudge::new(backend, SamplingParams::new(400, 0.1)));
    let pipeline = ValidationGatedPipeline::new(storyteller.clone(), storyteller, judge, 3).unwrap();

    let outcome = pipeline
        .produce_segment(&NarrativeState::default(), SegmentMode::Initial, Some("a crab"))
        .await
        .unwrap();

    assert_eq!(outcome.text(), "Pip found a shiny shell.");
    assert!(*outcome.accepted());
    assert_eq!(*outcome.attempts(), 1);
    assert_eq!(driver.calls.get(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_backend_retry_fails_pipeline() {
    let driver = ScriptedDriver::new(vec![Step::RateLimited]);
    let backend = TextBackend::new(driver, RetryPolicy::default());
    let storyteller = Arc::new(Storyteller::new(backend.clone(), params(), params()));
    let judge = Arc::new(SafetyJudge::new(backend.clone(), params()));
    let pipeline = ValidationGatedPipeline::new(storyteller.clone(), storyteller, judge, 3).unwrap();

    let result = pipeline
        .produce_segment(&NarrativeState::default(), SegmentMode::Initial, None)
        .await;

    assert!(result.is_err());
    assert_eq!(backend.driver().calls.get(), 3);
}

#[tokio::test]
async fn test_prose_reply_used_verbatim() {
    let driver = Arc::new(ScriptedDriver::new(vec![
        text("  Once upon a time, a snail raced a leaf.  "),
        text("I think this is SAFE, quality 5"),
        text("Revised: the snail and leaf became friends."),
        text(r#"{"verdict": "SAFE", "quality_score": 5}"#),
    ]));
    let backend = TextBackend::from_arc(driver.clone(), RetryPolicy::default());
    let storyteller = Arc::new(Storyteller::new(backend.clone(), params(), SamplingParams::new(500, 0.6)));
    let judge = Arc::new(SafetyJudge::new(backend, SamplingParams::new(400, 0.1)));
    let pipeline = ValidationGatedPipeline::new(storyteller.clone(), storyteller, judge, 3).unwrap();

    let outcome = pipeline
        .produce_segment(&NarrativeState::default(), SegmentMode::Initial, None)
        .await
        .unwrap();

    assert_eq!(outcome.text(), "Revised: the snail and leaf became friends.");
    assert_eq!(*outcome.attempts(), 2);
    assert_eq!(driver.request(2).temperature, Some(0.6));
    assert!(driver.prompt(2).contains("Once upon a time, a snail raced a leaf."));
    assert!(driver.prompt(2).contains("Unable to parse evaluation response"));
}
