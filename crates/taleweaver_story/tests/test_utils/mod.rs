//! Scripted collaborators for story pipeline tests.
//!
//! Every mock counts its calls so tests can assert on attempt bounds.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use taleweaver_core::{GenerateRequest, GenerateResponse};
use taleweaver_error::{
    ModelsError, ModelsErrorKind, TaleweaverError, TaleweaverResult,
};
use taleweaver_interface::TaleweaverDriver;
use taleweaver_story::{
    Evaluation, MetadataExtractor, NarrativeState, RewriteKind, SegmentGenerator, SegmentJudge,
    SegmentMode, SegmentReviser, StoryMetadata, StoryRewriter, parse_evaluation,
};

/// Shared call counter.
#[derive(Debug, Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn bump(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn fatal_error() -> TaleweaverError {
    ModelsError::new(ModelsErrorKind::Api {
        status: 401,
        message: "invalid api key".to_string(),
    })
    .into()
}

pub fn rate_limited() -> TaleweaverError {
    ModelsError::new(ModelsErrorKind::RateLimited("slow down".to_string())).into()
}

/// Verdict as the judge backend would phrase it.
pub fn verdict(safe: bool, quality: i64) -> Evaluation {
    let verdict = if safe { "SAFE" } else { "UNSAFE" };
    parse_evaluation(&format!(
        r#"{{"verdict": "{verdict}", "quality_score": {quality}, "concerns": ["needs work"], "suggestions": ["be gentler"], "confidence": 4.0}}"#
    ))
}

/// Generator answering `draft N` for its Nth call.
#[derive(Debug, Default)]
pub struct CountingGenerator {
    pub calls: Calls,
    pub modes: Mutex<Vec<(SegmentMode, Option<String>)>>,
    pub fail: bool,
}

#[async_trait]
impl SegmentGenerator for CountingGenerator {
    async fn generate(
        &self,
        _state: &NarrativeState,
        mode: SegmentMode,
        steering: Option<&str>,
    ) -> TaleweaverResult<String> {
        let n = self.calls.bump();
        self.modes
            .lock()
            .unwrap()
            .push((mode, steering.map(str::to_string)));
        if self.fail {
            return Err(fatal_error());
        }
        Ok(format!("draft {n}"))
    }
}

/// Reviser answering `revision N` for its Nth call and remembering what it saw.
#[derive(Debug, Default)]
pub struct CountingReviser {
    pub calls: Calls,
    pub seen: Mutex<Vec<(String, Vec<String>)>>,
}

#[async_trait]
impl SegmentReviser for CountingReviser {
    async fn revise(
        &self,
        _state: &NarrativeState,
        candidate: &str,
        evaluation: &Evaluation,
    ) -> TaleweaverResult<String> {
        let n = self.calls.bump();
        self.seen
            .lock()
            .unwrap()
            .push((candidate.to_string(), evaluation.concerns().clone()));
        Ok(format!("revision {n}"))
    }
}

/// Judge returning queued verdicts, then rejecting everything.
#[derive(Debug, Default)]
pub struct ScriptedJudge {
    pub calls: Calls,
    pub verdicts: Mutex<VecDeque<Evaluation>>,
    pub judged: Mutex<Vec<String>>,
}

impl ScriptedJudge {
    pub fn new(verdicts: Vec<Evaluation>) -> Self {
        Self {
            verdicts: Mutex::new(verdicts.into()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SegmentJudge for ScriptedJudge {
    async fn evaluate(
        &self,
        _state: &NarrativeState,
        candidate: &str,
    ) -> TaleweaverResult<Evaluation> {
        self.calls.bump();
        self.judged.lock().unwrap().push(candidate.to_string());
        Ok(self
            .verdicts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| verdict(false, 1)))
    }
}

/// Metadata extractor returning a fixed record.
#[derive(Debug)]
pub struct FixedMetadata {
    pub calls: Calls,
    pub metadata: StoryMetadata,
    pub fail: bool,
}

impl Default for FixedMetadata {
    fn default() -> Self {
        Self {
            calls: Calls::default(),
            metadata: StoryMetadata::new(
                vec!["Benny".to_string(), "Lily".to_string()],
                "A sunny meadow",
                "Friendship",
            ),
            fail: false,
        }
    }
}

#[async_trait]
impl MetadataExtractor for FixedMetadata {
    async fn extract(&self, _segment: &str) -> TaleweaverResult<StoryMetadata> {
        self.calls.bump();
        if self.fail {
            return Err(fatal_error());
        }
        Ok(self.metadata.clone())
    }
}

/// Rewriter answering with a fixed replacement story.
#[derive(Debug, Default)]
pub struct FixedRewriter {
    pub calls: Calls,
    pub kinds: Mutex<Vec<RewriteKind>>,
    pub fail: bool,
}

#[async_trait]
impl StoryRewriter for FixedRewriter {
    async fn rewrite(
        &self,
        state: &NarrativeState,
        kind: RewriteKind,
        request: &str,
    ) -> TaleweaverResult<String> {
        self.calls.bump();
        self.kinds.lock().unwrap().push(kind);
        if self.fail {
            return Err(fatal_error());
        }
        Ok(format!("{} [rewritten: {request}]", state.transcript()))
    }
}

/// One scripted driver reply.
#[derive(Debug, Clone)]
pub enum Step {
    Text(String),
    RateLimited,
    Fatal,
}

pub fn text(s: &str) -> Step {
    Step::Text(s.to_string())
}

/// Driver replaying a script of replies, then repeating the last one.
#[derive(Debug)]
pub struct ScriptedDriver {
    pub calls: Calls,
    pub requests: Mutex<Vec<GenerateRequest>>,
    script: Mutex<VecDeque<Step>>,
    last: Mutex<Option<Step>>,
}

impl ScriptedDriver {
    pub fn new(script: Vec<Step>) -> Self {
        Self {
            calls: Calls::default(),
            requests: Mutex::new(Vec::new()),
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
        }
    }

    /// Driver that answers every call with `reply`.
    pub fn always(reply: &str) -> Self {
        Self::new(vec![text(reply)])
    }

    /// Prompt text of the Nth call (zero-based).
    pub fn prompt(&self, index: usize) -> String {
        self.requests.lock().unwrap()[index].messages[0].content.clone()
    }

    /// Request of the Nth call (zero-based).
    pub fn request(&self, index: usize) -> GenerateRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl TaleweaverDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> TaleweaverResult<GenerateResponse> {
        self.calls.bump();
        self.requests.lock().unwrap().push(req.clone());

        let step = {
            let mut script = self.script.lock().unwrap();
            let mut last = self.last.lock().unwrap();
            match script.pop_front() {
                Some(step) => {
                    *last = Some(step.clone());
                    step
                }
                None => last.clone().unwrap_or_else(|| text("")),
            }
        };

        match step {
            Step::Text(reply) => Ok(GenerateResponse::from_text(reply)),
            Step::RateLimited => Err(rate_limited()),
            Step::Fatal => Err(fatal_error()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}
