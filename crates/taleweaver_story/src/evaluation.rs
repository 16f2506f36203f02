//! Judge verdicts and how they are read from model output.

use crate::extraction::{ParseFailure, decode_structured};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Minimum quality score a safe segment needs to be accepted.
pub const ACCEPTANCE_THRESHOLD: i64 = 3;

/// A judge's verdict on one candidate segment.
///
/// # Examples
///
/// ```
/// use taleweaver_story::Evaluation;
///
/// let good = Evaluation::new(true, 4, vec![], vec![], 4.5);
/// assert!(good.is_accepted());
///
/// let unsafe_but_polished = Evaluation::new(false, 5, vec!["scary".into()], vec![], 5.0);
/// assert!(!unsafe_but_polished.is_accepted());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct Evaluation {
    /// Whether the judge called the segment safe
    is_safe: bool,
    /// Quality on a nominal 1-5 scale, not clamped
    quality_score: i64,
    /// Problems the judge found
    concerns: Vec<String>,
    /// How the judge suggests fixing them
    suggestions: Vec<String>,
    /// Judge's self-reported confidence, nominally 1.0-5.0
    confidence: f64,
}

impl Evaluation {
    /// Create an evaluation.
    pub fn new(
        is_safe: bool,
        quality_score: i64,
        concerns: Vec<String>,
        suggestions: Vec<String>,
        confidence: f64,
    ) -> Self {
        Self {
            is_safe,
            quality_score,
            concerns,
            suggestions,
            confidence,
        }
    }

    /// Conservative verdict used when the judge's answer cannot be read.
    pub fn fallback() -> Self {
        Self {
            is_safe: false,
            quality_score: 1,
            concerns: vec!["Unable to parse evaluation response".to_string()],
            suggestions: vec!["Please generate more appropriate content for children".to_string()],
            confidence: 1.0,
        }
    }

    /// The acceptance gate: safe and at least [`ACCEPTANCE_THRESHOLD`].
    pub fn is_accepted(&self) -> bool {
        self.is_safe && self.quality_score >= ACCEPTANCE_THRESHOLD
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawEvaluation {
    #[serde(default)]
    verdict: Option<Value>,
    #[serde(default)]
    quality_score: Option<Value>,
    #[serde(default)]
    concerns: Option<Value>,
    #[serde(default)]
    suggestions: Option<Value>,
    #[serde(default)]
    confidence: Option<Value>,
    #[serde(default)]
    reasoning: Option<Value>,
}

fn coerce_score(value: Option<Value>) -> Result<i64, ParseFailure> {
    let invalid = |detail: String| ParseFailure::Coercion {
        field: "quality_score",
        detail,
    };
    match value {
        None => Ok(1),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| invalid(format!("{} is not representable", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| invalid(format!("{:?}: {}", s, e))),
        Some(other) => Err(invalid(format!("unexpected value {}", other))),
    }
}

fn coerce_confidence(value: Option<Value>) -> Result<f64, ParseFailure> {
    let invalid = |detail: String| ParseFailure::Coercion {
        field: "confidence",
        detail,
    };
    match value {
        None => Ok(1.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| invalid(format!("{} is not representable", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(format!("{:?}: {}", s, e))),
        Some(other) => Err(invalid(format!("unexpected value {}", other))),
    }
}

fn coerce_list(field: &'static str, value: Option<Value>) -> Result<Vec<String>, ParseFailure> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()),
        Some(Value::String(s)) => Ok(vec![s]),
        Some(other) => Err(ParseFailure::Coercion {
            field,
            detail: format!("expected a list, got {}", other),
        }),
    }
}

/// Decode a judge response, reporting why it could not be read.
pub fn decode_evaluation(raw: &str) -> Result<Evaluation, ParseFailure> {
    let parsed: RawEvaluation = decode_structured(raw)?;

    if let Some(reasoning) = &parsed.reasoning {
        debug!(%reasoning, "Judge reasoning");
    }

    let is_safe = matches!(&parsed.verdict, Some(Value::String(v)) if v == "SAFE");

    Ok(Evaluation {
        is_safe,
        quality_score: coerce_score(parsed.quality_score)?,
        concerns: coerce_list("concerns", parsed.concerns)?,
        suggestions: coerce_list("suggestions", parsed.suggestions)?,
        confidence: coerce_confidence(parsed.confidence)?,
    })
}

/// Read a judge response, substituting [`Evaluation::fallback`] when it
/// cannot be decoded.
///
/// # Examples
///
/// ```
/// use taleweaver_story::parse_evaluation;
///
/// let verdict = parse_evaluation(r#"{"verdict": "SAFE", "quality_score": 4}"#);
/// assert!(verdict.is_accepted());
///
/// let unreadable = parse_evaluation("Looks fine to me!");
/// assert!(!unreadable.is_safe());
/// assert_eq!(*unreadable.quality_score(), 1);
/// ```
pub fn parse_evaluation(raw: &str) -> Evaluation {
    decode_evaluation(raw).unwrap_or_else(|failure| {
        warn!(%failure, raw_response = %raw, "Judge response unreadable, rejecting segment");
        Evaluation::fallback()
    })
}
