//! Recovering structured payloads from loosely formatted model output.
//!
//! Models wrap JSON in prose, code fences, or nothing at all. The extractor
//! takes the span from the first `{` to the last `}` and decodes it into a
//! declared schema. What happens when that fails depends on the call site:
//! prose-bearing calls fall back to the raw text ([`extract_prose`]), while
//! verdict-bearing calls map the [`ParseFailure`] to a conservative default.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Why a structured payload could not be recovered.
///
/// This is a recoverable outcome, never a fatal error: every caller maps it
/// to a lenient or fallback value.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseFailure {
    /// No `{ ... }` span in the response
    #[display("no structured span in response")]
    NoStructuredSpan,
    /// The span is not valid JSON for the expected schema
    #[display("invalid structured payload: {}", detail)]
    InvalidPayload {
        /// Decoder message
        detail: String,
    },
    /// A field is present but cannot be coerced to its declared type
    #[display("cannot coerce field `{}`: {}", field, detail)]
    Coercion {
        /// Field name
        field: &'static str,
        /// What was wrong with the value
        detail: String,
    },
}

impl std::error::Error for ParseFailure {}

/// Slice from the first `{` to the last `}`, if that span exists.
///
/// # Examples
///
/// ```
/// use taleweaver_story::structured_span;
///
/// let raw = "Sure! {\"story\": \"A {tiny} tale\"} Hope you like it.";
/// assert_eq!(structured_span(raw), Some("{\"story\": \"A {tiny} tale\"}"));
/// assert_eq!(structured_span("no braces here"), None);
/// assert_eq!(structured_span("} backwards {"), None);
/// ```
pub fn structured_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Decode the structured span of `raw` into `T`.
pub fn decode_structured<T: DeserializeOwned>(raw: &str) -> Result<T, ParseFailure> {
    let span = structured_span(raw).ok_or(ParseFailure::NoStructuredSpan)?;
    serde_json::from_str(span).map_err(|e| ParseFailure::InvalidPayload {
        detail: e.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct ProsePayload {
    #[serde(default)]
    story: Option<Value>,
}

/// Story text from a generation or revision response.
///
/// A `story` string field wins when the response carries one; otherwise the
/// whole response is the story. Never fails.
///
/// # Examples
///
/// ```
/// use taleweaver_story::extract_prose;
///
/// assert_eq!(extract_prose("{\"story\": \" Once upon a time \"}"), "Once upon a time");
/// assert_eq!(extract_prose("  Just prose.\n"), "Just prose.");
/// ```
pub fn extract_prose(raw: &str) -> String {
    match decode_structured::<ProsePayload>(raw) {
        Ok(ProsePayload {
            story: Some(Value::String(story)),
        }) => story.trim().to_string(),
        Ok(_) => {
            tracing::debug!("Structured response without a story string, using raw text");
            raw.trim().to_string()
        }
        Err(failure) => {
            tracing::trace!(%failure, "Prose response");
            raw.trim().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        name: String,
    }

    #[test]
    fn test_span_ignores_surrounding_text() {
        let raw = "```json\n{\"name\": \"Benny\"}\n```";
        assert_eq!(structured_span(raw), Some("{\"name\": \"Benny\"}"));
    }

    #[test]
    fn test_decode_structured_ok() {
        let probe: Probe = decode_structured("Here: {\"name\": \"Lily\"}").unwrap();
        assert_eq!(probe.name, "Lily");
    }

    #[test]
    fn test_decode_structured_no_span() {
        let result = decode_structured::<Probe>("plain words");
        assert_eq!(result, Err(ParseFailure::NoStructuredSpan));
    }

    #[test]
    fn test_decode_structured_invalid_json() {
        let result = decode_structured::<Probe>("{name: Lily}");
        assert!(matches!(result, Err(ParseFailure::InvalidPayload { .. })));
    }

    #[test]
    fn test_prose_with_non_string_story_uses_raw() {
        let raw = "{\"story\": 42}";
        assert_eq!(extract_prose(raw), raw);
    }

    #[test]
    fn test_prose_without_story_field_uses_raw() {
        let raw = " {\"title\": \"The Bunny\"} ";
        assert_eq!(extract_prose(raw), "{\"title\": \"The Bunny\"}");
    }

    #[test]
    fn test_prose_with_braces_in_text() {
        let raw = "The owl drew a shape like this: { and smiled.";
        assert_eq!(extract_prose(raw), raw);
    }

    #[test]
    fn test_prose_empty_response() {
        assert_eq!(extract_prose("   "), "");
    }
}
