//! One-shot extraction of characters, setting and theme.

use crate::extraction::{ParseFailure, decode_structured};
use crate::{StoryMetadata, TextBackend, prompts};
use async_trait::async_trait;
use serde::Deserialize;
use taleweaver_core::SamplingParams;
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::TaleweaverDriver;
use tracing::{instrument, warn};

/// Derives story metadata from an opening segment.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Extract metadata from `segment`. Unreadable output yields
    /// [`StoryMetadata::fallback`].
    async fn extract(&self, segment: &str) -> TaleweaverResult<StoryMetadata>;
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    characters: Option<Vec<String>>,
    #[serde(default)]
    setting: Option<String>,
    #[serde(default)]
    theme: Option<String>,
}

/// Decode an extraction response.
///
/// Fields missing from an otherwise valid record get in-record defaults: no
/// characters, `"Unknown setting"`, `"Adventure"`.
pub fn decode_metadata(raw: &str) -> Result<StoryMetadata, ParseFailure> {
    let parsed: RawMetadata = decode_structured(raw)?;
    Ok(StoryMetadata::new(
        parsed.characters.unwrap_or_default(),
        parsed.setting.unwrap_or_else(|| "Unknown setting".to_string()),
        parsed.theme.unwrap_or_else(|| "Adventure".to_string()),
    ))
}

/// Read an extraction response, substituting [`StoryMetadata::fallback`]
/// when it cannot be decoded.
///
/// # Examples
///
/// ```
/// use taleweaver_story::parse_metadata;
///
/// let meta = parse_metadata(r#"{"characters": ["Benny"], "setting": "A meadow", "theme": "Kindness"}"#);
/// assert_eq!(meta.setting(), "A meadow");
///
/// let meta = parse_metadata("I could not find any characters.");
/// assert_eq!(meta.characters(), &vec!["Main character".to_string()]);
/// ```
pub fn parse_metadata(raw: &str) -> StoryMetadata {
    decode_metadata(raw).unwrap_or_else(|failure| {
        warn!(%failure, raw_response = %raw, "Metadata response unreadable, using fallback");
        StoryMetadata::fallback()
    })
}

/// Metadata extractor that asks the backend.
#[derive(Debug, Clone)]
pub struct LlmMetadataExtractor<D> {
    backend: TextBackend<D>,
    params: SamplingParams,
}

impl<D: TaleweaverDriver> LlmMetadataExtractor<D> {
    /// Create an extractor.
    pub fn new(backend: TextBackend<D>, params: SamplingParams) -> Self {
        Self { backend, params }
    }
}

#[async_trait]
impl<D: TaleweaverDriver> MetadataExtractor for LlmMetadataExtractor<D> {
    #[instrument(skip_all)]
    async fn extract(&self, segment: &str) -> TaleweaverResult<StoryMetadata> {
        let prompt = prompts::metadata_prompt(segment);
        let raw = self.backend.complete(&prompt, self.params).await?;
        Ok(parse_metadata(&raw))
    }
}
