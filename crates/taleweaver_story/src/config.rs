//! Layered configuration for Taleweaver.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from taleweaver.toml)
//! - `~/.config/taleweaver/taleweaver.toml`
//! - `./taleweaver.toml`

use crate::{RewriteGate, RewriteKind, ValidationGatedPipeline};
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use taleweaver_core::SamplingParams;
use taleweaver_error::{ConfigError, TaleweaverError, TaleweaverResult};
use taleweaver_rate_limit::RetryPolicy;
use tracing::{debug, instrument};

/// Which backend to talk to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct BackendConfig {
    /// Chat completions endpoint
    base_url: String,
    /// Model identifier
    model: String,
    /// Environment variable holding the API key
    api_key_env: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl BackendConfig {
    /// Replace the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Pipeline behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct PipelineConfig {
    /// Generate-or-revise attempts per segment
    max_retry_attempts: u32,
    /// Whether whole-story rewrites are judged
    rewrite_gate: RewriteGate,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retry_attempts: ValidationGatedPipeline::DEFAULT_MAX_RETRY_ATTEMPTS,
            rewrite_gate: RewriteGate::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a pipeline configuration.
    pub fn new(max_retry_attempts: u32, rewrite_gate: RewriteGate) -> Self {
        Self {
            max_retry_attempts,
            rewrite_gate,
        }
    }
}

/// Sampling parameters for each kind of backend call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct SamplingProfile {
    /// Opening, continuation and ending drafts
    story: SamplingParams,
    /// Judge verdicts
    judge: SamplingParams,
    /// Revisions of rejected drafts
    revision: SamplingParams,
    /// Metadata extraction
    metadata: SamplingParams,
    /// Free-form change requests
    change_request: SamplingParams,
    /// Tone changes
    tone: SamplingParams,
    /// Character additions
    character: SamplingParams,
    /// Setting changes
    setting: SamplingParams,
}

impl Default for SamplingProfile {
    fn default() -> Self {
        Self {
            story: SamplingParams::new(500, 0.7),
            judge: SamplingParams::new(400, 0.1),
            revision: SamplingParams::new(500, 0.6),
            metadata: SamplingParams::new(200, 0.1),
            change_request: SamplingParams::new(1000, 0.6),
            tone: SamplingParams::new(1000, 0.7),
            character: SamplingParams::new(800, 0.6),
            setting: SamplingParams::new(1000, 0.6),
        }
    }
}

impl SamplingProfile {
    /// Sampling for a whole-story rewrite.
    pub fn for_rewrite(&self, kind: RewriteKind) -> SamplingParams {
        match kind {
            RewriteKind::ChangeRequest => self.change_request,
            RewriteKind::Tone => self.tone,
            RewriteKind::Character => self.character,
            RewriteKind::Setting => self.setting,
        }
    }
}

/// Top-level Taleweaver configuration.
///
/// # Example
///
/// ```toml
/// [backend]
/// model = "gpt-4o-mini"
///
/// [pipeline]
/// max_retry_attempts = 3
/// rewrite_gate = "judged"
///
/// [sampling.story]
/// max_tokens = 600
/// temperature = 0.8
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct TaleweaverConfig {
    /// Backend selection
    backend: BackendConfig,
    /// Rate-limit retry for backend calls
    retry: RetryPolicy,
    /// Pipeline behaviour
    pipeline: PipelineConfig,
    /// Per-call sampling
    sampling: SamplingProfile,
}

impl TaleweaverConfig {
    /// Replace the backend section.
    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    /// Replace the retry section.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the pipeline section.
    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Load configuration from a specific file path.
    ///
    /// Keys missing from the file take their built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> TaleweaverResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> TaleweaverResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../taleweaver.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/taleweaver/taleweaver.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("taleweaver").required(false));

        builder
            .build()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
