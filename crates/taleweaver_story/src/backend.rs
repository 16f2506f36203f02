//! Prompt-in, text-out access to a generation driver.

use std::sync::Arc;
use taleweaver_core::{GenerateRequest, SamplingParams};
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::TaleweaverDriver;
use taleweaver_rate_limit::RetryPolicy;
use tracing::{debug, instrument};

/// A driver plus the retry policy for its transient failures.
///
/// Cloning shares the driver.
#[derive(Debug)]
pub struct TextBackend<D> {
    driver: Arc<D>,
    retry: RetryPolicy,
}

impl<D> Clone for TextBackend<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            retry: self.retry.clone(),
        }
    }
}

impl<D: TaleweaverDriver> TextBackend<D> {
    /// Wrap a driver.
    pub fn new(driver: D, retry: RetryPolicy) -> Self {
        Self::from_arc(Arc::new(driver), retry)
    }

    /// Wrap a driver that is already shared.
    pub fn from_arc(driver: Arc<D>, retry: RetryPolicy) -> Self {
        Self { driver, retry }
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Send `prompt` as a single user message and return the response text.
    ///
    /// Rate-limit failures are retried under the backoff policy. Any other
    /// failure, or running out of retries, is returned as an error.
    #[instrument(
        skip(self, prompt),
        fields(
            provider = self.driver.provider_name(),
            max_tokens = params.max_tokens(),
            temperature = params.temperature(),
        )
    )]
    pub async fn complete(&self, prompt: &str, params: SamplingParams) -> TaleweaverResult<String> {
        let request = GenerateRequest::from_prompt(prompt, params);
        let response = self
            .retry
            .execute(|| self.driver.generate(&request))
            .await?;
        let text = response.text();
        debug!(response_len = text.len(), "Backend call complete");
        Ok(text)
    }
}
