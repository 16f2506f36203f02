//! Trait definitions for text generation backends.

use async_trait::async_trait;
use std::sync::Arc;
use taleweaver_core::{GenerateRequest, GenerateResponse};
use taleweaver_error::TaleweaverResult;

/// Core trait that all text generation backends must implement.
///
/// A call either succeeds, fails with a transient condition that
/// [`RetryableError::is_retryable`](taleweaver_error::RetryableError) reports,
/// or fails permanently. Retrying is the caller's job.
#[async_trait]
pub trait TaleweaverDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> TaleweaverResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-3.5-turbo").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D: TaleweaverDriver + ?Sized> TaleweaverDriver for Arc<D> {
    async fn generate(&self, req: &GenerateRequest) -> TaleweaverResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
