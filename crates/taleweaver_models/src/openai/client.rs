use crate::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use async_trait::async_trait;
use reqwest::Client;
use taleweaver_core::{GenerateRequest, GenerateResponse, TokenUsage};
use taleweaver_error::{ModelsError, ModelsErrorKind, ModelsResult, TaleweaverResult};
use taleweaver_interface::TaleweaverDriver;
use tracing::{debug, error, instrument};

/// Default chat completions endpoint.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Map a non-success HTTP status to an error kind.
///
/// 429 becomes [`ModelsErrorKind::RateLimited`] so the retry layer picks it
/// up; anything else is a fatal API error.
///
/// # Examples
///
/// ```
/// use taleweaver_error::ModelsErrorKind;
/// use taleweaver_models::classify_status;
///
/// assert!(classify_status(429, "slow down".into()).is_retryable());
/// assert!(!classify_status(401, "bad key".into()).is_retryable());
/// ```
pub fn classify_status(status: u16, body: String) -> ModelsErrorKind {
    match status {
        429 => ModelsErrorKind::RateLimited(body),
        _ => ModelsErrorKind::Api {
            status,
            message: body,
        },
    }
}

/// Client for OpenAI-compatible chat completion APIs.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    /// Creates a new client against the public OpenAI endpoint.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key sent as a bearer token
    /// * `model` - Model identifier (e.g., "gpt-3.5-turbo")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: OPENAI_API_URL.to_string(),
        }
    }

    /// Creates a client reading the API key from `api_key_env`.
    pub fn from_env(api_key_env: &str, model: impl Into<String>) -> ModelsResult<Self> {
        let api_key = std::env::var(api_key_env)
            .map_err(|_| ModelsError::new(ModelsErrorKind::MissingApiKey(api_key_env.into())))?;
        Ok(Self::new(api_key, model))
    }

    /// Point the client at a different OpenAI-compatible endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a request to the chat completions endpoint.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn chat(&self, request: &ChatCompletionRequest) -> ModelsResult<ChatCompletionResponse> {
        debug!(endpoint = %self.endpoint, "Sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send chat completion request");
                ModelsError::new(ModelsErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat completion returned error");
            return Err(ModelsError::new(classify_status(status.as_u16(), body)));
        }

        let chat_response: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat completion response");
            ModelsError::new(ModelsErrorKind::ResponseParse(e.to_string()))
        })?;

        debug!(
            response_id = %chat_response.id(),
            choices = chat_response.choices().len(),
            "Received chat completion"
        );
        Ok(chat_response)
    }

    /// Converts a generic request to the chat completions wire format.
    pub fn convert_request(&self, request: &GenerateRequest) -> ModelsResult<ChatCompletionRequest> {
        let messages: Vec<ChatMessage> = request
            .messages
            .iter()
            .map(|msg| ChatMessage::new(msg.role.to_string(), msg.content.clone()))
            .collect();

        let model = request.model.clone().unwrap_or_else(|| self.model.clone());

        ChatCompletionRequest::builder()
            .model(model)
            .messages(messages)
            .max_tokens(request.max_tokens)
            .temperature(request.temperature)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))
    }

    /// Converts a chat completions response to the generic response.
    ///
    /// Choices without content are dropped.
    pub fn convert_response(response: &ChatCompletionResponse) -> GenerateResponse {
        let outputs = response
            .choices()
            .iter()
            .filter_map(|choice| choice.message().content().clone())
            .collect();

        let usage = response.usage().map(|u| TokenUsage {
            prompt_tokens: *u.prompt_tokens(),
            completion_tokens: *u.completion_tokens(),
        });

        GenerateResponse { outputs, usage }
    }
}

#[async_trait]
impl TaleweaverDriver for OpenAiClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> TaleweaverResult<GenerateResponse> {
        let chat_request = self.convert_request(req)?;
        let chat_response = self.chat(&chat_request).await?;
        Ok(Self::convert_response(&chat_response))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
