//! OpenAI provider using the Chat Completions API.
//!
//! Fixed model, native JSON mode (`response_format: json_object`), so the
//! completion is expected to be a bare JSON object.

use async_trait::async_trait;
use log::info;
use serde_json::Value;

use super::chat::{ChatRequest, choice_content};
use crate::Provider;
use crate::inference::provider::send_json;
use crate::inference::{CompletionProvider, CompletionRequest, ContentExtractor, ProviderError};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// OpenAI API provider
pub struct OpenAiProvider {
    api_key: Option<String>,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Creates a new OpenAI provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key; calls fail fast without one
    /// * `base_url` - Optional custom base URL (defaults to OpenAI's API)
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl ContentExtractor for OpenAiProvider {
    fn extract_content<'r>(&self, reply: &'r Value) -> Option<&'r str> {
        choice_content(reply)
    }

    fn wraps_json(&self) -> bool {
        false
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Value, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential(Provider::OpenAi.credential_name()))?;

        let body = ChatRequest::new(&self.model, request.text, true);

        info!(
            "OpenAI Chat Completions request: model={}, text_len={}",
            self.model,
            request.text.len()
        );

        let http_request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body);

        send_json(self.name(), http_request).await
    }
}
