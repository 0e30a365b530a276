//! OpenRouter provider implementation using the Chat Completions API.
//!
//! OpenRouter fronts many upstream models, so the model is picked per call
//! from the request's variant. Upstream models don't all honour a JSON mode,
//! so no hint is sent and the completion may wrap its JSON in prose.

use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;

use super::chat::{ChatRequest, choice_content};
use crate::Provider;
use crate::inference::provider::send_json;
use crate::inference::{CompletionProvider, CompletionRequest, ContentExtractor, ProviderError};

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Used when a dispatch names no variant.
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_OPENROUTER_TITLE: &str = "Dialectic";

/// OpenRouter API provider
pub struct OpenRouterProvider {
    api_key: Option<String>,
    base_url: String,
    default_model: String,
    referer: Option<String>,
    title: String,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    /// Creates a new OpenRouter provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenRouter API key; calls fail fast without one
    /// * `base_url` - Optional custom base URL (defaults to OpenRouter's API)
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            default_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            referer: None,
            title: DEFAULT_OPENROUTER_TITLE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Sets the app attribution headers OpenRouter shows in its rankings.
    pub fn with_attribution(mut self, referer: Option<String>, title: impl Into<String>) -> Self {
        self.referer = referer;
        self.title = title.into();
        self
    }

    /// The variant if one was given, the default model otherwise.
    fn model_for<'a>(&'a self, variant: Option<&'a str>) -> &'a str {
        variant
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(&self.default_model)
    }
}

impl ContentExtractor for OpenRouterProvider {
    fn extract_content<'r>(&self, reply: &'r Value) -> Option<&'r str> {
        choice_content(reply)
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Value, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingCredential(
            Provider::OpenRouter.credential_name(),
        ))?;

        let model = self.model_for(request.variant);
        if request.variant.is_none() {
            debug!("No OpenRouter variant given, using default model {model}");
        }

        let body = ChatRequest::new(model, request.text, false);

        info!(
            "OpenRouter Chat Completions request: model={}, text_len={}",
            model,
            request.text.len()
        );

        let mut http_request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .header("X-Title", &self.title)
            .json(&body);
        if let Some(referer) = &self.referer {
            http_request = http_request.header("HTTP-Referer", referer);
        }

        send_json(self.name(), http_request).await
    }
}
