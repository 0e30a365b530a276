//! Google Gemini provider using the `generateContent` endpoint.
//!
//! Gemini takes one concatenated prompt string rather than a message list,
//! authenticates with a `key` query parameter, and nests the completion under
//! `candidates[0].content.parts[0].text`. Replies often arrive inside a
//! markdown code fence.

use async_trait::async_trait;
use log::info;
use serde::Serialize;
use serde_json::Value;

use crate::Provider;
use crate::inference::prompt::single_prompt;
use crate::inference::provider::{send_json, text_at};
use crate::inference::{CompletionProvider, CompletionRequest, ContentExtractor, ProviderError};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

// ============================================================================
// generateContent Types
// ============================================================================

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize, Debug)]
struct Content {
    parts: Vec<Part>,
}

/// The request body for `models/{model}:generateContent`
#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    fn for_text(text: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: single_prompt(text),
                }],
            }],
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Gemini API provider
pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl ContentExtractor for GeminiProvider {
    fn extract_content<'r>(&self, reply: &'r Value) -> Option<&'r str> {
        text_at(reply, "/candidates/0/content/parts/0/text")
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Value, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential(Provider::Gemini.credential_name()))?;

        let body = GenerateContentRequest::for_text(request.text);

        info!(
            "Gemini generateContent request: model={}, text_len={}",
            self.model,
            request.text.len()
        );

        let http_request = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", api_key)])
            .json(&body);

        send_json(self.name(), http_request).await
    }
}
