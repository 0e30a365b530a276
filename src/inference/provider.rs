use std::fmt;

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider's API key isn't configured. Raised before any request is sent.
    MissingCredential(&'static str),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status. `message` is the provider-reported
    /// error text, or the HTTP status line when the body carries none.
    Api { status: u16, message: String },
    /// A success response whose body isn't JSON.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::MissingCredential(name) => write!(f, "missing credential: {name}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to fulfill a completion request.
pub struct CompletionRequest<'a> {
    /// The user's argument text, sent verbatim after the system instruction.
    pub text: &'a str,
    /// Model variant. Only the variant-capable provider reads it.
    pub variant: Option<&'a str>,
}

/// Locates the completion text inside a provider's reply envelope.
pub trait ContentExtractor {
    /// Returns the completion text, or `None` if the envelope has no
    /// non-blank text where this provider puts it.
    fn extract_content<'r>(&self, reply: &'r Value) -> Option<&'r str>;

    /// Whether the completion may surround its JSON object with prose.
    /// Providers with a native JSON mode return `false`.
    fn wraps_json(&self) -> bool {
        true
    }
}

#[async_trait]
pub trait CompletionProvider: ContentExtractor + Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Issues exactly one completion call and returns the raw reply envelope.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Value, ProviderError>;
}

/// Looks up a JSON pointer and returns it as non-blank text.
pub(crate) fn text_at<'r>(reply: &'r Value, pointer: &str) -> Option<&'r str> {
    reply
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Sends a prepared request and reads the reply body as JSON.
///
/// An empty success body comes back as `Value::Null` so that the
/// normalizer reports it as empty content.
pub(crate) async fn send_json(
    provider: &str,
    request: reqwest::RequestBuilder,
) -> Result<Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

    let status = response.status();
    debug!("{provider} response status: {status}");

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

    if !status.is_success() {
        warn!("{provider} API error: {} - {}", status.as_u16(), body);
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: reported_error(&body).unwrap_or_else(|| status.to_string()),
        });
    }

    debug!("Raw {provider} reply: {body}");
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body)
        .map_err(|e| ProviderError::Parse(format!("reply body is not JSON: {e}")))
}

/// Pulls the human-readable error text out of an error body.
/// All three providers use `{"error": {"message": ...}}`; some proxies send
/// `{"error": "..."}` instead.
fn reported_error(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_string)
}
