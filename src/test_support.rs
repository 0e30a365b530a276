//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::inference::{CompletionProvider, CompletionRequest, ContentExtractor, ProviderError};

/// A provider that records each call and answers with a canned outcome.
/// Replies use the chat-completions envelope.
pub struct StubProvider {
    outcome: Result<Value, ProviderError>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl StubProvider {
    pub fn replying(reply: Value) -> Self {
        Self {
            outcome: Ok(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: ProviderError) -> Self {
        Self {
            outcome: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(text, variant)` for every call made so far.
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContentExtractor for StubProvider {
    fn extract_content<'r>(&self, reply: &'r Value) -> Option<&'r str> {
        crate::inference::providers::chat::choice_content(reply)
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Value, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.text.to_string(), request.variant.map(str::to_string)));
        self.outcome.clone()
    }
}
