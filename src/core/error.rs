use std::fmt;

use crate::Provider;
use crate::inference::ProviderError;

/// Progress of a single analysis call. Calls move strictly forward; any
/// stage after `Idle` can end in failure instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnalysisStage {
    Idle,
    Dispatched,
    AwaitingHttp,
    ContentExtracted,
    JsonIsolated,
    Parsed,
    Validated,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisStage::Idle => "idle",
            AnalysisStage::Dispatched => "dispatched",
            AnalysisStage::AwaitingHttp => "awaiting-http",
            AnalysisStage::ContentExtracted => "content-extracted",
            AnalysisStage::JsonIsolated => "json-isolated",
            AnalysisStage::Parsed => "parsed",
            AnalysisStage::Validated => "validated",
        };
        f.write_str(name)
    }
}

/// Everything that can end an analysis call. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The provider's credential is not configured. Raised before any network call.
    Configuration { credential: &'static str },
    /// Network failure or non-success HTTP status from the provider.
    Transport(String),
    /// The provider answered, but there was no completion text where expected.
    EmptyContent,
    /// The completion text held no `{...}` span.
    Extraction,
    /// The isolated span is not valid JSON.
    Parse(String),
    /// The JSON doesn't match the canonical result shape.
    Schema(String),
}

impl AnalysisError {
    /// Wraps an adapter failure, tagging transport messages with the provider.
    pub fn from_provider(provider: Provider, err: ProviderError) -> Self {
        match err {
            ProviderError::MissingCredential(credential) => {
                AnalysisError::Configuration { credential }
            }
            other => AnalysisError::Transport(format!("{provider}: {other}")),
        }
    }

    /// The stage the call was trying to reach when it failed.
    pub fn failed_stage(&self) -> AnalysisStage {
        match self {
            AnalysisError::Configuration { .. } => AnalysisStage::Dispatched,
            AnalysisError::Transport(_) => AnalysisStage::AwaitingHttp,
            AnalysisError::EmptyContent => AnalysisStage::ContentExtracted,
            AnalysisError::Extraction => AnalysisStage::JsonIsolated,
            AnalysisError::Parse(_) => AnalysisStage::Parsed,
            AnalysisError::Schema(_) => AnalysisStage::Validated,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Configuration { credential } => {
                write!(f, "missing credential: {credential} is not configured")
            }
            AnalysisError::Transport(msg) => write!(f, "{msg}"),
            AnalysisError::EmptyContent => write!(f, "empty response"),
            AnalysisError::Extraction => write!(f, "could not extract JSON"),
            AnalysisError::Parse(msg) => write!(f, "failed to parse JSON response: {msg}"),
            AnalysisError::Schema(msg) => write!(f, "invalid response format: {msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {}
