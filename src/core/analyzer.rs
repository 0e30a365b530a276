//! # Analyzer
//!
//! Entry point of the core: routes a request to its provider, issues the one
//! HTTP call, and normalizes the reply.
//!
//! ```text
//! Analyzer
//! ├── openai: Arc<dyn CompletionProvider>      // fixed model, JSON mode
//! ├── gemini: Arc<dyn CompletionProvider>      // fixed model, single prompt
//! └── openrouter: Arc<dyn CompletionProvider>  // caller-chosen variant
//! ```
//!
//! The analyzer holds no per-call state; one instance serves every request.

use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::Value;

use crate::Provider;
use crate::core::analysis::{AnalysisRequest, AnalysisResult};
use crate::core::config::ResolvedConfig;
use crate::core::error::{AnalysisError, AnalysisStage};
use crate::core::normalize::normalize;
use crate::inference::{
    CompletionProvider, CompletionRequest, GeminiProvider, OpenAiProvider, OpenRouterProvider,
};

pub struct Analyzer {
    openai: Arc<dyn CompletionProvider>,
    gemini: Arc<dyn CompletionProvider>,
    openrouter: Arc<dyn CompletionProvider>,
}

impl Analyzer {
    pub fn new(
        openai: Arc<dyn CompletionProvider>,
        gemini: Arc<dyn CompletionProvider>,
        openrouter: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            openai,
            gemini,
            openrouter,
        }
    }

    /// Builds the three HTTP adapters from resolved configuration.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let openai = OpenAiProvider::new(
            config.openai_api_key.clone(),
            Some(config.openai_base_url.clone()),
        )
        .with_model(config.openai_model.clone());

        let gemini = GeminiProvider::new(
            config.gemini_api_key.clone(),
            Some(config.gemini_base_url.clone()),
        )
        .with_model(config.gemini_model.clone());

        let openrouter = OpenRouterProvider::new(
            config.openrouter_api_key.clone(),
            Some(config.openrouter_base_url.clone()),
        )
        .with_default_model(config.openrouter_default_model.clone())
        .with_attribution(
            config.openrouter_referer.clone(),
            config.openrouter_title.clone(),
        );

        for provider in Provider::ALL {
            let configured = match provider {
                Provider::OpenAi => config.openai_api_key.is_some(),
                Provider::Gemini => config.gemini_api_key.is_some(),
                Provider::OpenRouter => config.openrouter_api_key.is_some(),
            };
            if !configured {
                warn!(
                    "{} is not set; {} requests will be rejected",
                    provider.credential_name(),
                    provider
                );
            }
        }

        Self::new(Arc::new(openai), Arc::new(gemini), Arc::new(openrouter))
    }

    pub fn provider(&self, provider: Provider) -> &dyn CompletionProvider {
        match provider {
            Provider::OpenAi => self.openai.as_ref(),
            Provider::Gemini => self.gemini.as_ref(),
            Provider::OpenRouter => self.openrouter.as_ref(),
        }
    }

    /// Sends `text` to `provider` and returns the raw reply envelope.
    ///
    /// The variant is optional here even for OpenRouter (the adapter falls
    /// back to its default model); [`AnalysisRequest::new`] is where it is
    /// required.
    pub async fn dispatch(
        &self,
        text: &str,
        provider: Provider,
        variant: Option<&str>,
    ) -> Result<Value, AnalysisError> {
        debug!("{}: provider={}", AnalysisStage::Dispatched, provider);
        let request = CompletionRequest {
            text,
            variant: variant.filter(|_| provider.is_variant_capable()),
        };

        let reply = self
            .provider(provider)
            .complete(request)
            .await
            .map_err(|e| AnalysisError::from_provider(provider, e))?;
        debug!("{}: reply received from {}", AnalysisStage::AwaitingHttp, provider);
        Ok(reply)
    }

    /// Runs one analysis end to end. A single attempt: errors are returned
    /// as-is, never retried or re-routed.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let provider = request.provider();
        info!(
            "Analyzing {} bytes with {}",
            request.text().len(),
            request.history_label()
        );

        let outcome = match self
            .dispatch(request.text(), provider, request.variant())
            .await
        {
            Ok(reply) => normalize(self.provider(provider), &reply),
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(result) => info!(
                "{}: {} premise(s) from {}",
                AnalysisStage::Validated,
                result.premises.len(),
                provider
            ),
            Err(e) => warn!(
                "Analysis with {} failed at {}: {}",
                provider,
                e.failed_stage(),
                e
            ),
        }
        outcome
    }
}
