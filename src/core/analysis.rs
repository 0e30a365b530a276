//! # Analysis Model
//!
//! The request a caller submits and the canonical result every provider's
//! reply is normalized into.
//!
//! ```text
//! AnalysisRequest                     AnalysisResult
//! ├── text: String                    ├── claim: String
//! ├── provider: Provider              ├── premises: Vec<String>   // argument order
//! └── variant: Option<String>         └── emotions: EmotionScores // five keys, 1..=5
//!     (OpenRouter only)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Provider;

/// The closed set of emotion keys, in canonical order.
pub const EMOTION_NAMES: [&str; 5] = ["Anger", "Sadness", "Joy", "Fear", "Surprise"];

/// Inclusive bounds for every emotion score.
pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

// ============================================================================
// Request
// ============================================================================

/// Reasons a submission is rejected before anything is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The argument text was empty or whitespace only.
    EmptyText,
    /// The provider selector didn't name a supported provider.
    UnknownProvider(String),
    /// OpenRouter was selected without naming a model variant.
    MissingVariant,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::EmptyText => write!(f, "text must not be empty"),
            RequestError::UnknownProvider(name) => write!(
                f,
                "unknown model provider '{name}' (expected one of: openai, gemini, openrouter)"
            ),
            RequestError::MissingVariant => {
                write!(f, "an OpenRouter model must be selected when using openrouter")
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// One user submission. Only constructible through [`AnalysisRequest::new`],
/// so a value of this type always satisfies the request invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    text: String,
    provider: Provider,
    variant: Option<String>,
}

impl AnalysisRequest {
    /// Validates a submission.
    ///
    /// The variant is required (and must be non-blank) for the variant-capable
    /// provider and dropped for the others.
    pub fn new(
        text: impl Into<String>,
        provider: Provider,
        variant: Option<String>,
    ) -> Result<Self, RequestError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }

        let variant = variant
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let variant = if provider.is_variant_capable() {
            Some(variant.ok_or(RequestError::MissingVariant)?)
        } else {
            None
        };

        Ok(Self {
            text,
            provider,
            variant,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Label the caller keys its history entry by: the provider name, or
    /// `openrouter:<variant>` for the variant-capable provider.
    pub fn history_label(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{}:{}", self.provider, variant),
            None => self.provider.to_string(),
        }
    }
}

// ============================================================================
// Result
// ============================================================================

/// Emotional-tone scores, one per key in [`EMOTION_NAMES`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionScores {
    #[serde(rename = "Anger")]
    pub anger: u8,
    #[serde(rename = "Sadness")]
    pub sadness: u8,
    #[serde(rename = "Joy")]
    pub joy: u8,
    #[serde(rename = "Fear")]
    pub fear: u8,
    #[serde(rename = "Surprise")]
    pub surprise: u8,
}

impl EmotionScores {
    /// Scores paired with their canonical key, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u8)> {
        EMOTION_NAMES.into_iter().zip([
            self.anger,
            self.sadness,
            self.joy,
            self.fear,
            self.surprise,
        ])
    }
}

/// The provider-independent breakdown of an argument.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub claim: String,
    pub premises: Vec<String>,
    pub emotions: EmotionScores,
}
