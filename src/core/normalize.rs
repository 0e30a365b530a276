//! # Response Normalizer
//!
//! Turns a provider's raw reply into the canonical [`AnalysisResult`]:
//!
//! ```text
//! raw reply ──extract──▶ text ──isolate──▶ {...} ──parse──▶ JSON ──validate──▶ AnalysisResult
//!           (per provider)    (if the provider
//!                              wraps JSON in prose)
//! ```
//!
//! Only the extraction step knows which provider answered. Validation is the
//! same for everyone.

use log::debug;
use serde_json::{Map, Value};

use crate::core::analysis::{AnalysisResult, EMOTION_NAMES, EmotionScores, MAX_SCORE, MIN_SCORE};
use crate::core::error::{AnalysisError, AnalysisStage};
use crate::inference::ContentExtractor;

/// Runs all four steps against a reply from the provider behind `extractor`.
pub fn normalize<E>(extractor: &E, reply: &Value) -> Result<AnalysisResult, AnalysisError>
where
    E: ContentExtractor + ?Sized,
{
    let content = extractor
        .extract_content(reply)
        .ok_or(AnalysisError::EmptyContent)?;
    debug!("{}: {} bytes", AnalysisStage::ContentExtracted, content.len());

    let candidate = if extractor.wraps_json() {
        isolate_json(content).ok_or(AnalysisError::Extraction)?
    } else {
        content.trim()
    };
    debug!("{}: {} bytes", AnalysisStage::JsonIsolated, candidate.len());

    let value: Value =
        serde_json::from_str(candidate).map_err(|e| AnalysisError::Parse(e.to_string()))?;
    debug!("{}", AnalysisStage::Parsed);

    validate(&value)
}

/// The span from the first `{` through the last `}`, if there is one.
pub fn isolate_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

fn schema(msg: impl Into<String>) -> AnalysisError {
    AnalysisError::Schema(msg.into())
}

/// Checks a parsed object against the canonical result shape.
///
/// Keys other than `claim`, `premises` and `emotions` at the top level are
/// ignored; inside `emotions` they are an error.
pub fn validate(value: &Value) -> Result<AnalysisResult, AnalysisError> {
    let object = value
        .as_object()
        .ok_or_else(|| schema("expected a JSON object"))?;

    let claim = object
        .get("claim")
        .and_then(Value::as_str)
        .ok_or_else(|| schema("`claim` must be a string"))?
        .to_string();

    let premises = object
        .get("premises")
        .and_then(Value::as_array)
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| schema("`premises` must be an array of strings"))?;

    let emotions = object
        .get("emotions")
        .and_then(Value::as_object)
        .ok_or_else(|| schema("`emotions` must be an object"))?;

    Ok(AnalysisResult {
        claim,
        premises,
        emotions: validate_emotions(emotions)?,
    })
}

fn validate_emotions(emotions: &Map<String, Value>) -> Result<EmotionScores, AnalysisError> {
    if let Some(extra) = emotions
        .keys()
        .find(|key| !EMOTION_NAMES.contains(&key.as_str()))
    {
        return Err(schema(format!("unexpected emotion `{extra}`")));
    }

    let score = |name: &str| -> Result<u8, AnalysisError> {
        let raw = emotions
            .get(name)
            .ok_or_else(|| schema(format!("missing emotion `{name}`")))?;
        let n = raw
            .as_i64()
            .ok_or_else(|| schema(format!("`{name}` must be an integer, got {raw}")))?;
        if !(i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&n) {
            return Err(schema(format!(
                "`{name}` must be between {MIN_SCORE} and {MAX_SCORE}, got {raw}"
            )));
        }
        Ok(n as u8)
    };

    Ok(EmotionScores {
        anger: score("Anger")?,
        sadness: score("Sadness")?,
        joy: score("Joy")?,
        fear: score("Fear")?,
        surprise: score("Surprise")?,
    })
}
