//! Unified API error handling
//!
//! Every endpoint returns `Result<T, ApiError>`; this module turns the error
//! into a consistent JSON body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use log::error;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AnalysisError, RequestError};

/// Standard error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message, meant to be shown to the user verbatim
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// The submission failed validation (400)
    BadRequest(String),
    /// The server is missing a provider credential (500)
    Configuration(String),
    /// The provider call failed or its reply was unusable (502)
    Provider(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) | ApiError::Configuration(msg) | ApiError::Provider(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Configuration(_) => "configuration_error",
            ApiError::Provider(_) => "provider_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        error!("API error: type={} status={} message={}", error_type, status.as_u16(), self);

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for core errors
// ============================================================================

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Configuration { .. } => ApiError::Configuration(err.to_string()),
            AnalysisError::Transport(_)
            | AnalysisError::EmptyContent
            | AnalysisError::Extraction
            | AnalysisError::Parse(_)
            | AnalysisError::Schema(_) => ApiError::Provider(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_errors_are_bad_requests() {
        let err = ApiError::from(RequestError::MissingVariant);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("OpenRouter model"));
    }

    #[test]
    fn test_missing_credential_is_server_error() {
        let err = ApiError::from(AnalysisError::Configuration {
            credential: "OPENROUTER_API_KEY",
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "missing credential: OPENROUTER_API_KEY is not configured"
        );
    }

    #[test]
    fn test_provider_failures_are_bad_gateway() {
        for err in [
            AnalysisError::Transport("openai: network error: timed out".to_string()),
            AnalysisError::EmptyContent,
            AnalysisError::Extraction,
            AnalysisError::Parse("eof".to_string()),
            AnalysisError::Schema("`Joy` must be between 1 and 5, got 9".to_string()),
        ] {
            let message = err.to_string();
            let api = ApiError::from(err);
            assert_eq!(api.status_code(), StatusCode::BAD_GATEWAY);
            assert_eq!(api.to_string(), message);
        }
    }

    #[actix_web::test]
    async fn test_error_response_body() {
        let response = ApiError::BadRequest("text must not be empty".to_string()).error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "bad_request");
        assert_eq!(body.message, "text must not be empty");
        assert!(Uuid::parse_str(&body.request_id).is_ok());
    }
}
