//! REST endpoint for argument analysis

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;

use crate::Provider;
use crate::api::ApiError;
use crate::core::{AnalysisRequest, Analyzer};

/// Response header carrying the key the caller should file the result under.
pub const HISTORY_LABEL_HEADER: &str = "X-History-Label";

/// Body of `POST /api/analyze`
///
/// Missing fields default to empty so that they fail request validation with
/// the same error format as blank ones.
#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub text: String,
    /// Provider selector: `openai`, `gemini` or `openrouter`
    #[serde(default)]
    pub model: String,
    /// Model variant, required when `model` is `openrouter`
    #[serde(default, rename = "openRouterModel")]
    pub open_router_model: Option<String>,
}

impl TryFrom<AnalyzeBody> for AnalysisRequest {
    type Error = ApiError;

    fn try_from(body: AnalyzeBody) -> Result<Self, Self::Error> {
        let provider: Provider = body.model.parse()?;
        Ok(AnalysisRequest::new(body.text, provider, body.open_router_model)?)
    }
}

/// Analyze a piece of argumentative text
///
/// Returns the canonical analysis JSON on success.
#[post("/api/analyze")]
pub async fn analyze(
    analyzer: web::Data<Analyzer>,
    body: web::Json<AnalyzeBody>,
) -> Result<HttpResponse, ApiError> {
    let request = AnalysisRequest::try_from(body.into_inner())?;
    let result = analyzer.analyze(&request).await?;

    Ok(HttpResponse::Ok()
        .insert_header((HISTORY_LABEL_HEADER, request.history_label()))
        .json(result))
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze);
}
