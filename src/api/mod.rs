//! HTTP API surface.
//!
//! - `POST /api/analyze`: run one analysis
//! - `GET /health`: liveness probe

use actix_web::web;

pub mod analyze;
pub mod error;
pub mod health;

pub use error::{ApiError, ErrorResponse};

/// Registers every route, plus a JSON extractor config that reports
/// malformed bodies in the standard error format.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .configure(analyze::configure)
    .configure(health::configure);
}
