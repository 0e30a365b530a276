//! # Core Application Logic
//!
//! The request-dispatch and response-normalization layer. It knows nothing
//! about HTTP routing or the command line.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • AnalysisRequest      │
//!                    │  • Analyzer (dispatch)  │
//!                    │  • normalize()          │
//!                    │                         │
//!                    │  Stateless per call.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    HTTP    │      │    CLI     │      │ Providers  │
//!     │   (api)    │      │  (main)    │      │(inference) │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`analysis`]: request and canonical result types
//! - [`analyzer`]: the `Analyzer`, which dispatches and normalizes
//! - [`config`]: layered configuration
//! - [`error`]: `AnalysisError` and the per-call stages
//! - [`normalize`]: reply → `AnalysisResult`

pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod normalize;

pub use analysis::{AnalysisRequest, AnalysisResult, EmotionScores, RequestError};
pub use analyzer::Analyzer;
pub use error::{AnalysisError, AnalysisStage};
