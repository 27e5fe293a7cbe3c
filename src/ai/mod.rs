//! AI explanation collaborator
//!
//! Takes a read-only view of one term and produces free-text commentary.
//! Purely advisory: failures are shown inline by the caller and never
//! touch repository state.

pub mod gemini;
pub mod task;

use thiserror::Error;

use crate::entities::Term;

pub use gemini::GeminiClient;
pub use task::ExplanationTask;

/// Errors from the explanation service. All of them are recoverable:
/// the caller displays the message and carries on.
#[derive(Debug, Clone, Error)]
pub enum ExplainError {
    #[error("API key not found. Set GEMINI_API_KEY or api_key in the config.")]
    MissingApiKey,

    #[error("explanation request failed: {0}")]
    Transport(String),

    #[error("explanation service returned no usable text")]
    EmptyResponse,
}

/// Explanation provider interface: one term in, free text out.
///
/// The core never parses or validates the returned text.
pub trait Explain {
    fn explain(&self, term: &Term) -> Result<String, ExplainError>;
}
