//! External model services behind one injectable trait.
//!
//! Summarization, zero-shot classification, and question answering are all
//! delegated to pretrained models. The pipeline only ever talks to
//! [`ModelService`], so orchestrators and the classifier can be exercised
//! with fakes in tests while production wires in [`HostedModelService`].

pub mod hosted;

pub use hosted::{HostedModelService, InferenceConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Failures surfaced by a model service.
///
/// Every failure is terminal for the request: no retries, no fallbacks.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("inference request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed inference response: {0}")]
    MalformedResponse(String),
}

/// Length bounds for a summarization call. Decoding is deterministic; the
/// service must not sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub max_length: u32,
    pub min_length: u32,
}

/// One candidate label with the model's confidence for it.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Raw question-answering output. Services may omit either field; defaults
/// are applied by the orchestrator, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QaResult {
    pub answer: Option<String>,
    pub score: Option<f64>,
}

/// The three pretrained-model operations the pipeline consumes.
///
/// Implementations must be safe to share across concurrent requests; every
/// call is stateless given its inputs.
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Summarize `text` within the given length bounds.
    async fn summarize(&self, text: &str, options: SummaryOptions) -> Result<String, ModelError>;

    /// Rank `candidate_labels` against `text`, best first (single-label
    /// zero-shot classification).
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<LabelScore>, ModelError>;

    /// Answer `question` using `context` as the supporting document.
    async fn answer_question(&self, question: &str, context: &str)
        -> Result<QaResult, ModelError>;
}
