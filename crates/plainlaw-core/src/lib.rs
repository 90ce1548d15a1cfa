//! PlainLaw Core - Legal document simplification pipeline
//!
//! This crate provides:
//! - Text normalization for classifier input
//! - Single-document TF-IDF keyword extraction
//! - Flesch-Kincaid readability scoring with qualitative bands
//! - Keyword highlighting in summaries
//! - Two-stage document classification (zero-shot model + override rules)
//! - The simplify/ask request orchestrators
//! - The `ModelService` trait and its hosted-inference implementation

pub mod classify;
pub mod highlight;
pub mod inference;
pub mod keywords;
pub mod pipeline;
pub mod readability;
pub mod text;

// Re-export commonly used types
pub use classify::{classify_document, DocumentType};
pub use inference::{
    HostedModelService, InferenceConfig, LabelScore, ModelError, ModelService, QaResult,
    SummaryOptions,
};
pub use keywords::extract_keywords;
pub use pipeline::{
    answer_question, simplify_document, DocumentAnswer, PipelineError, SimplifiedDocument,
};
