//! Request orchestrators: the simplify and ask pipelines.
//!
//! Each pipeline trims its input once at entry, rejects blank values, drives
//! the external model calls in a fixed order, and assembles the response
//! value. Keyword extraction and readability scoring recover locally from
//! degenerate input; model failures propagate untouched so the caller can
//! surface the underlying message.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::classify::{classify_document, DocumentType};
use crate::highlight::highlight_keywords;
use crate::inference::{ModelError, ModelService, SummaryOptions};
use crate::keywords::{extract_keywords, DEFAULT_KEYWORD_COUNT};
use crate::readability::readability_summary;

/// Hard ceiling on requested summary length.
const SUMMARY_MAX_LENGTH_CAP: u32 = 120;

/// Requested summary length floor.
const SUMMARY_MIN_LENGTH: u32 = 20;

/// Everything the simplify pipeline produces for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplifiedDocument {
    pub summary: String,
    pub highlighted: String,
    pub keywords: Vec<String>,
    pub readability: String,
    pub doc_type: DocumentType,
}

/// The ask pipeline's answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentAnswer {
    pub question: String,
    pub answer: String,
    pub confidence: f64,
}

/// Pipeline failures, split along the error-handling taxonomy: blank input
/// (client error, checked before any external call) versus model failure
/// (server error, message propagated).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("required input was blank")]
    EmptyInput,

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Summarization length bounds for a document of `char_count` characters:
/// at most half the document, capped at 120, and never below the floor
/// of 20.
pub fn summary_length_bounds(char_count: usize) -> SummaryOptions {
    let max_length = (char_count / 2)
        .min(SUMMARY_MAX_LENGTH_CAP as usize)
        .max(SUMMARY_MIN_LENGTH as usize);
    SummaryOptions {
        max_length: max_length as u32,
        min_length: SUMMARY_MIN_LENGTH,
    }
}

/// Simplify one document: summary, keywords, readability of the summary,
/// keyword highlighting, and document type.
///
/// The text is trimmed once at entry; the trimmed value feeds the length
/// bounds and every downstream stage, so padding never skews the requested
/// summary size. Keywords come from the document text while readability and
/// highlighting apply to the summary. Rejects blank text before any
/// external call.
pub async fn simplify_document(
    models: &dyn ModelService,
    text: &str,
) -> Result<SimplifiedDocument, PipelineError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let bounds = summary_length_bounds(text.chars().count());
    let summary = models.summarize(text, bounds).await?;

    let keywords = extract_keywords(text, DEFAULT_KEYWORD_COUNT);
    let readability = readability_summary(&summary);
    let highlighted = highlight_keywords(&summary, &keywords);
    let doc_type = classify_document(models, text).await?;

    info!(doc_type = %doc_type, keyword_count = keywords.len(), "simplified document");

    Ok(SimplifiedDocument {
        summary,
        highlighted,
        keywords,
        readability,
        doc_type,
    })
}

/// Answer a free-form question against one document.
///
/// Both inputs are trimmed once at entry; the trimmed question is sent to
/// the model and echoed in the response. Missing answer text falls back to
/// "No answer found."; the confidence is the model score scaled to [0, 100]
/// and rounded to two decimals, 0.0 when the score is absent. Rejects blank
/// text or question before any external call.
pub async fn answer_question(
    models: &dyn ModelService,
    text: &str,
    question: &str,
) -> Result<DocumentAnswer, PipelineError> {
    let text = text.trim();
    let question = question.trim();
    if text.is_empty() || question.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let result = models.answer_question(question, text).await?;

    let answer = result
        .answer
        .unwrap_or_else(|| "No answer found.".to_string());
    let confidence = round_to_two_decimals(result.score.unwrap_or(0.0) * 100.0);

    info!(confidence, "answered question");

    Ok(DocumentAnswer {
        question: question.to_string(),
        answer,
        confidence,
    })
}

fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{LabelScore, QaResult};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Canned-response model service that records every call.
    struct RecordingModels {
        summary: String,
        top_label: String,
        qa: QaResult,
        summarize_calls: Mutex<Vec<(String, SummaryOptions)>>,
        classify_calls: Mutex<Vec<String>>,
        answer_calls: Mutex<Vec<(String, String)>>,
    }

    impl RecordingModels {
        fn new(summary: &str, top_label: &str, qa: QaResult) -> Self {
            Self {
                summary: summary.to_string(),
                top_label: top_label.to_string(),
                qa,
                summarize_calls: Mutex::new(Vec::new()),
                classify_calls: Mutex::new(Vec::new()),
                answer_calls: Mutex::new(Vec::new()),
            }
        }

        fn total_calls(&self) -> usize {
            self.summarize_calls.lock().unwrap().len()
                + self.classify_calls.lock().unwrap().len()
                + self.answer_calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ModelService for RecordingModels {
        async fn summarize(
            &self,
            text: &str,
            options: SummaryOptions,
        ) -> Result<String, ModelError> {
            self.summarize_calls
                .lock()
                .unwrap()
                .push((text.to_string(), options));
            Ok(self.summary.clone())
        }

        async fn classify(
            &self,
            text: &str,
            _candidate_labels: &[&str],
        ) -> Result<Vec<LabelScore>, ModelError> {
            self.classify_calls.lock().unwrap().push(text.to_string());
            Ok(vec![LabelScore {
                label: self.top_label.clone(),
                score: 0.9,
            }])
        }

        async fn answer_question(
            &self,
            question: &str,
            context: &str,
        ) -> Result<QaResult, ModelError> {
            self.answer_calls
                .lock()
                .unwrap()
                .push((question.to_string(), context.to_string()));
            Ok(self.qa.clone())
        }
    }

    /// Model service whose summarization is down.
    struct FailingSummarizer;

    #[async_trait]
    impl ModelService for FailingSummarizer {
        async fn summarize(
            &self,
            _text: &str,
            _options: SummaryOptions,
        ) -> Result<String, ModelError> {
            Err(ModelError::Api {
                status: 503,
                message: "model t5-small is loading".to_string(),
            })
        }

        async fn classify(
            &self,
            _text: &str,
            _candidate_labels: &[&str],
        ) -> Result<Vec<LabelScore>, ModelError> {
            Ok(vec![LabelScore {
                label: "legal affidavit".to_string(),
                score: 0.9,
            }])
        }

        async fn answer_question(
            &self,
            _question: &str,
            _context: &str,
        ) -> Result<QaResult, ModelError> {
            Ok(QaResult::default())
        }
    }

    #[test]
    fn test_length_bounds_follow_document_size() {
        // Half the characters, capped at 120, floored at 20
        assert_eq!(summary_length_bounds(100).max_length, 50);
        assert_eq!(summary_length_bounds(240).max_length, 120);
        assert_eq!(summary_length_bounds(10_000).max_length, 120);
        assert_eq!(summary_length_bounds(30).max_length, 20);
        assert_eq!(summary_length_bounds(0).max_length, 20);
        assert_eq!(summary_length_bounds(43).max_length, 21);

        assert_eq!(summary_length_bounds(100).min_length, 20);
        assert_eq!(summary_length_bounds(0).min_length, 20);
    }

    #[tokio::test]
    async fn test_simplify_assembles_all_fields() {
        let models = RecordingModels::new(
            "The tenant pays rent to the landlord.",
            "memorandum of understanding",
            QaResult::default(),
        );
        let text = "The tenant shall pay the landlord monthly rent under this agreement. \
                    The tenant shall maintain the premises.";

        let doc = simplify_document(&models, text).await.unwrap();

        assert_eq!(doc.summary, "The tenant pays rent to the landlord.");
        // Keywords come from the original text, not the summary
        assert_eq!(
            doc.keywords,
            vec!["shall", "tenant", "agreement", "landlord", "maintain"]
        );
        // Readability is computed on the summary
        assert_eq!(doc.readability, "Very Easy (Grade 2.3)");
        // Highlighting applies the keywords to the summary
        assert_eq!(
            doc.highlighted,
            "The <mark>tenant</mark> pays rent to the <mark>landlord</mark>."
        );
        // "agreement" in the text overrides the model's label
        assert_eq!(doc.doc_type, DocumentType::LegalAgreement);
    }

    #[tokio::test]
    async fn test_simplify_requests_bounds_for_its_text() {
        let models = RecordingModels::new("Summary.", "legal affidavit", QaResult::default());
        let text = "x".repeat(100);

        simplify_document(&models, &text).await.unwrap();

        let calls = models.summarize_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.max_length, 50);
        assert_eq!(calls[0].1.min_length, 20);
    }

    #[tokio::test]
    async fn test_simplify_strips_padding_before_sizing_and_sending() {
        let models = RecordingModels::new("Summary.", "legal affidavit", QaResult::default());
        let padded = format!("          {}          ", "x".repeat(100));

        simplify_document(&models, &padded).await.unwrap();

        // The stripped text is sent, and the bounds come from its length,
        // not the padded length (which would give 60)
        let calls = models.summarize_calls.lock().unwrap();
        assert_eq!(calls[0].0, "x".repeat(100));
        assert_eq!(calls[0].1.max_length, 50);
    }

    #[tokio::test]
    async fn test_simplify_rejects_blank_text_before_any_call() {
        let models = RecordingModels::new("unused", "legal affidavit", QaResult::default());

        for blank in ["", "   ", "\n\t "] {
            let result = simplify_document(&models, blank).await;
            assert!(matches!(result, Err(PipelineError::EmptyInput)));
        }
        assert_eq!(models.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_simplify_propagates_model_failure() {
        let result = simplify_document(&FailingSummarizer, "Some document text.").await;

        match result {
            Err(PipelineError::Model(e)) => {
                assert!(e.to_string().contains("model t5-small is loading"));
            }
            other => panic!("expected model failure, got {:?}", other.map(|d| d.summary)),
        }
    }

    #[tokio::test]
    async fn test_ask_scales_and_rounds_confidence() {
        let models = RecordingModels::new(
            "unused",
            "legal affidavit",
            QaResult {
                answer: Some("Within 30 days.".to_string()),
                score: Some(0.87654),
            },
        );

        let answer = answer_question(
            &models,
            "The deposit is returned within 30 days.",
            "When is the deposit returned?",
        )
        .await
        .unwrap();

        assert_eq!(answer.question, "When is the deposit returned?");
        assert_eq!(answer.answer, "Within 30 days.");
        assert!((answer.confidence - 87.65).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_ask_passes_question_and_context_through() {
        let models = RecordingModels::new("unused", "legal affidavit", QaResult::default());

        answer_question(&models, "Document body.", "What is this?")
            .await
            .unwrap();

        let calls = models.answer_calls.lock().unwrap();
        assert_eq!(
            *calls,
            [("What is this?".to_string(), "Document body.".to_string())]
        );
    }

    #[tokio::test]
    async fn test_ask_strips_padding_from_text_and_question() {
        let models = RecordingModels::new("unused", "legal affidavit", QaResult::default());

        let answer = answer_question(&models, "  The deposit is returned.  ", "  When?  ")
            .await
            .unwrap();

        // The echoed question and the model inputs carry no padding
        assert_eq!(answer.question, "When?");
        let calls = models.answer_calls.lock().unwrap();
        assert_eq!(
            *calls,
            [("When?".to_string(), "The deposit is returned.".to_string())]
        );
    }

    #[tokio::test]
    async fn test_ask_defaults_for_absent_answer_and_score() {
        let models = RecordingModels::new("unused", "legal affidavit", QaResult::default());

        let answer = answer_question(&models, "Document body.", "Anything?")
            .await
            .unwrap();

        assert_eq!(answer.answer, "No answer found.");
        assert_eq!(answer.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_ask_rejects_blank_inputs_before_any_call() {
        let models = RecordingModels::new("unused", "legal affidavit", QaResult::default());

        assert!(matches!(
            answer_question(&models, "", "A question?").await,
            Err(PipelineError::EmptyInput)
        ));
        assert!(matches!(
            answer_question(&models, "A document.", "  ").await,
            Err(PipelineError::EmptyInput)
        ));
        assert_eq!(models.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_full_confidence_is_exactly_one_hundred() {
        let models = RecordingModels::new(
            "unused",
            "legal affidavit",
            QaResult {
                answer: Some("Yes.".to_string()),
                score: Some(1.0),
            },
        );

        let answer = answer_question(&models, "Document.", "Certain?").await.unwrap();
        assert_eq!(answer.confidence, 100.0);
    }
}
