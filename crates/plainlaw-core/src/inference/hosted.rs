//! Hosted model inference over HTTP.
//!
//! Production implementation of [`ModelService`] that posts to a hosted
//! inference API (Hugging Face Inference API wire format), one model
//! endpoint per task. Calls are single-attempt with no client-side timeout;
//! failures surface directly as [`ModelError`].

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::{LabelScore, ModelError, ModelService, QaResult, SummaryOptions};
use async_trait::async_trait;

/// Default inference API base URL.
pub const DEFAULT_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// Default summarization model.
pub const DEFAULT_SUMMARIZATION_MODEL: &str = "t5-small";

/// Default zero-shot classification model.
pub const DEFAULT_CLASSIFICATION_MODEL: &str = "valhalla/distilbart-mnli-12-1";

/// Default extractive question-answering model.
pub const DEFAULT_QA_MODEL: &str = "deepset/roberta-base-squad2";

/// Connection settings for the hosted inference API.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Base URL; model ids are appended as path segments
    pub api_base: String,
    /// Optional bearer token
    pub api_token: Option<String>,
    pub summarization_model: String,
    pub classification_model: String,
    pub qa_model: String,
}

impl InferenceConfig {
    /// Load configuration from environment variables.
    ///
    /// Expected variables (all optional):
    /// - HF_API_BASE: inference API base URL
    /// - HF_API_TOKEN: bearer token for authenticated access
    /// - SUMMARIZATION_MODEL, CLASSIFICATION_MODEL, QA_MODEL: model ids
    pub fn from_env() -> Self {
        Self {
            api_base: std::env::var("HF_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            api_token: std::env::var("HF_API_TOKEN").ok(),
            summarization_model: std::env::var("SUMMARIZATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_SUMMARIZATION_MODEL.to_string()),
            classification_model: std::env::var("CLASSIFICATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_CLASSIFICATION_MODEL.to_string()),
            qa_model: std::env::var("QA_MODEL").unwrap_or_else(|_| DEFAULT_QA_MODEL.to_string()),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_token: None,
            summarization_model: DEFAULT_SUMMARIZATION_MODEL.to_string(),
            classification_model: DEFAULT_CLASSIFICATION_MODEL.to_string(),
            qa_model: DEFAULT_QA_MODEL.to_string(),
        }
    }
}

/// [`ModelService`] backed by a hosted inference HTTP API.
pub struct HostedModelService {
    http: reqwest::Client,
    config: InferenceConfig,
}

impl HostedModelService {
    pub fn new(config: InferenceConfig) -> Self {
        info!(
            "Hosted inference at {} (summarization={}, classification={}, qa={})",
            config.api_base,
            config.summarization_model,
            config.classification_model,
            config.qa_model
        );
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), model)
    }

    /// POST a JSON body to one model endpoint and return the raw response
    /// body on 2xx; non-success statuses become [`ModelError::Api`] carrying
    /// whatever message the API sent back.
    async fn post_json(&self, model: &str, body: serde_json::Value) -> Result<String, ModelError> {
        let mut request = self.http.post(self.endpoint(model)).json(&body);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: text,
            });
        }
        Ok(text)
    }
}

/// One summarization candidate: `[{"summary_text": ...}]`
#[derive(Deserialize)]
struct SummaryPayload {
    summary_text: String,
}

/// Zero-shot output: parallel label/score arrays, already ranked best-first
#[derive(Deserialize)]
struct ZeroShotPayload {
    labels: Vec<String>,
    scores: Vec<f64>,
}

/// QA output; fields may be absent on some deployments
#[derive(Deserialize)]
struct QaPayload {
    answer: Option<String>,
    score: Option<f64>,
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ModelError> {
    serde_json::from_str(body).map_err(|e| ModelError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl ModelService for HostedModelService {
    async fn summarize(&self, text: &str, options: SummaryOptions) -> Result<String, ModelError> {
        debug!(
            model = %self.config.summarization_model,
            max_length = options.max_length,
            min_length = options.min_length,
            "requesting summary"
        );

        let body = json!({
            "inputs": text,
            "parameters": {
                "max_length": options.max_length,
                "min_length": options.min_length,
                "do_sample": false,
            },
        });
        let response = self.post_json(&self.config.summarization_model, body).await?;

        let candidates: Vec<SummaryPayload> = decode(&response)?;
        candidates
            .into_iter()
            .next()
            .map(|c| c.summary_text)
            .ok_or_else(|| {
                ModelError::MalformedResponse("summarization returned no candidates".to_string())
            })
    }

    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<LabelScore>, ModelError> {
        debug!(model = %self.config.classification_model, "requesting classification");

        let body = json!({
            "inputs": text,
            "parameters": { "candidate_labels": candidate_labels },
        });
        let response = self.post_json(&self.config.classification_model, body).await?;

        let payload: ZeroShotPayload = decode(&response)?;
        if payload.labels.len() != payload.scores.len() {
            return Err(ModelError::MalformedResponse(
                "label and score arrays differ in length".to_string(),
            ));
        }

        Ok(payload
            .labels
            .into_iter()
            .zip(payload.scores)
            .map(|(label, score)| LabelScore { label, score })
            .collect())
    }

    async fn answer_question(
        &self,
        question: &str,
        context: &str,
    ) -> Result<QaResult, ModelError> {
        debug!(model = %self.config.qa_model, "requesting answer");

        let body = json!({
            "inputs": { "question": question, "context": context },
        });
        let response = self.post_json(&self.config.qa_model, body).await?;

        let payload: QaPayload = decode(&response)?;
        Ok(QaResult {
            answer: payload.answer,
            score: payload.score,
        })
    }
}
