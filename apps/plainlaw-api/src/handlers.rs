//! API handlers for the PlainLaw server
//!
//! Provides REST endpoints for:
//! - Document simplification
//! - Question answering
//! - Health checks
//!
//! The handlers own the user-facing error strings; pipeline and model
//! errors are mapped here before they leave the process.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use plainlaw_core::{
    answer_question, simplify_document, DocumentAnswer, PipelineError, SimplifiedDocument,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "plainlaw-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Simplify request body
#[derive(Deserialize)]
pub struct SimplifyRequest {
    /// Document text to simplify. Defaults to empty when missing so an
    /// absent field reads as blank input, not a deserialization failure.
    #[serde(default)]
    pub text: String,
}

/// Handler: POST /api/simplify
pub async fn handle_simplify(
    State(state): State<AppState>,
    Json(req): Json<SimplifyRequest>,
) -> Result<Json<SimplifiedDocument>, ApiError> {
    info!("Simplify request: {} chars", req.text.chars().count());

    match simplify_document(state.models.as_ref(), &req.text).await {
        Ok(doc) => Ok(Json(doc)),
        Err(PipelineError::EmptyInput) => Err(ApiError::InvalidRequest(
            "Please enter some text.".to_string(),
        )),
        Err(PipelineError::Model(e)) => {
            error!("Simplify failed: {}", e);
            Err(ApiError::Processing(format!("An error occurred: {}", e)))
        }
    }
}

/// Ask request body
#[derive(Deserialize)]
pub struct AskRequest {
    /// Document text used as the QA context
    #[serde(default)]
    pub text: String,

    /// Question to answer from the document
    #[serde(default)]
    pub question: String,
}

/// Handler: POST /api/ask
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<DocumentAnswer>, ApiError> {
    info!(
        "Ask request: {} chars, question {} chars",
        req.text.chars().count(),
        req.question.chars().count()
    );

    match answer_question(state.models.as_ref(), &req.text, &req.question).await {
        Ok(answer) => Ok(Json(answer)),
        Err(PipelineError::EmptyInput) => Err(ApiError::InvalidRequest(
            "Please provide both document text and a question.".to_string(),
        )),
        Err(PipelineError::Model(e)) => {
            error!("QA failed: {}", e);
            Err(ApiError::Processing(format!(
                "Unable to process question: {}",
                e
            )))
        }
    }
}
