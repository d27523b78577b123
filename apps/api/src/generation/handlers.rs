//! Axum route handlers for the tailoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::composer::compose_prompt;
use crate::generation::dispatcher::generate_content;
use crate::keywords::{extract_keywords, ScoredKeyword, DEFAULT_MAX_TERMS};
use crate::state::AppState;

/// Warning surfaced when either input area is empty.
pub const EMPTY_INPUT_WARNING: &str = "Please paste both your resume and the job description.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TailorStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub keywords: Vec<String>,
    pub status: TailorStatus,
    /// Generated markdown, or "An error occurred: ..." when status is `error`.
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
    pub max_terms: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<ScoredKeyword>,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tailor
///
/// Validate, extract keywords from the JD, compose, then one model call.
/// A failed model call still answers 200 with `status: "error"`.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    if request.resume.trim().is_empty() || request.job_description.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_INPUT_WARNING.to_string()));
    }

    let keywords = extract_keywords(&request.job_description, DEFAULT_MAX_TERMS);
    if keywords.is_empty() {
        warn!("No keywords survived extraction; prompt keyword section is empty");
    } else {
        info!("Extracted {} keywords: {}", keywords.len(), keywords.display());
    }

    let prompt = compose_prompt(&request.job_description, &request.resume, &keywords);
    let content = generate_content(state.generator.as_ref(), &prompt).await;

    let status = if content.is_failure() {
        TailorStatus::Error
    } else {
        TailorStatus::Ok
    };

    Ok(Json(TailorResponse {
        keywords: keywords.terms().into_iter().map(String::from).collect(),
        status,
        content: content.into_text(),
    }))
}

/// POST /api/v1/keywords
///
/// Keyword preview for a single document. `max_terms` is capped at 15.
pub async fn handle_keywords(Json(request): Json<KeywordsRequest>) -> Json<KeywordsResponse> {
    let max_terms = request
        .max_terms
        .unwrap_or(DEFAULT_MAX_TERMS)
        .min(DEFAULT_MAX_TERMS);
    let keywords = extract_keywords(&request.text, max_terms);

    Json(KeywordsResponse {
        keywords: keywords.scored().to_vec(),
    })
}

/// GET /api/v1/models
///
/// Diagnostic: model names the configured credential can use for generation.
pub async fn handle_list_models(
    State(state): State<AppState>,
) -> Result<Json<ModelsResponse>, AppError> {
    let models = state
        .generator
        .list_models()
        .await
        .map_err(|e| AppError::Llm(format!("Model listing failed: {e}")))?;

    Ok(Json(ModelsResponse { models }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
