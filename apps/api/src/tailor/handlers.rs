//! Axum route handlers for the Tailor API.

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::tailor::completion::parse_completion;
use crate::tailor::highlighter::{highlight, Segment};
use crate::tailor::models::{Suggestion, TailorResult};
use crate::tailor::normalizer::normalize;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeRequest {
    /// Decoded service response. Absent is treated like `null`.
    #[serde(default)]
    pub payload: Value,
    pub source_text: String,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    /// Raw completion text, possibly wrapped in a Markdown code fence.
    pub completion: String,
    pub source_text: String,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRequest {
    pub source_text: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse<'a> {
    pub data: &'a TailorResult,
    pub segments: Vec<Segment<'a>>,
}

#[derive(Debug, Serialize)]
pub struct HighlightResponse<'a> {
    pub segments: Vec<Segment<'a>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tailor/normalize
///
/// Normalizes an already-decoded service payload and returns it together with
/// the highlighted resume segments.
pub async fn handle_normalize(
    request: Result<Json<NormalizeRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = request?;
    validate_texts(&request.source_text, &request.job_description)?;

    let result = normalize(
        &request.payload,
        &request.source_text,
        &request.job_description,
    )?;

    Ok(tailor_response(&result))
}

/// POST /api/v1/tailor/completion
///
/// Same as `normalize`, but starts from the raw completion text.
pub async fn handle_completion(
    request: Result<Json<CompletionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = request?;
    validate_texts(&request.source_text, &request.job_description)?;

    let result = parse_completion(
        &request.completion,
        &request.source_text,
        &request.job_description,
    )?;

    Ok(tailor_response(&result))
}

/// POST /api/v1/tailor/highlight
///
/// Projects caller-supplied suggestions onto the text. Only a body that does
/// not deserialize is rejected; any well-typed text and suggestions succeed.
pub async fn handle_highlight(
    request: Result<Json<HighlightRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = request?;
    let segments = highlight(&request.source_text, &request.suggestions);
    Ok(Json(HighlightResponse { segments }).into_response())
}

fn tailor_response(result: &TailorResult) -> Response {
    let segments = highlight(&result.source_text, &result.suggestions);
    info!(
        "Tailor result: {} suggestions, {} segments, alignment {:.2}",
        result.suggestions.len(),
        segments.len(),
        result.summary.alignment_score
    );
    Json(TailorResponse {
        data: result,
        segments,
    })
    .into_response()
}

fn validate_texts(source_text: &str, job_description: &str) -> Result<(), AppError> {
    if source_text.trim().is_empty() {
        return Err(AppError::Validation(
            "sourceText cannot be empty".to_string(),
        ));
    }
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }
    Ok(())
}
