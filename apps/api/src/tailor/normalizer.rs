//! Normalizer — coerces an untrusted AI payload into a validated [`TailorResult`].
//!
//! This is a defaulting decoder, not a strict schema check: every field that
//! has the wrong shape falls back to its documented default. The only hard
//! failure is a top-level payload that is not a JSON object.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::tailor::models::{ConfidenceLevel, Suggestion, Summary, TailorResult};

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid AI response format: expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Invalid AI response format: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Builds a [`TailorResult`] from a decoded service payload.
///
/// `source_text` and `job_description` are taken from the caller, never from
/// the payload. A missing payload should be passed as `Value::Null`.
pub fn normalize(
    raw: &Value,
    source_text: &str,
    job_description: &str,
) -> Result<TailorResult, FormatError> {
    let Some(payload) = raw.as_object() else {
        let found = value_kind(raw);
        warn!("Rejecting AI payload: top-level value is {found}");
        return Err(FormatError::NotAnObject { found });
    };

    let suggestions: Vec<Suggestion> = payload
        .get("suggestions")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_suggestion).collect())
        .unwrap_or_default();

    let empty = Map::new();
    let summary = payload
        .get("summary")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let summary = normalize_summary(summary);

    debug!(
        "Normalized AI payload: {} suggestions, {} covered keywords, {} missing keywords",
        suggestions.len(),
        summary.keyword_coverage.len(),
        summary.missing_keywords.len()
    );

    Ok(TailorResult {
        source_text: source_text.to_string(),
        job_description: job_description.to_string(),
        suggestions,
        summary,
    })
}

/// Each field is coerced on its own; a non-object element yields an all-default suggestion.
fn normalize_suggestion(item: &Value) -> Suggestion {
    let text = |key: &str| item.get(key).map(stringify).unwrap_or_default().trim().to_string();

    Suggestion {
        current_phrase: text("currentPhrase"),
        suggested_phrase: text("suggestedPhrase"),
        requirement: text("requirement"),
        reason: text("reason"),
        confidence: ConfidenceLevel::from_label(&text("confidence")),
    }
}

fn normalize_summary(summary: &Map<String, Value>) -> Summary {
    Summary {
        alignment_score: alignment_score(summary),
        keyword_coverage: string_list(summary.get("keywordCoverage")),
        missing_keywords: string_list(summary.get("missingKeywords")),
    }
}

/// `atsAlignmentScore`, falling back to `score`, clamped into [0, 1].
/// Numbers and numeric strings are accepted; anything else reads as 0.
fn alignment_score(summary: &Map<String, Value>) -> f64 {
    let raw = summary
        .get("atsAlignmentScore")
        .filter(|v| !v.is_null())
        .or_else(|| summary.get("score"));

    let score = match raw {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(stringify).collect())
        .unwrap_or_default()
}

/// Default textual form of a JSON value. `null` becomes the empty string;
/// arrays and objects render as compact JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
