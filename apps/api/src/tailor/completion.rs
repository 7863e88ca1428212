//! Decoding of the raw completion text returned by the text-generation service.

use serde_json::Value;
use tracing::warn;

use crate::tailor::models::TailorResult;
use crate::tailor::normalizer::{normalize, FormatError};

/// Parses raw completion text as JSON and normalizes it.
///
/// Models often wrap JSON in a Markdown code fence even when told not to,
/// so the fence is stripped before parsing.
pub fn parse_completion(
    raw_text: &str,
    source_text: &str,
    job_description: &str,
) -> Result<TailorResult, FormatError> {
    let json_text = strip_json_fences(raw_text);

    let payload: Value = serde_json::from_str(json_text).map_err(|e| {
        warn!("Failed to parse AI response as JSON: {e}");
        FormatError::InvalidJson(e)
    })?;

    normalize(&payload, source_text, job_description)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };

    let inner = inner.trim_start();
    inner.strip_suffix("```").map(str::trim).unwrap_or(inner)
}
