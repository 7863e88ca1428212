use serde::{Deserialize, Serialize};

/// How strongly the service believes a suggestion improves alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Case-insensitive match against `low`/`medium`/`high`.
    /// Anything else, including the empty string, falls back to `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => ConfidenceLevel::Low,
            "high" => ConfidenceLevel::High,
            _ => ConfidenceLevel::Medium,
        }
    }
}

/// A single proposed resume edit tied to a job requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Suggestion {
    /// Phrase as it appears in the resume. Empty phrases are never matched.
    pub current_phrase: String,
    pub suggested_phrase: String,
    pub requirement: String,
    pub reason: String,
    pub confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Summary {
    /// ATS alignment in [0, 1].
    pub alignment_score: f64,
    pub keyword_coverage: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Validated analysis of one resume against one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorResult {
    pub source_text: String,
    pub job_description: String,
    pub suggestions: Vec<Suggestion>,
    pub summary: Summary,
}
