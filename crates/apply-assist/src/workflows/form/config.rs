use serde::{Deserialize, Serialize};

/// Dials for the named fill rules and the résumé upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FillPolicy {
    /// chrono format used when a text box asks for a start date.
    pub start_date_format: String,
    pub start_date_cues: Vec<String>,
    /// Free-text questions answered with the generated narrative.
    pub narrative_cues: Vec<String>,
    /// Identifier/accept-type keywords marking the résumé upload control.
    pub resume_keywords: Vec<String>,
}

pub const DEFAULT_START_DATE_FORMAT: &str = "%m/%d/%Y";

const START_DATE_CUES: &[&str] = &[
    "start date",
    "available from",
    "earliest start",
    "when can you start",
    "joining date",
    "date available",
];

const NARRATIVE_CUES: &[&str] = &[
    "why this company",
    "why do you want",
    "why are you interested",
    "why join",
    "why us",
    "interested in joining",
    "interested in working",
    "good fit",
    "great fit",
    "what makes you",
    "why should we hire",
];

const RESUME_KEYWORDS: &[&str] = &["resume", "résumé", "cv", "curriculum"];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Default for FillPolicy {
    fn default() -> Self {
        Self {
            start_date_format: DEFAULT_START_DATE_FORMAT.to_string(),
            start_date_cues: owned(START_DATE_CUES),
            narrative_cues: owned(NARRATIVE_CUES),
            resume_keywords: owned(RESUME_KEYWORDS),
        }
    }
}
