use crate::workflows::form::{FillPolicy, SurveyPolicy};
use crate::workflows::resolver::SynonymTable;
use crate::workflows::suitability::SuitabilityPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tunable tables and dials for one applicant. Every section falls back to
/// the built-in defaults when omitted from the policy file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistPolicy {
    pub synonyms: SynonymTable,
    pub survey: SurveyPolicy,
    pub suitability: SuitabilityPolicy,
    pub fill: FillPolicy,
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("policy file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AssistPolicy {
    pub fn from_json(raw: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}
