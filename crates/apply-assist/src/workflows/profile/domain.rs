use serde::{Deserialize, Serialize};
use std::path::Path;

/// Nested applicant document loaded once per run. Every section is optional so
/// partially filled profiles still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalProfile {
    pub identity: Option<Identity>,
    pub contact: Option<Contact>,
    pub location: Option<Residence>,
    pub work_authorization: Option<WorkAuthorization>,
    pub availability: Option<Availability>,
    pub education: Option<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<String>,
    pub demographics: Option<Demographics>,
    pub answers: Option<FreeTextAnswers>,
}

impl PersonalProfile {
    pub fn from_json(raw: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Identity {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub preferred_name: Option<String>,
    pub pronouns: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Residence {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkAuthorization {
    /// Countries where the applicant may already work without sponsorship.
    pub authorized_countries: Vec<String>,
    pub requires_sponsorship: Option<bool>,
    pub citizenship: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Availability {
    pub start_date: Option<String>,
    pub willing_to_relocate: Option<bool>,
    pub notice_period: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub major: Option<String>,
    pub gpa: Option<String>,
    pub graduation_year: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub company: Option<String>,
    pub title: Option<String>,
    pub years: Option<f32>,
    pub current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Demographics {
    pub gender: Option<String>,
    pub transgender: Option<String>,
    pub sexual_orientation: Option<String>,
    pub ethnicity: Option<String>,
    pub veteran_status: Option<String>,
    pub disability_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FreeTextAnswers {
    pub why_company: Option<String>,
    pub good_fit: Option<String>,
    pub salary_expectation: Option<String>,
    pub cover_letter: Option<String>,
    pub additional_info: Option<String>,
}

/// Failures while loading the applicant document.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),
}
