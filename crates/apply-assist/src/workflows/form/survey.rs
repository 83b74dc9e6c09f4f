use crate::workflows::resolver::normalize_signal;
use serde::{Deserialize, Serialize};

/// Survey-style questions that forms ask outside the profile vocabulary, or
/// that the profile may leave blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurveyTopic {
    Transgender,
    SexualOrientation,
    Gender,
    Ethnicity,
    VeteranStatus,
    Disability,
    HowDidYouHear,
    PriorEmployment,
    EducationLevel,
    AgeBracket,
    Consent,
}

/// A known question: the cues that identify it and the ordered answers to
/// try against the offered options. The first answer that matches an option
/// is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyQuestion {
    pub topic: SurveyTopic,
    pub cues: Vec<String>,
    pub answers: Vec<String>,
}

/// Ordered survey table. Questions are tested in order, so a question whose
/// cue contains another's (`transgender` and `gender`) must come first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyPolicy {
    pub questions: Vec<SurveyQuestion>,
}

pub const TRANSGENDER_ANSWERS: &[&str] = &["No", "Decline"];
pub const SEXUAL_ORIENTATION_ANSWERS: &[&str] = &["Heterosexual", "Straight", "Decline"];
pub const GENDER_ANSWERS: &[&str] = &["Male", "Man", "Decline"];
pub const ETHNICITY_ANSWERS: &[&str] = &["Asian", "Indian", "South Asian", "Decline"];
pub const VETERAN_ANSWERS: &[&str] = &["not a protected veteran", "not a veteran", "No"];
pub const DISABILITY_ANSWERS: &[&str] = &["do not have a disability", "No", "Decline"];
pub const HOW_DID_YOU_HEAR_ANSWERS: &[&str] = &["LinkedIn", "Job Board", "Company Website", "Other"];
pub const PRIOR_EMPLOYMENT_ANSWERS: &[&str] = &["No"];
pub const EDUCATION_LEVEL_ANSWERS: &[&str] = &["Bachelor", "Undergraduate", "College"];
pub const AGE_BRACKET_ANSWERS: &[&str] = &["18-24", "18 - 24", "Yes"];
pub const CONSENT_ANSWERS: &[&str] = &["Yes", "I agree", "I consent", "Agree", "Acknowledge"];

const BUILTIN_QUESTIONS: &[(SurveyTopic, &[&str], &[&str])] = &[
    (SurveyTopic::Transgender, &["transgender"], TRANSGENDER_ANSWERS),
    (
        SurveyTopic::SexualOrientation,
        &["sexual orientation", "orientation"],
        SEXUAL_ORIENTATION_ANSWERS,
    ),
    (SurveyTopic::Gender, &["gender", "sex"], GENDER_ANSWERS),
    (
        SurveyTopic::Ethnicity,
        &["ethnicity", "ethnic", "race", "hispanic", "latino"],
        ETHNICITY_ANSWERS,
    ),
    (SurveyTopic::VeteranStatus, &["veteran"], VETERAN_ANSWERS),
    (SurveyTopic::Disability, &["disability"], DISABILITY_ANSWERS),
    (
        SurveyTopic::HowDidYouHear,
        &[
            "how did you hear",
            "how did you find",
            "where did you hear",
            "where did you find",
            "referral source",
        ],
        HOW_DID_YOU_HEAR_ANSWERS,
    ),
    (
        SurveyTopic::PriorEmployment,
        &[
            "previously worked",
            "previously employed",
            "worked here before",
            "worked for us",
            "former employee",
            "ever been employed",
            "ever worked",
        ],
        PRIOR_EMPLOYMENT_ANSWERS,
    ),
    (
        SurveyTopic::EducationLevel,
        &[
            "education level",
            "level of education",
            "highest level",
            "highest degree",
            "highest education",
        ],
        EDUCATION_LEVEL_ANSWERS,
    ),
    (
        SurveyTopic::AgeBracket,
        &["age range", "age group", "age bracket", "your age", "18 years", "years of age"],
        AGE_BRACKET_ANSWERS,
    ),
    (
        SurveyTopic::Consent,
        &[
            "consent",
            "i agree",
            "acknowledge",
            "privacy policy",
            "terms and conditions",
            "certify",
        ],
        CONSENT_ANSWERS,
    ),
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Default for SurveyPolicy {
    fn default() -> Self {
        Self {
            questions: BUILTIN_QUESTIONS
                .iter()
                .map(|(topic, cues, answers)| SurveyQuestion {
                    topic: *topic,
                    cues: owned(cues),
                    answers: owned(answers),
                })
                .collect(),
        }
    }
}

impl SurveyPolicy {
    /// First question, in table order, with a cue contained in the signal.
    pub fn match_question(&self, signal: &str) -> Option<&SurveyQuestion> {
        let normalized = normalize_signal(signal);
        if normalized.is_empty() {
            return None;
        }

        self.questions.iter().find(|question| {
            question.cues.iter().any(|cue| {
                let cue = normalize_signal(cue);
                !cue.is_empty() && normalized.contains(cue.as_str())
            })
        })
    }

    pub fn answers_for(&self, topic: SurveyTopic) -> Option<&[String]> {
        self.questions
            .iter()
            .find(|question| question.topic == topic)
            .map(|question| question.answers.as_slice())
    }
}
