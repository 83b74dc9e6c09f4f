//! Form fill orchestration: page abstraction, named fill rules, survey
//! defaults, option matching, and the audit summary of a run.

mod config;
pub mod domain;
pub mod fixture;
mod options;
mod orchestrator;
pub mod page;
pub mod rules;
mod summary;
mod survey;

#[cfg(test)]
mod tests;

pub use config::{FillPolicy, DEFAULT_START_DATE_FORMAT};
pub use domain::{ChoiceOption, ControlDescriptor, ControlHandle, ControlKind, DynamicAnswers};
pub use fixture::{FixtureControl, FixtureError, FormFixture, InMemoryPage};
pub use options::{match_first, match_option};
pub use orchestrator::{FormFiller, DEFAULT_CONTROL_TIMEOUT};
pub use page::{FormPage, PageError};
pub use rules::{
    FillRule, NarrativeRule, RuleContext, RuleSet, RuleStage, StartDateRule, WorkAuthorizationRule,
};
pub use summary::{FillEvent, FillSource, FillSummary, SkipReason, UploadOutcome};
pub use survey::{
    SurveyPolicy, SurveyQuestion, SurveyTopic, AGE_BRACKET_ANSWERS, CONSENT_ANSWERS,
    DISABILITY_ANSWERS, EDUCATION_LEVEL_ANSWERS, ETHNICITY_ANSWERS, GENDER_ANSWERS,
    HOW_DID_YOU_HEAR_ANSWERS, PRIOR_EMPLOYMENT_ANSWERS, SEXUAL_ORIENTATION_ANSWERS,
    TRANSGENDER_ANSWERS, VETERAN_ANSWERS,
};
