//! Suitability filter: accepts or rejects an application target from its
//! page text before any form interaction happens.

mod config;
mod extraction;
mod narrative;
mod rules;
mod verdict;

pub use config::SuitabilityPolicy;
pub use narrative::{compose_narrative, detect_themes, Theme};
pub use verdict::{ExtractedAttributes, RejectionReason, SuitabilityVerdict};

use rules::PolicyMatchers;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("page text is empty")]
    EmptyPage,
    #[error("invalid suitability phrase pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Applies the location, authorization and position-type rules in that
/// order. The first violated rule decides the rejection reason.
#[derive(Debug, Clone)]
pub struct SuitabilityFilter {
    policy: SuitabilityPolicy,
}

impl SuitabilityFilter {
    pub fn new(policy: SuitabilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SuitabilityPolicy {
        &self.policy
    }

    /// Never fails: an analysis error yields an accepting verdict so the
    /// orchestrator can proceed.
    pub fn evaluate(&self, page_text: &str) -> SuitabilityVerdict {
        match self.analyze(page_text) {
            Ok(verdict) => {
                info!(
                    accepted = verdict.accepted,
                    employer = verdict.attributes.employer.as_deref().unwrap_or("-"),
                    role = verdict.attributes.role.as_deref().unwrap_or("-"),
                    summary = %verdict.summary(),
                    "suitability verdict"
                );
                verdict
            }
            Err(err) => {
                warn!(error = %err, "suitability analysis failed; proceeding without a verdict");
                SuitabilityVerdict::fail_open()
            }
        }
    }

    pub fn analyze(&self, page_text: &str) -> Result<SuitabilityVerdict, AnalysisError> {
        let text = page_text.trim();
        if text.is_empty() {
            return Err(AnalysisError::EmptyPage);
        }

        let matchers = PolicyMatchers::compile(&self.policy)?;
        let attributes = extraction::extract_attributes(text, &matchers);

        let outcome = rules::location_rule(text, &matchers)
            .and_then(|()| rules::authorization_rule(text, &matchers))
            .and_then(|()| rules::position_rule(text, &matchers));
        if let Err(reason) = outcome {
            return Ok(SuitabilityVerdict::rejected(reason, attributes));
        }

        let narrative = self
            .policy
            .generate_narrative
            .then(|| compose_narrative(text, &attributes));
        Ok(SuitabilityVerdict::accepted(attributes, narrative))
    }
}

impl Default for SuitabilityFilter {
    fn default() -> Self {
        Self::new(SuitabilityPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_fails_open() {
        let filter = SuitabilityFilter::default();
        assert!(matches!(filter.analyze("   "), Err(AnalysisError::EmptyPage)));

        let verdict = filter.evaluate("   ");
        assert!(verdict.accepted);
        assert!(verdict.reason.is_none());
        assert!(verdict.narrative.is_none());
    }

    #[test]
    fn location_rule_decides_before_position_rule() {
        let filter = SuitabilityFilter::default();
        let verdict = filter.evaluate(
            "Senior Engineer. Full time, on-site at our Seattle headquarters.",
        );
        assert!(!verdict.accepted);
        match verdict.reason {
            Some(RejectionReason::OnsiteOutsideHomeRegion { region }) => assert_eq!(region, "Seattle"),
            other => panic!("expected location rejection, got {other:?}"),
        }
    }

    #[test]
    fn accepted_verdict_carries_narrative() {
        let filter = SuitabilityFilter::default();
        let verdict = filter.evaluate(
            "Globex is hiring a Platform Engineering Intern in Bengaluru. \
             You will learn from senior mentors.",
        );
        assert!(verdict.accepted, "{}", verdict.summary());
        assert_eq!(verdict.attributes.employer.as_deref(), Some("Globex"));
        let narrative = verdict.narrative.expect("narrative on acceptance");
        assert!(narrative.contains("Globex"));
        assert!(narrative.contains("mentorship"));
    }

    #[test]
    fn narrative_can_be_disabled() {
        let filter = SuitabilityFilter::new(SuitabilityPolicy {
            generate_narrative: false,
            ..SuitabilityPolicy::default()
        });
        let verdict = filter.evaluate("Remote internship with Initech.");
        assert!(verdict.accepted);
        assert!(verdict.narrative.is_none());
    }
}
