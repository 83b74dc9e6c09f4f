use serde::{Deserialize, Serialize};

/// Employer, location, and role pulled heuristically from page text. Any
/// field the heuristics cannot find stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedAttributes {
    pub employer: Option<String>,
    pub location: Option<String>,
    pub role: Option<String>,
}

/// Why a target was turned away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RejectionReason {
    OnsiteOutsideHomeRegion { region: String },
    InPersonRequired { region: String },
    AuthorizationRequired { region: String },
    PositionTypeMismatch { expected: Vec<String> },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::OnsiteOutsideHomeRegion { region } => {
                format!("rejected: full-time on-site role based in {region} and not remote")
            }
            RejectionReason::InPersonRequired { region } => {
                format!("rejected: requires in-person presence in {region}")
            }
            RejectionReason::AuthorizationRequired { region } => {
                format!("rejected: requires existing work authorization for {region}")
            }
            RejectionReason::PositionTypeMismatch { expected } => format!(
                "rejected: position is not one of the sought types ({})",
                expected.join(", ")
            ),
        }
    }
}

/// Accept/reject decision for one target; immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitabilityVerdict {
    pub accepted: bool,
    pub reason: Option<RejectionReason>,
    pub attributes: ExtractedAttributes,
    /// Narrative "why this company" answer, only on acceptance.
    pub narrative: Option<String>,
}

impl SuitabilityVerdict {
    pub(crate) fn accepted(attributes: ExtractedAttributes, narrative: Option<String>) -> Self {
        Self {
            accepted: true,
            reason: None,
            attributes,
            narrative,
        }
    }

    pub(crate) fn rejected(reason: RejectionReason, attributes: ExtractedAttributes) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
            attributes,
            narrative: None,
        }
    }

    /// Verdict returned when analysis itself failed: proceed, knowing nothing.
    pub(crate) fn fail_open() -> Self {
        Self::accepted(ExtractedAttributes::default(), None)
    }

    pub fn reason_text(&self) -> Option<String> {
        self.reason.as_ref().map(RejectionReason::summary)
    }

    pub fn summary(&self) -> String {
        match &self.reason {
            Some(reason) => reason.summary(),
            None => "accepted".to_string(),
        }
    }
}
