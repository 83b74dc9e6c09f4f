use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{info, warn};

use super::domain::ControlHandle;
use crate::workflows::profile::CanonicalKey;

/// Where a filled value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "detail", rename_all = "snake_case")]
pub enum FillSource {
    Profile,
    Rule(String),
    Survey,
    Human,
}

impl FillSource {
    fn describe(&self) -> String {
        match self {
            FillSource::Profile => "profile".to_string(),
            FillSource::Rule(name) => format!("rule '{name}'"),
            FillSource::Survey => "survey default".to_string(),
            FillSource::Human => "human answer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Already holds a value entered by the user or page autofill.
    Prefilled,
    /// No key, rule or survey question applies and the control is optional.
    Unresolved,
    NoMatchingOption,
    NoAnswer,
}

impl SkipReason {
    fn describe(self) -> &'static str {
        match self {
            SkipReason::Prefilled => "already has a value",
            SkipReason::Unresolved => "no matching profile field",
            SkipReason::NoMatchingOption => "no option matched the candidate answers",
            SkipReason::NoAnswer => "left blank, no answer available",
        }
    }
}

/// Result of the résumé upload step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    #[default]
    NotAttempted,
    NotConfigured,
    NoControl,
    Uploaded {
        control: ControlHandle,
        path: PathBuf,
    },
    Failed {
        control: ControlHandle,
        error: String,
    },
}

/// One auditable step of a fill run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FillEvent {
    Filled {
        control: ControlHandle,
        name: String,
        key: Option<CanonicalKey>,
        source: FillSource,
        value: String,
    },
    Skipped {
        control: ControlHandle,
        name: String,
        reason: SkipReason,
    },
    Escalated {
        control: ControlHandle,
        name: String,
        answered: bool,
    },
    Failed {
        control: ControlHandle,
        error: String,
    },
    ChallengeCleared,
    ChallengeUnresolved {
        error: String,
    },
    Resume {
        outcome: UploadOutcome,
    },
}

impl FillEvent {
    /// Human-readable status line.
    pub fn line(&self) -> String {
        match self {
            FillEvent::Filled {
                name,
                key,
                source,
                value,
                ..
            } => {
                let key = key.map(|key| format!(" [{key}]")).unwrap_or_default();
                format!("filled '{name}'{key} from {}: {}", source.describe(), preview(value))
            }
            FillEvent::Skipped { name, reason, .. } => {
                format!("skipped '{name}': {}", reason.describe())
            }
            FillEvent::Escalated { name, answered, .. } => {
                if *answered {
                    format!("asked human for '{name}': answered")
                } else {
                    format!("asked human for '{name}': no answer")
                }
            }
            FillEvent::Failed { control, error } => format!("failed on {control}: {error}"),
            FillEvent::ChallengeCleared => "verification challenge cleared by human".to_string(),
            FillEvent::ChallengeUnresolved { error } => {
                format!("verification challenge still pending: {error}")
            }
            FillEvent::Resume { outcome } => match outcome {
                UploadOutcome::NotAttempted => "résumé upload not attempted".to_string(),
                UploadOutcome::NotConfigured => "résumé upload skipped: no résumé path configured".to_string(),
                UploadOutcome::NoControl => "résumé upload skipped: no file control found".to_string(),
                UploadOutcome::Uploaded { control, path } => {
                    format!("uploaded résumé {} to {control}", path.display())
                }
                UploadOutcome::Failed { control, error } => {
                    format!("résumé upload to {control} failed: {error}")
                }
            },
        }
    }
}

const PREVIEW_CHARS: usize = 48;

fn preview(value: &str) -> String {
    let mut chars = value.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

/// Outcome of one fill run. The filled key set is a report only; several
/// controls may legitimately fill the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillSummary {
    pub filled_keys: BTreeSet<CanonicalKey>,
    pub filled_controls: Vec<ControlHandle>,
    pub events: Vec<FillEvent>,
    pub skipped: usize,
    pub failed: usize,
    pub escalations: usize,
    pub resume: UploadOutcome,
}

impl FillSummary {
    pub fn filled_count(&self) -> usize {
        self.filled_keys.len()
    }

    pub fn was_filled(&self, control: &ControlHandle) -> bool {
        self.filled_controls.contains(control)
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(FillEvent::line).collect()
    }

    /// Logs the event as a status line and folds it into the counters.
    pub(crate) fn record(&mut self, event: FillEvent) {
        match &event {
            FillEvent::Filled { control, key, .. } => {
                if let Some(key) = key {
                    self.filled_keys.insert(*key);
                }
                self.filled_controls.push(control.clone());
                info!(control = %control, "{}", event.line());
            }
            FillEvent::Skipped { control, .. } => {
                self.skipped += 1;
                info!(control = %control, "{}", event.line());
            }
            FillEvent::Escalated { control, .. } => {
                self.escalations += 1;
                info!(control = %control, "{}", event.line());
            }
            FillEvent::Failed { control, .. } => {
                self.failed += 1;
                warn!(control = %control, "{}", event.line());
            }
            FillEvent::ChallengeCleared => info!("{}", event.line()),
            FillEvent::ChallengeUnresolved { .. } => warn!("{}", event.line()),
            FillEvent::Resume { outcome } => {
                self.resume = outcome.clone();
                match outcome {
                    UploadOutcome::Failed { .. } => warn!("{}", event.line()),
                    _ => info!("{}", event.line()),
                }
            }
        }
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_count_once_but_both_controls_are_listed() {
        let mut summary = FillSummary::default();
        for handle in ["why-1", "why-2"] {
            summary.record(FillEvent::Filled {
                control: ControlHandle::new(handle),
                name: "Why us?".to_string(),
                key: Some(CanonicalKey::WhyCompany),
                source: FillSource::Rule("narrative".to_string()),
                value: "Because".to_string(),
            });
        }
        assert_eq!(summary.filled_count(), 1);
        assert_eq!(summary.filled_controls.len(), 2);
        assert_eq!(summary.events.len(), 2);
    }

    #[test]
    fn counters_follow_events() {
        let mut summary = FillSummary::default();
        summary.record(FillEvent::Skipped {
            control: ControlHandle::new("a"),
            name: "A".to_string(),
            reason: SkipReason::Prefilled,
        });
        summary.record(FillEvent::Failed {
            control: ControlHandle::new("b"),
            error: "gone".to_string(),
        });
        summary.record(FillEvent::Resume {
            outcome: UploadOutcome::NoControl,
        });
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.resume, UploadOutcome::NoControl);
        assert_eq!(summary.lines()[0], "skipped 'A': already has a value");
    }

    #[test]
    fn long_values_are_previewed() {
        let value = "x".repeat(100);
        let line = FillEvent::Filled {
            control: ControlHandle::new("c"),
            name: "Cover letter".to_string(),
            key: None,
            source: FillSource::Human,
            value,
        }
        .line();
        assert!(line.ends_with('…'));
        assert!(line.starts_with("filled 'Cover letter' from human answer: "));
    }
}
