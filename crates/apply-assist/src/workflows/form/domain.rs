use serde::{Deserialize, Serialize};
use std::fmt;

/// Interaction type of a form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    SingleLineText,
    MultiLineText,
    Select,
    ExclusiveChoice,
    MultiChoice,
    File,
    Date,
}

impl ControlKind {
    /// Kinds filled by typing a value, in visiting order.
    pub const TEXT_LIKE: [ControlKind; 3] = [
        ControlKind::SingleLineText,
        ControlKind::MultiLineText,
        ControlKind::Date,
    ];

    /// Grouped kinds answered by checking members, in visiting order.
    pub const GROUPED: [ControlKind; 2] = [ControlKind::ExclusiveChoice, ControlKind::MultiChoice];

    pub fn label(self) -> &'static str {
        match self {
            ControlKind::SingleLineText => "text",
            ControlKind::MultiLineText => "textarea",
            ControlKind::Select => "select",
            ControlKind::ExclusiveChoice => "radio",
            ControlKind::MultiChoice => "checkbox",
            ControlKind::File => "file",
            ControlKind::Date => "date",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque reference to a control on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlHandle(pub String);

impl ControlHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-visit snapshot of one control. Built fresh every time the filler
/// looks at a control and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDescriptor {
    pub handle: ControlHandle,
    pub kind: ControlKind,
    /// `name` and `id` attributes, space separated.
    pub identifier: String,
    pub label: String,
    pub placeholder: String,
    pub accessible_name: String,
    pub required: bool,
    pub current_value: Option<String>,
}

impl ControlDescriptor {
    /// Identifier, label, placeholder and accessible name joined in that order.
    pub fn signal_text(&self) -> String {
        [
            self.identifier.as_str(),
            self.label.as_str(),
            self.placeholder.as_str(),
            self.accessible_name.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn has_value(&self) -> bool {
        self.current_value
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    }

    /// Most human-friendly name for status lines and escalation prompts.
    pub fn display_name(&self) -> String {
        [
            self.label.as_str(),
            self.accessible_name.as_str(),
            self.placeholder.as_str(),
            self.identifier.as_str(),
        ]
        .iter()
        .map(|part| part.trim().trim_end_matches('*').trim())
        .find(|part| !part.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| self.handle.to_string())
    }
}

/// One choosable entry of a select or a choice group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Answers produced for the current target only, such as the narrative
/// "why this company" paragraph from the suitability filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicAnswers {
    pub narrative: Option<String>,
}

impl DynamicAnswers {
    pub fn with_narrative(narrative: impl Into<String>) -> Self {
        Self {
            narrative: Some(narrative.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ControlDescriptor {
        ControlDescriptor {
            handle: ControlHandle::new("c1"),
            kind: ControlKind::SingleLineText,
            identifier: "applicant_email email".to_string(),
            label: "Email *".to_string(),
            placeholder: " ".to_string(),
            accessible_name: "Your e-mail".to_string(),
            required: true,
            current_value: Some("  ".to_string()),
        }
    }

    #[test]
    fn signal_text_joins_non_empty_parts_in_order() {
        assert_eq!(
            descriptor().signal_text(),
            "applicant_email email Email * Your e-mail"
        );
    }

    #[test]
    fn whitespace_value_counts_as_empty() {
        assert!(!descriptor().has_value());
    }

    #[test]
    fn display_name_prefers_label_without_required_marker() {
        assert_eq!(descriptor().display_name(), "Email");
    }
}
