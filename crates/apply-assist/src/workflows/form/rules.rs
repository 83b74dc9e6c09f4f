use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use super::config::FillPolicy;
use super::domain::{ControlDescriptor, ControlKind, DynamicAnswers};
use super::options::{contains_tokens, tokens};
use crate::workflows::profile::{CanonicalKey, FlatProfile};
use crate::workflows::resolver::normalize_signal;

/// When a rule runs relative to generic profile resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStage {
    /// Runs first and overrides the profile value.
    BeforeResolution,
    /// Runs only when resolution produced no value.
    AfterResolution,
}

/// Everything a rule may read about the control being filled.
pub struct RuleContext<'a> {
    pub control: &'a ControlDescriptor,
    /// Normalized signal text of the control.
    pub signal: &'a str,
    pub profile: &'a FlatProfile,
    pub answers: &'a DynamicAnswers,
    pub today: NaiveDate,
}

/// A named special case for text-like controls: a predicate over the
/// control's signal and an action producing the value to type.
pub trait FillRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn stage(&self) -> RuleStage;

    fn applies(&self, ctx: &RuleContext<'_>) -> bool;

    fn value(&self, ctx: &RuleContext<'_>) -> Option<String>;
}

fn normalized_cues(cues: &[String]) -> Vec<String> {
    cues.iter()
        .map(|cue| normalize_signal(cue))
        .filter(|cue| !cue.is_empty())
        .collect()
}

fn mentions_any(signal: &str, cues: &[String]) -> bool {
    cues.iter().any(|cue| signal.contains(cue.as_str()))
}

/// Thematic "why this company" / "good fit" questions receive the narrative
/// generated for the current target.
pub struct NarrativeRule {
    cues: Vec<String>,
}

impl NarrativeRule {
    pub fn new(policy: &FillPolicy) -> Self {
        Self {
            cues: normalized_cues(&policy.narrative_cues),
        }
    }
}

impl FillRule for NarrativeRule {
    fn name(&self) -> &'static str {
        "narrative"
    }

    fn stage(&self) -> RuleStage {
        RuleStage::BeforeResolution
    }

    fn applies(&self, ctx: &RuleContext<'_>) -> bool {
        mentions_any(ctx.signal, &self.cues)
    }

    fn value(&self, ctx: &RuleContext<'_>) -> Option<String> {
        ctx.answers
            .narrative
            .as_deref()
            .map(str::trim)
            .filter(|narrative| !narrative.is_empty())
            .map(str::to_string)
    }
}

/// Start-date phrasing: the profile's start date when present, otherwise
/// today's date. Native date inputs get ISO format.
pub struct StartDateRule {
    cues: Vec<String>,
    format: String,
}

impl StartDateRule {
    pub fn new(policy: &FillPolicy) -> Self {
        Self {
            cues: normalized_cues(&policy.start_date_cues),
            format: policy.start_date_format.clone(),
        }
    }
}

impl FillRule for StartDateRule {
    fn name(&self) -> &'static str {
        "start_date"
    }

    fn stage(&self) -> RuleStage {
        RuleStage::AfterResolution
    }

    fn applies(&self, ctx: &RuleContext<'_>) -> bool {
        mentions_any(ctx.signal, &self.cues)
    }

    fn value(&self, ctx: &RuleContext<'_>) -> Option<String> {
        if let Some(date) = ctx.profile.text(CanonicalKey::AvailableStartDate) {
            return Some(date);
        }
        let format = match ctx.control.kind {
            ControlKind::Date => "%Y-%m-%d",
            _ => self.format.as_str(),
        };
        Some(ctx.today.format(format).to_string())
    }
}

const REGION_STOP_WORDS: &[&str] = &[
    "without", "with", "for", "now", "at", "on", "as", "if", "before", "or", "from", "who",
    "where", "that", "once",
];

fn asked_region_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\bwork\s+(?:in|within)\s+(?:the\s+)?([^?.,;:()\n]+)")
            .expect("asked region pattern is valid")
    })
}

/// Yes/no answer to a choice control asking about work authorization. The
/// profile holds the regions the applicant may work in; a question naming
/// one of them, or naming no region, is answered yes.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkAuthorizationRule;

impl WorkAuthorizationRule {
    /// Capitalized region named after "work in", if any.
    pub fn asked_region(question: &str) -> Option<String> {
        let captured = asked_region_pattern().captures(question)?.get(1)?.as_str();
        let region = captured
            .split_whitespace()
            .take_while(|word| !REGION_STOP_WORDS.contains(&word.to_lowercase().as_str()))
            .collect::<Vec<_>>()
            .join(" ");
        region
            .starts_with(|ch: char| ch.is_uppercase())
            .then_some(region)
    }

    pub fn answer(&self, question: &str, authorized: &[String]) -> &'static str {
        let Some(region) = Self::asked_region(question) else {
            return "Yes";
        };
        let asked = tokens(&region);
        let covered = authorized.iter().any(|allowed| {
            let allowed = tokens(allowed);
            contains_tokens(&asked, &allowed) || contains_tokens(&allowed, &asked)
        });
        if covered {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Rules evaluated in fixed priority order within each stage.
pub struct RuleSet {
    rules: Vec<Box<dyn FillRule>>,
}

impl RuleSet {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn builtin(policy: &FillPolicy) -> Self {
        Self::empty()
            .with(Box::new(NarrativeRule::new(policy)))
            .with(Box::new(StartDateRule::new(policy)))
    }

    /// Appends a rule after the existing ones.
    pub fn with(mut self, rule: Box<dyn FillRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// First rule of the stage that applies and yields a value.
    pub fn first_value(
        &self,
        stage: RuleStage,
        ctx: &RuleContext<'_>,
    ) -> Option<(&'static str, String)> {
        self.rules
            .iter()
            .filter(|rule| rule.stage() == stage && rule.applies(ctx))
            .find_map(|rule| rule.value(ctx).map(|value| (rule.name(), value)))
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::form::domain::ControlHandle;
    use crate::workflows::profile::{flatten, PersonalProfile};

    fn control(kind: ControlKind, label: &str) -> ControlDescriptor {
        ControlDescriptor {
            handle: ControlHandle::new("c"),
            kind,
            identifier: String::new(),
            label: label.to_string(),
            placeholder: String::new(),
            accessible_name: String::new(),
            required: false,
            current_value: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).expect("valid date")
    }

    #[test]
    fn narrative_rule_needs_a_narrative() {
        let rules = RuleSet::builtin(&FillPolicy::default());
        let control = control(ControlKind::MultiLineText, "Why do you want to join us?");
        let signal = normalize_signal(&control.signal_text());
        let profile = flatten(&PersonalProfile::default());

        let without = DynamicAnswers::default();
        let ctx = RuleContext {
            control: &control,
            signal: &signal,
            profile: &profile,
            answers: &without,
            today: today(),
        };
        assert!(rules.first_value(RuleStage::BeforeResolution, &ctx).is_none());

        let with = DynamicAnswers::with_narrative("Because.");
        let ctx = RuleContext {
            answers: &with,
            ..ctx
        };
        assert_eq!(
            rules.first_value(RuleStage::BeforeResolution, &ctx),
            Some(("narrative", "Because.".to_string()))
        );
    }

    #[test]
    fn start_date_defaults_to_today_in_policy_format() {
        let rules = RuleSet::builtin(&FillPolicy::default());
        let profile = flatten(&PersonalProfile::default());
        let answers = DynamicAnswers::default();

        let text = control(ControlKind::SingleLineText, "Earliest start date");
        let signal = normalize_signal(&text.signal_text());
        let ctx = RuleContext {
            control: &text,
            signal: &signal,
            profile: &profile,
            answers: &answers,
            today: today(),
        };
        assert_eq!(
            rules.first_value(RuleStage::AfterResolution, &ctx),
            Some(("start_date", "03/09/2026".to_string()))
        );

        let date = control(ControlKind::Date, "Start date");
        let signal = normalize_signal(&date.signal_text());
        let ctx = RuleContext {
            control: &date,
            signal: &signal,
            ..ctx
        };
        assert_eq!(
            rules.first_value(RuleStage::AfterResolution, &ctx),
            Some(("start_date", "2026-03-09".to_string()))
        );
    }

    #[test]
    fn start_date_prefers_profile_value() {
        let rules = RuleSet::builtin(&FillPolicy::default());
        let profile = flatten(&PersonalProfile::default())
            .with_value(CanonicalKey::AvailableStartDate, "2026-06-01");
        let answers = DynamicAnswers::default();
        let control = control(ControlKind::SingleLineText, "When can you start?");
        let signal = normalize_signal(&control.signal_text());
        let ctx = RuleContext {
            control: &control,
            signal: &signal,
            profile: &profile,
            answers: &answers,
            today: today(),
        };
        assert_eq!(
            rules.first_value(RuleStage::AfterResolution, &ctx).map(|(_, value)| value),
            Some("2026-06-01".to_string())
        );
    }

    #[test]
    fn work_authorization_follows_the_region_asked_about() {
        let rule = WorkAuthorizationRule;
        let india = vec!["India".to_string()];

        assert_eq!(
            rule.answer("Are you legally authorized to work in the United States?", &india),
            "No"
        );
        assert_eq!(rule.answer("Are you authorized to work in India?", &india), "Yes");
        let deictic = "Are you authorized to work in the country where this role is based?";
        assert_eq!(rule.answer(deictic, &india), "Yes");
        assert_eq!(rule.answer("Work authorization", &india), "Yes");
    }

    #[test]
    fn asked_region_stops_at_connecting_words() {
        assert_eq!(
            WorkAuthorizationRule::asked_region(
                "Can you work in the United Kingdom without sponsorship?"
            )
            .as_deref(),
            Some("United Kingdom")
        );
        assert_eq!(WorkAuthorizationRule::asked_region("Can you work in person?"), None);
    }

    #[test]
    fn builtin_order_is_fixed() {
        assert_eq!(
            RuleSet::builtin(&FillPolicy::default()).names(),
            vec!["narrative", "start_date"]
        );
    }
}
