use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::config::FillPolicy;
use super::domain::{ChoiceOption, ControlDescriptor, ControlHandle, ControlKind, DynamicAnswers};
use super::options::match_first;
use super::page::{bounded, FormPage, PageError};
use super::rules::{FillRule, RuleContext, RuleSet, RuleStage, WorkAuthorizationRule};
use super::summary::{FillEvent, FillSource, FillSummary, SkipReason, UploadOutcome};
use super::survey::SurveyPolicy;
use crate::config::AssistPolicy;
use crate::workflows::escalation::HumanChannel;
use crate::workflows::profile::{CanonicalKey, FlatProfile, FlatValue};
use crate::workflows::resolver::{normalize_signal, FieldResolver};

pub const DEFAULT_CONTROL_TIMEOUT: Duration = Duration::from_secs(2);

const AFFIRMATIVE_ANSWERS: &[&str] = &[
    "yes", "y", "true", "i agree", "agree", "i consent", "i accept", "accept", "acknowledge",
];

/// Walks a form one control at a time and fills what it can.
///
/// Passes run in a fixed order: text-like controls, selects, radio and
/// checkbox groups, then the résumé upload, so a host page that autofills
/// from the résumé never overwrites values chosen earlier. A pending
/// verification challenge is escalated before the first pass and again
/// after the upload.
#[derive(Debug)]
pub struct FormFiller {
    resolver: FieldResolver,
    rules: RuleSet,
    survey: SurveyPolicy,
    fill: FillPolicy,
    control_timeout: Duration,
    resume_path: Option<PathBuf>,
    today: Option<NaiveDate>,
}

impl FormFiller {
    pub fn new(policy: &AssistPolicy) -> Self {
        Self {
            resolver: FieldResolver::with_table(&policy.synonyms),
            rules: RuleSet::builtin(&policy.fill),
            survey: policy.survey.clone(),
            fill: policy.fill.clone(),
            control_timeout: DEFAULT_CONTROL_TIMEOUT,
            resume_path: None,
            today: None,
        }
    }

    pub fn with_control_timeout(mut self, timeout: Duration) -> Self {
        self.control_timeout = timeout;
        self
    }

    pub fn with_resume(mut self, path: Option<PathBuf>) -> Self {
        self.resume_path = path;
        self
    }

    /// Pins "today" for the start-date rule.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Adds a rule after the built-in ones.
    pub fn with_rule(mut self, rule: Box<dyn FillRule>) -> Self {
        self.rules = self.rules.with(rule);
        self
    }

    pub fn resolver(&self) -> &FieldResolver {
        &self.resolver
    }

    /// Fills every control it can resolve and returns the audit summary.
    /// Individual control failures are recorded and skipped; the run always
    /// completes.
    pub async fn fill_form<P>(
        &self,
        page: &P,
        profile: &FlatProfile,
        answers: &DynamicAnswers,
        human: &HumanChannel,
    ) -> FillSummary
    where
        P: FormPage + ?Sized,
    {
        let mut run = FillRun {
            filler: self,
            page,
            profile,
            answers,
            human,
            limit: self.control_timeout,
            today: self.today.unwrap_or_else(|| Local::now().date_naive()),
            summary: FillSummary::default(),
        };

        run.challenge_gate().await;
        run.text_pass().await;
        run.select_pass().await;
        run.group_pass().await;
        run.file_pass().await;
        run.challenge_gate().await;

        let summary = run.summary;
        info!(
            filled_keys = summary.filled_count(),
            filled_controls = summary.filled_controls.len(),
            skipped = summary.skipped,
            failed = summary.failed,
            escalations = summary.escalations,
            "form fill complete"
        );
        summary
    }
}

/// One ordered list of candidate answers and where it came from.
struct AnswerChain {
    source: FillSource,
    key: Option<CanonicalKey>,
    answers: Vec<String>,
}

struct ChoiceCandidates {
    chains: Vec<AnswerChain>,
}

impl ChoiceCandidates {
    fn is_empty(&self) -> bool {
        self.chains.iter().all(|chain| chain.answers.is_empty())
    }

    /// First answer of the first non-empty chain.
    fn leading(&self) -> Option<(&AnswerChain, &str)> {
        self.chains
            .iter()
            .find_map(|chain| chain.answers.first().map(|answer| (chain, answer.as_str())))
    }

    /// The option matched by the earliest chain that matches any option.
    fn choose<'o>(&self, options: &'o [ChoiceOption]) -> Option<(&'o ChoiceOption, &AnswerChain)> {
        self.chains.iter().find_map(|chain| {
            match_first(options, chain.answers.iter().map(String::as_str))
                .map(|(option, _)| (option, chain))
        })
    }
}

struct GroupMember {
    handle: ControlHandle,
    option: ChoiceOption,
    checked: bool,
}

struct FillRun<'a, P: ?Sized> {
    filler: &'a FormFiller,
    page: &'a P,
    profile: &'a FlatProfile,
    answers: &'a DynamicAnswers,
    human: &'a HumanChannel,
    limit: Duration,
    today: NaiveDate,
    summary: FillSummary,
}

impl<'a, P> FillRun<'a, P>
where
    P: FormPage + ?Sized,
{
    async fn challenge_gate(&mut self) {
        match bounded(self.limit, self.page.detect_challenge()).await {
            Ok(false) => {}
            Ok(true) => match self.human.wait_for_challenge().await {
                Ok(()) => self.summary.record(FillEvent::ChallengeCleared),
                Err(err) => self.summary.record(FillEvent::ChallengeUnresolved {
                    error: err.to_string(),
                }),
            },
            Err(err) => debug!(error = %err, "challenge detection unavailable"),
        }
    }

    async fn enumerate(&self, kind: ControlKind) -> Vec<ControlHandle> {
        match bounded(self.limit, self.page.enumerate_controls(kind)).await {
            Ok(handles) => handles,
            Err(err) => {
                warn!(kind = %kind, error = %err, "could not enumerate controls");
                Vec::new()
            }
        }
    }

    async fn attribute(&self, handle: &ControlHandle, name: &str) -> Result<String, PageError> {
        Ok(bounded(self.limit, self.page.attribute(handle, name))
            .await?
            .unwrap_or_default())
    }

    async fn describe(
        &self,
        handle: &ControlHandle,
        kind: ControlKind,
    ) -> Result<ControlDescriptor, PageError> {
        let name = self.attribute(handle, "name").await?;
        let id = self.attribute(handle, "id").await?;
        let identifier = if name.trim() == id.trim() {
            name.trim().to_string()
        } else {
            format!("{} {}", name.trim(), id.trim()).trim().to_string()
        };
        let label = bounded(self.limit, self.page.label_text(handle)).await?;
        let placeholder = self.attribute(handle, "placeholder").await?;
        let accessible_name = self.attribute(handle, "aria-label").await?;
        let required = bounded(self.limit, self.page.attribute(handle, "required"))
            .await?
            .is_some()
            || self.attribute(handle, "aria-required").await? == "true"
            || label.trim_end().ends_with('*');
        let current = bounded(self.limit, self.page.current_value(handle)).await?;

        Ok(ControlDescriptor {
            handle: handle.clone(),
            kind,
            identifier,
            label,
            placeholder,
            accessible_name,
            required,
            current_value: Some(current).filter(|value| !value.trim().is_empty()),
        })
    }

    fn fail(&mut self, handle: &ControlHandle, err: PageError) {
        self.summary.record(FillEvent::Failed {
            control: handle.clone(),
            error: err.to_string(),
        });
    }

    fn skip(&mut self, control: &ControlDescriptor, reason: SkipReason) {
        self.summary.record(FillEvent::Skipped {
            control: control.handle.clone(),
            name: control.display_name(),
            reason,
        });
    }

    fn filled(
        &mut self,
        handle: &ControlHandle,
        name: String,
        key: Option<CanonicalKey>,
        source: FillSource,
        value: String,
    ) {
        self.summary.record(FillEvent::Filled {
            control: handle.clone(),
            name,
            key,
            source,
            value,
        });
    }

    /// Asks the human for a required value. A disconnected or silent human
    /// counts as a blank answer.
    async fn escalate(&mut self, control: &ControlDescriptor) -> Option<String> {
        let name = control.display_name();
        let answer = match self.human.ask_for_missing_value(&name).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(control = %control.handle, error = %err, "missing-value escalation failed; leaving blank");
                None
            }
        };
        self.summary.record(FillEvent::Escalated {
            control: control.handle.clone(),
            name,
            answered: answer.is_some(),
        });
        answer
    }

    async fn text_pass(&mut self) {
        for kind in ControlKind::TEXT_LIKE {
            for handle in self.enumerate(kind).await {
                self.fill_text(&handle, kind).await;
            }
        }
    }

    async fn fill_text(&mut self, handle: &ControlHandle, kind: ControlKind) {
        let control = match self.describe(handle, kind).await {
            Ok(control) => control,
            Err(err) => return self.fail(handle, err),
        };
        if control.has_value() {
            return self.skip(&control, SkipReason::Prefilled);
        }

        let filler = self.filler;
        let signal = normalize_signal(&control.signal_text());
        let key = filler.resolver.resolve_control(&control);
        let ctx = RuleContext {
            control: &control,
            signal: &signal,
            profile: self.profile,
            answers: self.answers,
            today: self.today,
        };

        let resolved = filler
            .rules
            .first_value(RuleStage::BeforeResolution, &ctx)
            .map(|(rule, value)| (FillSource::Rule(rule.to_string()), value))
            .or_else(|| {
                key.and_then(|key| self.profile.text(key))
                    .map(|value| (FillSource::Profile, value))
            })
            .or_else(|| {
                filler
                    .rules
                    .first_value(RuleStage::AfterResolution, &ctx)
                    .map(|(rule, value)| (FillSource::Rule(rule.to_string()), value))
            });

        let (source, value) = match resolved {
            Some(found) => found,
            None if control.required => match self.escalate(&control).await {
                Some(answer) => (FillSource::Human, answer),
                None => return self.skip(&control, SkipReason::NoAnswer),
            },
            None => {
                debug!(control = %control.handle, signal = %control.signal_text(), "no resolution");
                return self.skip(&control, SkipReason::Unresolved);
            }
        };

        match bounded(self.limit, self.page.set_value(handle, &value)).await {
            Ok(()) => self.filled(handle, control.display_name(), key, source, value),
            Err(err) => self.fail(handle, err),
        }
    }

    /// Answer chains for a choice question, tried in order: the profile value
    /// for the resolved key, then the survey table's defaults. A work
    /// authorization question is answered from the profile's region list.
    fn choice_candidates(&self, signal: &str) -> ChoiceCandidates {
        let key = self.filler.resolver.resolve(signal);
        let mut chains = Vec::new();
        match (key, key.and_then(|key| self.profile.value(key))) {
            (Some(CanonicalKey::WorkAuthorization), Some(FlatValue::List(regions))) => {
                let answer = WorkAuthorizationRule.answer(signal, regions);
                chains.push(AnswerChain {
                    source: FillSource::Rule("work_authorization".to_string()),
                    key,
                    answers: vec![answer.to_string()],
                });
            }
            (_, Some(value)) => chains.push(AnswerChain {
                source: FillSource::Profile,
                key,
                answers: vec![value.render()],
            }),
            _ => {}
        }
        if let Some(question) = self.filler.survey.match_question(signal) {
            // Credited to the resolved key only when its slot was empty.
            let key = if chains.is_empty() { key } else { None };
            chains.push(AnswerChain {
                source: FillSource::Survey,
                key,
                answers: question.answers.clone(),
            });
        }
        ChoiceCandidates { chains }
    }

    async fn select_pass(&mut self) {
        for handle in self.enumerate(ControlKind::Select).await {
            self.fill_select(&handle).await;
        }
    }

    async fn fill_select(&mut self, handle: &ControlHandle) {
        let control = match self.describe(handle, ControlKind::Select).await {
            Ok(control) => control,
            Err(err) => return self.fail(handle, err),
        };
        if control.has_value() {
            return self.skip(&control, SkipReason::Prefilled);
        }
        let options = match bounded(self.limit, self.page.options(handle)).await {
            Ok(options) => options,
            Err(err) => return self.fail(handle, err),
        };

        let candidates = self.choice_candidates(&control.signal_text());
        if candidates.is_empty() {
            return self.skip(&control, SkipReason::Unresolved);
        }
        let Some((option, chain)) = candidates.choose(&options) else {
            return self.skip(&control, SkipReason::NoMatchingOption);
        };

        let (key, source) = (chain.key, chain.source.clone());
        match bounded(self.limit, self.page.select_option(handle, &option.label)).await {
            Ok(()) => self.filled(handle, control.display_name(), key, source, option.label.clone()),
            Err(err) => self.fail(handle, err),
        }
    }

    async fn group_pass(&mut self) {
        for kind in ControlKind::GROUPED {
            let handles = self.enumerate(kind).await;
            let mut groups: Vec<(String, Vec<ControlHandle>)> = Vec::new();
            for handle in handles {
                let name = match self.attribute(&handle, "name").await {
                    Ok(name) if !name.trim().is_empty() => name,
                    Ok(_) => handle.to_string(),
                    Err(err) => {
                        self.fail(&handle, err);
                        continue;
                    }
                };
                match groups.iter_mut().find(|(group, _)| *group == name) {
                    Some((_, members)) => members.push(handle),
                    None => groups.push((name, vec![handle])),
                }
            }

            for (name, handles) in groups {
                self.fill_group(kind, &name, &handles).await;
            }
        }
    }

    async fn group_members(&mut self, handles: &[ControlHandle]) -> Vec<GroupMember> {
        let mut members = Vec::with_capacity(handles.len());
        for handle in handles {
            let member = async {
                let label = bounded(self.limit, self.page.label_text(handle)).await?;
                let value = self.attribute(handle, "value").await?;
                let checked = bounded(self.limit, self.page.is_checked(handle)).await?;
                Ok::<_, PageError>(GroupMember {
                    handle: handle.clone(),
                    option: ChoiceOption::new(label.trim(), value.trim()),
                    checked,
                })
            }
            .await;
            match member {
                Ok(member) => members.push(member),
                Err(err) => self.fail(handle, err),
            }
        }
        members
    }

    async fn fill_group(&mut self, kind: ControlKind, name: &str, handles: &[ControlHandle]) {
        let members = self.group_members(handles).await;
        let Some(first) = members.first() else {
            return;
        };
        let legend = bounded(self.limit, self.page.group_label(&first.handle))
            .await
            .unwrap_or_default();
        let single = members.len() == 1;
        let signal = if single {
            format!("{name} {legend} {}", first.option.label)
        } else {
            format!("{name} {legend}")
        };
        let group = ControlDescriptor {
            handle: first.handle.clone(),
            kind,
            identifier: name.to_string(),
            label: legend.clone(),
            placeholder: String::new(),
            accessible_name: if single { first.option.label.clone() } else { String::new() },
            required: false,
            current_value: None,
        };

        if members.iter().any(|member| member.checked) {
            return self.skip(&group, SkipReason::Prefilled);
        }

        let candidates = self.choice_candidates(&signal);
        if candidates.is_empty() {
            return self.skip(&group, SkipReason::Unresolved);
        }

        // A lone checkbox is a yes/no question: tick it only for an affirmative answer.
        let chosen = if single {
            candidates
                .leading()
                .filter(|(_, answer)| is_affirmative(answer))
                .map(|(chain, _)| (first, chain))
        } else {
            let options: Vec<ChoiceOption> =
                members.iter().map(|member| member.option.clone()).collect();
            candidates.choose(&options).and_then(|(option, chain)| {
                options
                    .iter()
                    .position(|candidate| std::ptr::eq(candidate, option))
                    .and_then(|index| members.get(index))
                    .map(|member| (member, chain))
            })
        };
        let Some((member, chain)) = chosen else {
            return self.skip(&group, SkipReason::NoMatchingOption);
        };

        let (key, source) = (chain.key, chain.source.clone());
        let handle = member.handle.clone();
        let value = member.option.label.clone();
        match bounded(self.limit, self.page.set_checked(&handle, true)).await {
            Ok(()) => self.filled(&handle, group.display_name(), key, source, value),
            Err(err) => self.fail(&handle, err),
        }
    }

    async fn file_pass(&mut self) {
        let handles = self.enumerate(ControlKind::File).await;
        if handles.is_empty() {
            return self.summary.record(FillEvent::Resume {
                outcome: UploadOutcome::NoControl,
            });
        }
        let Some(path) = self.filler.resume_path.clone() else {
            return self.summary.record(FillEvent::Resume {
                outcome: UploadOutcome::NotConfigured,
            });
        };

        let keywords: Vec<String> = self
            .filler
            .fill
            .resume_keywords
            .iter()
            .map(|keyword| normalize_signal(keyword))
            .filter(|keyword| !keyword.is_empty())
            .collect();

        let mut target = None;
        for handle in &handles {
            let signal = match self.describe(handle, ControlKind::File).await {
                Ok(control) => {
                    let accept = self.attribute(handle, "accept").await.unwrap_or_default();
                    normalize_signal(&format!("{} {accept}", control.signal_text()))
                }
                Err(err) => {
                    self.fail(handle, err);
                    continue;
                }
            };
            if keywords.iter().any(|keyword| signal.contains(keyword.as_str())) {
                target = Some(handle.clone());
                break;
            }
        }
        let target = target.or_else(|| (handles.len() == 1).then(|| handles[0].clone()));

        let outcome = match target {
            None => UploadOutcome::NoControl,
            Some(control) => match bounded(self.limit, self.page.set_file(&control, &path)).await {
                Ok(()) => UploadOutcome::Uploaded { control, path },
                Err(err) => UploadOutcome::Failed {
                    control,
                    error: err.to_string(),
                },
            },
        };
        self.summary.record(FillEvent::Resume { outcome });
    }
}

fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE_ANSWERS.contains(&answer.as_str())
}
