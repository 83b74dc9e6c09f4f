use crate::cli::{EvaluateArgs, ProfileArgs};
use apply_assist::config::{AppConfig, AssistPolicy};
use apply_assist::error::AppError;
use apply_assist::telemetry;
use apply_assist::workflows::escalation::{
    escalation_channel, spawn_responder, ConsoleResponder, SubmissionGate,
};
use apply_assist::workflows::form::{
    DynamicAnswers, FillSummary, FormFiller, FormFixture, InMemoryPage,
};
use apply_assist::workflows::profile::{flatten, FlatProfile, PersonalProfile};
use apply_assist::workflows::resolver::FieldResolver;
use apply_assist::workflows::suitability::{SuitabilityFilter, SuitabilityVerdict};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct FillArgs {
    /// Form fixture JSON describing the controls on the page
    #[arg(long)]
    pub(crate) form: PathBuf,
    /// Plain-text posting used for screening; defaults to the fixture's page text
    #[arg(long)]
    pub(crate) page: Option<PathBuf>,
    /// Profile JSON; overrides ASSIST_PROFILE_PATH
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
    /// Date used for start-date answers (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Loaded configuration plus the policy every command consults.
struct Session {
    config: AppConfig,
    policy: AssistPolicy,
}

impl Session {
    fn start() -> Result<Self, AppError> {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;
        let policy = config.assist.load_policy()?;
        info!(environment = ?config.environment, "session started");
        Ok(Self { config, policy })
    }

    fn profile(&self, override_path: Option<&Path>) -> Result<FlatProfile, AppError> {
        let path = override_path.unwrap_or(&self.config.assist.profile_path);
        let profile = PersonalProfile::from_path(path)?;
        let flat = flatten(&profile);
        info!(path = %path.display(), slots = flat.filled_len(), "profile loaded");
        Ok(flat)
    }

    fn suitability(&self) -> SuitabilityFilter {
        SuitabilityFilter::new(self.policy.suitability.clone())
    }
}

#[derive(Serialize)]
struct FillReport<'a> {
    verdict: &'a SuitabilityVerdict,
    summary: Option<&'a FillSummary>,
    submitted: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let session = Session::start()?;
    let text = std::fs::read_to_string(&args.page)?;
    let verdict = session.suitability().evaluate(&text);
    print_json(&verdict)
}

pub(crate) fn run_resolve(signal: &str) -> Result<(), AppError> {
    let session = Session::start()?;
    let resolver = FieldResolver::with_table(&session.policy.synonyms);
    match resolver.resolve(signal) {
        Some(key) => println!("{key}"),
        None => println!("unresolved"),
    }
    Ok(())
}

pub(crate) fn run_flatten(args: ProfileArgs) -> Result<(), AppError> {
    let session = Session::start()?;
    let profile = session.profile(args.profile.as_deref())?;
    print_json(&profile)
}

pub(crate) async fn run_fill(args: FillArgs) -> Result<(), AppError> {
    let session = Session::start()?;
    let profile = session.profile(args.profile.as_deref())?;
    let fixture = FormFixture::from_path(&args.form)?;
    let page_text = match &args.page {
        Some(path) => std::fs::read_to_string(path)?,
        None => fixture.page_text.clone(),
    };

    let verdict = session.suitability().evaluate(&page_text);
    if !verdict.accepted {
        info!(reason = %verdict.summary(), "skipping target");
        return print_json(&FillReport {
            verdict: &verdict,
            summary: None,
            submitted: false,
        });
    }

    let answers = match &verdict.narrative {
        Some(narrative) => DynamicAnswers::with_narrative(narrative.clone()),
        None => DynamicAnswers::default(),
    };

    let assist = &session.config.assist;
    let mut filler = FormFiller::new(&session.policy)
        .with_control_timeout(assist.control_timeout)
        .with_resume(assist.resume_path.clone());
    if let Some(today) = args.today {
        filler = filler.with_today(today);
    }

    let (human, inbox) = escalation_channel(1);
    let human = human.with_missing_value_timeout(assist.missing_value_timeout);
    let responder = spawn_responder(inbox, ConsoleResponder::new());

    let page = InMemoryPage::new(fixture);
    let summary = filler.fill_form(&page, &profile, &answers, &human).await;
    for line in summary.lines() {
        println!("{line}");
    }

    if summary.failed > 0 {
        let prompt = format!(
            "{} control(s) could not be filled. Continue to submission?",
            summary.failed
        );
        if !human.confirm_continuation(&prompt).await? {
            info!("human stopped before submission");
            drop(human);
            finish(responder).await;
            return print_json(&FillReport {
                verdict: &verdict,
                summary: Some(&summary),
                submitted: false,
            });
        }
    }

    let job_title = verdict
        .attributes
        .role
        .as_deref()
        .unwrap_or("this position");
    let employer = verdict
        .attributes
        .employer
        .as_deref()
        .unwrap_or("this employer");
    let submitted = SubmissionGate::new(assist.auto_submit)
        .approve(&human, job_title, employer)
        .await?;

    drop(human);
    finish(responder).await;

    print_json(&FillReport {
        verdict: &verdict,
        summary: Some(&summary),
        submitted,
    })
}

async fn finish(responder: JoinHandle<ConsoleResponder>) {
    if let Err(err) = responder.await {
        warn!(error = %err, "escalation responder stopped abnormally");
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date(" 2026-05-04 "),
            Ok(NaiveDate::from_ymd_opt(2026, 5, 4).expect("valid date"))
        );
    }

    #[test]
    fn parse_date_names_the_bad_input() {
        let err = parse_date("May 4").expect_err("not an ISO date");
        assert!(err.contains("'May 4'"));
    }
}
