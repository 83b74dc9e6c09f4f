use chrono::NaiveDate;

use crate::config::AssistPolicy;
use crate::workflows::escalation::{
    escalation_channel, spawn_responder, EscalationResponse, ScriptedResponder,
};
use crate::workflows::form::{
    ChoiceOption, ControlKind, DynamicAnswers, FillSummary, FixtureControl, FormFiller,
    FormFixture, InMemoryPage,
};
use crate::workflows::profile::domain::{
    Contact, Demographics, Education, Identity, WorkAuthorization,
};
use crate::workflows::profile::{flatten, FlatProfile, PersonalProfile};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 4).expect("valid date")
}

pub(super) fn profile() -> FlatProfile {
    flatten(&PersonalProfile {
        identity: Some(Identity {
            first_name: Some("Priya".to_string()),
            last_name: Some("Raman".to_string()),
            ..Identity::default()
        }),
        contact: Some(Contact {
            email: Some("priya@example.com".to_string()),
            phone: Some("+91 98450 00000".to_string()),
            ..Contact::default()
        }),
        work_authorization: Some(WorkAuthorization {
            authorized_countries: vec!["India".to_string()],
            requires_sponsorship: Some(true),
            citizenship: Some("Indian".to_string()),
        }),
        education: Some(Education {
            school: Some("IIT Madras".to_string()),
            degree: Some("Bachelor of Technology".to_string()),
            graduation_year: Some(2027),
            ..Education::default()
        }),
        demographics: Some(Demographics::default()),
        ..PersonalProfile::default()
    })
}

pub(super) fn filler() -> FormFiller {
    FormFiller::new(&AssistPolicy::default()).with_today(today())
}

pub(super) fn text(handle: &str, name: &str, label: &str) -> FixtureControl {
    FixtureControl {
        name: Some(name.to_string()),
        label: label.to_string(),
        ..FixtureControl::new(handle, ControlKind::SingleLineText)
    }
}

pub(super) fn textarea(handle: &str, name: &str, label: &str) -> FixtureControl {
    FixtureControl {
        kind: ControlKind::MultiLineText,
        ..text(handle, name, label)
    }
}

pub(super) fn select(handle: &str, name: &str, label: &str, options: &[&str]) -> FixtureControl {
    FixtureControl {
        name: Some(name.to_string()),
        label: label.to_string(),
        options: std::iter::once(ChoiceOption::new("Select...", ""))
            .chain(
                options
                    .iter()
                    .map(|option| ChoiceOption::new(*option, option.to_lowercase())),
            )
            .collect(),
        ..FixtureControl::new(handle, ControlKind::Select)
    }
}

pub(super) fn radio(handle: &str, group: &str, legend: &str, label: &str) -> FixtureControl {
    FixtureControl {
        name: Some(group.to_string()),
        group_label: legend.to_string(),
        label: label.to_string(),
        option_value: Some(label.to_lowercase()),
        ..FixtureControl::new(handle, ControlKind::ExclusiveChoice)
    }
}

pub(super) fn checkbox(handle: &str, name: &str, label: &str) -> FixtureControl {
    FixtureControl {
        name: Some(name.to_string()),
        label: label.to_string(),
        option_value: Some("on".to_string()),
        ..FixtureControl::new(handle, ControlKind::MultiChoice)
    }
}

pub(super) fn page(controls: Vec<FixtureControl>) -> InMemoryPage {
    InMemoryPage::new(FormFixture {
        page_text: String::new(),
        challenge: false,
        controls,
    })
}

pub(super) struct Run {
    pub summary: FillSummary,
    pub responder: ScriptedResponder,
}

/// Fills `page` with a scripted human and hands back both sides.
pub(super) async fn run(
    filler: &FormFiller,
    page: &InMemoryPage,
    answers: &DynamicAnswers,
    responses: Vec<EscalationResponse>,
) -> Run {
    run_with(filler, page, &profile(), answers, responses).await
}

pub(super) async fn run_with(
    filler: &FormFiller,
    page: &InMemoryPage,
    profile: &FlatProfile,
    answers: &DynamicAnswers,
    responses: Vec<EscalationResponse>,
) -> Run {
    let (channel, inbox) = escalation_channel(1);
    let handle = spawn_responder(inbox, ScriptedResponder::new(responses));
    let summary = filler.fill_form(page, profile, answers, &channel).await;
    drop(channel);
    let responder = handle.await.expect("responder task completes");
    Run { summary, responder }
}
