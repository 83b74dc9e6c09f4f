use super::common::*;
use crate::workflows::form::{DynamicAnswers, FillEvent, FillSource, SkipReason};
use crate::workflows::profile::CanonicalKey;

#[tokio::test]
async fn ethnicity_chain_falls_back_to_available_option() {
    let page = page(vec![select(
        "eth",
        "ethnicity",
        "Ethnicity",
        &["White", "Indian", "Decline to self-identify"],
    )]);

    let run = run(&filler(), &page, &DynamicAnswers::default(), Vec::new()).await;

    assert_eq!(page.value_of("eth").as_deref(), Some("indian"));
    assert!(run.summary.filled_keys.contains(&CanonicalKey::Ethnicity));
    assert!(run.summary.events.iter().any(|event| matches!(
        event,
        FillEvent::Filled {
            source: FillSource::Survey,
            ..
        }
    )));
}

#[tokio::test]
async fn gender_group_uses_exact_option_before_substring() {
    let page = page(vec![
        radio("g1", "gender", "Gender", "Female"),
        radio("g2", "gender", "Gender", "Male"),
        radio("g3", "gender", "Gender", "Decline"),
    ]);

    run(&filler(), &page, &DynamicAnswers::default(), Vec::new()).await;

    assert!(!page.checked("g1"));
    assert!(page.checked("g2"));
}

#[tokio::test]
async fn transgender_question_gets_its_own_default() {
    let page = page(vec![
        radio("t1", "transgender", "Do you identify as transgender?", "Yes"),
        radio("t2", "transgender", "Do you identify as transgender?", "No"),
    ]);

    run(&filler(), &page, &DynamicAnswers::default(), Vec::new()).await;

    assert!(page.checked("t2"));
    assert!(!page.checked("t1"));
}

#[tokio::test]
async fn answered_group_is_left_alone() {
    let mut female = radio("g1", "gender", "Gender", "Female");
    female.checked = true;
    let page = page(vec![female, radio("g2", "gender", "Gender", "Male")]);

    let run = run(&filler(), &page, &DynamicAnswers::default(), Vec::new()).await;

    assert!(page.checked("g1"));
    assert!(!page.checked("g2"));
    match &run.summary.events[0] {
        FillEvent::Skipped { reason, .. } => assert_eq!(*reason, SkipReason::Prefilled),
        other => panic!("expected prefilled skip, got {other:?}"),
    }
}

#[tokio::test]
async fn profile_value_answers_yes_no_group() {
    let legend = "Will you now or in the future require visa sponsorship?";
    let page = page(vec![
        radio("s1", "visa_sponsorship", legend, "Yes"),
        radio("s2", "visa_sponsorship", legend, "No"),
    ]);

    run(&filler(), &page, &DynamicAnswers::default(), Vec::new()).await;

    assert!(page.checked("s1"));
}

#[tokio::test]
async fn lone_consent_checkbox_is_ticked_and_unknown_one_is_not() {
    let page = page(vec![
        checkbox("consent", "privacy_consent", "I agree to the privacy policy"),
        checkbox("news", "newsletter", "Subscribe to our newsletter"),
    ]);

    let run = run(&filler(), &page, &DynamicAnswers::default(), Vec::new()).await;

    assert!(page.checked("consent"));
    assert!(!page.checked("news"));
    assert_eq!(run.summary.filled_controls.len(), 1);
}

#[tokio::test]
async fn select_without_matching_option_is_skipped() {
    let page = page(vec![select(
        "deg",
        "highest_education",
        "Highest level of education",
        &["High school", "Doctorate"],
    )]);

    let run = run(&filler(), &page, &DynamicAnswers::default(), Vec::new()).await;

    assert_eq!(page.value_of("deg").as_deref(), Some(""));
    assert!(run.summary.events.iter().any(|event| matches!(
        event,
        FillEvent::Skipped {
            reason: SkipReason::NoMatchingOption,
            ..
        }
    )));
}

#[tokio::test]
async fn profile_value_that_fits_no_option_falls_back_to_survey_answer() {
    let legend = "Have you ever been employed by this organization?";
    let page = page(vec![
        radio("p1", "prior_employment", legend, "Yes"),
        radio("p2", "prior_employment", legend, "No"),
    ]);
    let profile = profile().with_value(CanonicalKey::CurrentCompany, "Globex");

    let run = run_with(&filler(), &page, &profile, &DynamicAnswers::default(), Vec::new()).await;

    assert!(page.checked("p2"));
    assert!(!page.checked("p1"));
    assert!(!run.summary.filled_keys.contains(&CanonicalKey::CurrentCompany));
    match &run.summary.events[0] {
        FillEvent::Filled { source, value, .. } => {
            assert_eq!(*source, FillSource::Survey);
            assert_eq!(value, "No");
        }
        other => panic!("expected survey fill, got {other:?}"),
    }
}

#[tokio::test]
async fn work_authorization_answer_depends_on_the_region_asked() {
    let us = "Are you legally authorized to work in the United States?";
    let india = "Are you legally authorized to work in India?";
    let page = page(vec![
        radio("us1", "auth_us", us, "Yes"),
        radio("us2", "auth_us", us, "No"),
        select("in", "auth_in", india, &["Yes", "No"]),
    ]);

    let run = run(&filler(), &page, &DynamicAnswers::default(), Vec::new()).await;

    assert!(page.checked("us2"));
    assert!(!page.checked("us1"));
    assert_eq!(page.value_of("in").as_deref(), Some("yes"));
    assert!(run.summary.events.iter().all(|event| match event {
        FillEvent::Filled { source, .. } => {
            *source == FillSource::Rule("work_authorization".to_string())
        }
        _ => true,
    }));
}
