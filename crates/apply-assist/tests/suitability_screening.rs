use apply_assist::workflows::suitability::{
    RejectionReason, SuitabilityFilter, SuitabilityPolicy,
};

const ONSITE_POSTING: &str = "Hardware Internship. This is a full time, on-site role \
     at our Seattle office working alongside the firmware team.";

#[test]
fn onsite_role_outside_home_region_is_rejected_until_remote_is_offered() {
    let filter = SuitabilityFilter::default();

    let verdict = filter.evaluate(ONSITE_POSTING);
    assert!(!verdict.accepted);
    match &verdict.reason {
        Some(RejectionReason::OnsiteOutsideHomeRegion { region }) => assert_eq!(region, "Seattle"),
        other => panic!("expected location rejection, got {other:?}"),
    }
    assert!(verdict.narrative.is_none());

    let remote = format!("{ONSITE_POSTING} Remote candidates are also welcome.");
    let verdict = filter.evaluate(&remote);
    assert!(verdict.accepted, "{}", verdict.summary());
}

#[test]
fn authorization_question_passes_but_assertion_rejects() {
    let filter = SuitabilityFilter::default();

    let question = filter.evaluate(
        "Summer internship, remote friendly. Application question: \
         Are you authorized to work in the United States?",
    );
    assert!(question.accepted, "{}", question.summary());

    let assertion = filter.evaluate(
        "Summer internship, remote friendly. Candidates must be authorized to work \
         in the United States.",
    );
    assert!(!assertion.accepted);
    match assertion.reason {
        Some(RejectionReason::AuthorizationRequired { region }) => {
            assert_eq!(region, "United States")
        }
        other => panic!("expected authorization rejection, got {other:?}"),
    }
}

#[test]
fn authorization_for_a_held_region_is_accepted() {
    let filter = SuitabilityFilter::default();
    let verdict = filter.evaluate(
        "Data Science Internship in Hyderabad. Candidates must be authorized to work in India.",
    );
    assert!(verdict.accepted, "{}", verdict.summary());
}

#[test]
fn policy_from_another_region_changes_the_outcome() {
    let filter = SuitabilityFilter::new(SuitabilityPolicy {
        home_regions: vec!["Seattle".to_string()],
        disallowed_regions: vec!["Bengaluru".to_string()],
        authorized_regions: vec!["United States".to_string()],
        ..SuitabilityPolicy::default()
    });

    assert!(filter.evaluate(ONSITE_POSTING).accepted);

    let verdict = filter.evaluate(
        "Platform internship. Full time and on-site in Bengaluru for the entire term.",
    );
    assert!(!verdict.accepted);
    assert_eq!(
        verdict.reason_text().as_deref(),
        Some("rejected: full-time on-site role based in Bengaluru and not remote")
    );
}

#[test]
fn non_internship_postings_are_turned_away() {
    let verdict = SuitabilityFilter::default()
        .evaluate("Staff Engineer, remote. Lead our storage team from anywhere in India.");
    assert!(matches!(
        verdict.reason,
        Some(RejectionReason::PositionTypeMismatch { .. })
    ));
}
