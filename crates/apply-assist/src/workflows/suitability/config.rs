use serde::{Deserialize, Serialize};

/// Regional and role constraints the filter applies to a target's page text.
///
/// The built-in values are a worked example for an applicant based in India
/// who is looking for internships and holds no foreign work authorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuitabilityPolicy {
    /// Places the applicant can work from in person.
    pub home_regions: Vec<String>,
    /// Office locations that disqualify an on-site or in-person role.
    pub disallowed_regions: Vec<String>,
    /// Regions where the applicant already holds work authorization.
    pub authorized_regions: Vec<String>,
    /// Position types the applicant is seeking, matched on word boundaries.
    pub position_keywords: Vec<String>,
    pub remote_keywords: Vec<String>,
    pub full_time_keywords: Vec<String>,
    pub onsite_keywords: Vec<String>,
    /// Generate a narrative "why this company" answer on acceptance.
    pub generate_narrative: bool,
}

const HOME_REGIONS: &[&str] = &[
    "India",
    "Bengaluru",
    "Bangalore",
    "Hyderabad",
    "Chennai",
    "Pune",
    "Mumbai",
    "Delhi",
    "Gurgaon",
    "Gurugram",
    "Noida",
];

const DISALLOWED_REGIONS: &[&str] = &[
    "United States",
    "USA",
    "New York",
    "San Francisco",
    "Seattle",
    "Austin",
    "Boston",
    "London",
    "Berlin",
    "Toronto",
    "Singapore",
    "Sydney",
];

const AUTHORIZED_REGIONS: &[&str] = &["India"];
const POSITION_KEYWORDS: &[&str] = &["internship", "intern", "interns"];
const REMOTE_KEYWORDS: &[&str] = &["remote", "work from home", "wfh", "distributed team"];
const FULL_TIME_KEYWORDS: &[&str] = &["full time", "full-time", "fulltime"];
const ONSITE_KEYWORDS: &[&str] = &["on-site", "onsite", "on site", "in-office", "in office"];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Default for SuitabilityPolicy {
    fn default() -> Self {
        Self {
            home_regions: owned(HOME_REGIONS),
            disallowed_regions: owned(DISALLOWED_REGIONS),
            authorized_regions: owned(AUTHORIZED_REGIONS),
            position_keywords: owned(POSITION_KEYWORDS),
            remote_keywords: owned(REMOTE_KEYWORDS),
            full_time_keywords: owned(FULL_TIME_KEYWORDS),
            onsite_keywords: owned(ONSITE_KEYWORDS),
            generate_narrative: true,
        }
    }
}
