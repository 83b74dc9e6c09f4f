use crate::workflows::profile::CanonicalKey;
use serde::{Deserialize, Serialize};

/// One canonical key and the aliases that identify it in control text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub key: CanonicalKey,
    pub aliases: Vec<String>,
}

/// Ordered synonym table. Entries are tested in declaration order and the
/// first entry with a matching alias wins, so narrower keys whose aliases
/// contain a broader key's alias must come first (`transgender` before
/// `gender`, `email` before `address`, cover letters before `state`).
/// Aliases must not contain another key's alias either: containment runs in
/// both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymTable(pub Vec<SynonymEntry>);

impl SynonymTable {
    pub fn entries(&self) -> &[SynonymEntry] {
        &self.0
    }

    pub fn aliases_for(&self, key: CanonicalKey) -> Option<&[String]> {
        self.0
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.aliases.as_slice())
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self(
            BUILTIN_SYNONYMS
                .iter()
                .map(|(key, aliases)| SynonymEntry {
                    key: *key,
                    aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
                })
                .collect(),
        )
    }
}

const BUILTIN_SYNONYMS: &[(CanonicalKey, &[&str])] = &[
    (CanonicalKey::Email, &["email", "e-mail", "email_address"]),
    (
        CanonicalKey::Phone,
        &["phone", "phone_number", "mobile", "telephone", "cell_number", "contact_number"],
    ),
    (
        CanonicalKey::FirstName,
        &["first_name", "given_name", "fname", "forename"],
    ),
    (CanonicalKey::LastName, &["last_name", "family_name", "surname"]),
    (
        CanonicalKey::PreferredName,
        &["preferred_name", "nickname", "goes_by"],
    ),
    (
        CanonicalKey::FullName,
        &["full_name", "your_name", "legal_name", "candidate_name", "applicant_name"],
    ),
    (CanonicalKey::Pronouns, &["pronoun"]),
    (CanonicalKey::Linkedin, &["linkedin"]),
    (CanonicalKey::Github, &["github"]),
    (
        CanonicalKey::Portfolio,
        &["portfolio", "personal_website", "personal_site"],
    ),
    (
        CanonicalKey::RequiresSponsorship,
        &["sponsor", "require_visa", "need_visa", "h1b"],
    ),
    (
        CanonicalKey::WorkAuthorization,
        &[
            "authorized_to_work",
            "authorised_to_work",
            "work_authorization",
            "work_authorisation",
            "eligible_to_work",
            "legally_authorized",
            "legally_eligible",
            "right_to_work",
            "work_permit",
        ],
    ),
    (CanonicalKey::Citizenship, &["citizenship", "citizen", "nationality"]),
    (CanonicalKey::Transgender, &["transgender"]),
    (CanonicalKey::SexualOrientation, &["sexual_orientation", "orientation"]),
    (CanonicalKey::Gender, &["gender", "sex"]),
    (
        CanonicalKey::Ethnicity,
        &["ethnicity", "ethnic", "race", "hispanic", "latino"],
    ),
    (
        CanonicalKey::VeteranStatus,
        &["veteran", "military_service"],
    ),
    (CanonicalKey::DisabilityStatus, &["disability", "disabled"]),
    (CanonicalKey::Address, &["address", "street", "address_line"]),
    (
        CanonicalKey::PostalCode,
        &["zip", "postal", "postcode", "pincode"],
    ),
    (CanonicalKey::City, &["city", "town"]),
    (
        CanonicalKey::CoverLetter,
        &[
            "cover_letter",
            "personal_statement",
            "motivation_letter",
            "statement_of_purpose",
        ],
    ),
    (CanonicalKey::State, &["state", "province"]),
    (CanonicalKey::Country, &["country"]),
    (
        CanonicalKey::WillingToRelocate,
        &["relocate", "relocation"],
    ),
    (
        CanonicalKey::Location,
        &["location", "based_in", "where_are_you_based"],
    ),
    (
        CanonicalKey::AvailableFullTime,
        &["full_time", "available_full_time"],
    ),
    (
        CanonicalKey::AvailableStartDate,
        &[
            "start_date",
            "available_from",
            "earliest_start",
            "when_can_you_start",
            "joining_date",
            "availability",
        ],
    ),
    (CanonicalKey::NoticePeriod, &["notice_period"]),
    (
        CanonicalKey::School,
        &["school", "university", "college", "institution", "alma_mater"],
    ),
    (CanonicalKey::Degree, &["degree", "qualification"]),
    (
        CanonicalKey::Major,
        &[
            "major",
            "field_of_study",
            "area_of_study",
            "discipline",
            "specialization",
            "specialisation",
        ],
    ),
    (CanonicalKey::Gpa, &["gpa", "cgpa", "grade_point"]),
    (
        CanonicalKey::GraduationYear,
        &["graduation", "grad_year", "class_of", "passing_year"],
    ),
    (
        CanonicalKey::CurrentCompany,
        &[
            "current_company",
            "current_employer",
            "employer",
            "company_name",
            "organization",
            "organisation",
        ],
    ),
    (
        CanonicalKey::CurrentTitle,
        &[
            "current_title",
            "job_title",
            "current_role",
            "current_position",
            "designation",
        ],
    ),
    (
        CanonicalKey::YearsExperience,
        &[
            "years_of_experience",
            "years_experience",
            "experience_years",
            "total_experience",
        ],
    ),
    (
        CanonicalKey::Skills,
        &["skills", "technologies", "tech_stack", "programming_languages"],
    ),
    (
        CanonicalKey::SalaryExpectation,
        &["salary", "compensation", "expected_ctc", "expected_pay", "stipend"],
    ),
    (
        CanonicalKey::WhyCompany,
        &[
            "why_company",
            "why_this_company",
            "why_do_you_want",
            "why_are_you_interested",
            "why_join",
            "why_us",
            "interested_in_joining",
            "interested_in_working",
        ],
    ),
    (
        CanonicalKey::GoodFit,
        &[
            "good_fit",
            "great_fit",
            "best_fit",
            "what_makes_you",
            "why_should_we_hire",
        ],
    ),
    (
        CanonicalKey::AdditionalInfo,
        &[
            "additional_information",
            "additional_info",
            "additional_comments",
            "anything_else",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_table_covers_each_key_once() {
        let table = SynonymTable::default();
        let keys: HashSet<_> = table.entries().iter().map(|entry| entry.key).collect();
        assert_eq!(keys.len(), table.entries().len());
        assert_eq!(keys.len(), CanonicalKey::ALL.len());
    }

    #[test]
    fn every_entry_has_at_least_one_alias() {
        for entry in SynonymTable::default().entries() {
            assert!(!entry.aliases.is_empty(), "{} has no aliases", entry.key);
        }
    }

    #[test]
    fn table_round_trips_as_ordered_json_array() {
        let table = SynonymTable::default();
        let json = serde_json::to_value(&table).expect("serializes");
        let first = &json[0];
        assert_eq!(first["key"], "email");
    }
}
