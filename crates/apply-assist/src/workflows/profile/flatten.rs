use super::domain::PersonalProfile;
use super::key::CanonicalKey;
use super::{FlatProfile, FlatValue};

/// Synthetic default: the profile has no field for it, every application is
/// answered as available for full-time work.
pub const SYNTHETIC_AVAILABLE_FULL_TIME: &str = "Yes";

const YES: &str = "Yes";
const NO: &str = "No";

/// Derives the flat canonical-key view of a profile. Missing sections leave
/// their slots empty instead of failing.
pub fn flatten(profile: &PersonalProfile) -> FlatProfile {
    let mut flat = FlatProfile::empty();

    if let Some(identity) = &profile.identity {
        flat.set_text(CanonicalKey::FirstName, identity.first_name.as_deref());
        flat.set_text(CanonicalKey::LastName, identity.last_name.as_deref());
        flat.set_text(CanonicalKey::PreferredName, identity.preferred_name.as_deref());
        flat.set_text(CanonicalKey::Pronouns, identity.pronouns.as_deref());

        let full_name = [identity.first_name.as_deref(), identity.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        flat.set_text(CanonicalKey::FullName, Some(full_name.as_str()));
    }

    if let Some(contact) = &profile.contact {
        flat.set_text(CanonicalKey::Email, contact.email.as_deref());
        flat.set_text(CanonicalKey::Phone, contact.phone.as_deref());
        flat.set_text(CanonicalKey::Linkedin, contact.linkedin.as_deref());
        flat.set_text(CanonicalKey::Github, contact.github.as_deref());
        flat.set_text(CanonicalKey::Portfolio, contact.portfolio.as_deref());
    }

    if let Some(residence) = &profile.location {
        flat.set_text(CanonicalKey::Address, residence.address.as_deref());
        flat.set_text(CanonicalKey::City, residence.city.as_deref());
        flat.set_text(CanonicalKey::State, residence.state.as_deref());
        flat.set_text(CanonicalKey::PostalCode, residence.postal_code.as_deref());
        flat.set_text(CanonicalKey::Country, residence.country.as_deref());

        let location = [
            residence.city.as_deref(),
            residence.state.as_deref(),
            residence.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
        flat.set_text(CanonicalKey::Location, Some(location.as_str()));
    }

    if let Some(authorization) = &profile.work_authorization {
        let countries: Vec<String> = authorization
            .authorized_countries
            .iter()
            .map(|country| country.trim().to_string())
            .filter(|country| !country.is_empty())
            .collect();
        if !countries.is_empty() {
            flat.set(CanonicalKey::WorkAuthorization, FlatValue::List(countries));
        }
        flat.set_text(
            CanonicalKey::RequiresSponsorship,
            authorization.requires_sponsorship.map(yes_no),
        );
        flat.set_text(CanonicalKey::Citizenship, authorization.citizenship.as_deref());
    }

    if let Some(availability) = &profile.availability {
        flat.set_text(CanonicalKey::AvailableStartDate, availability.start_date.as_deref());
        flat.set_text(
            CanonicalKey::WillingToRelocate,
            availability.willing_to_relocate.map(yes_no),
        );
        flat.set_text(CanonicalKey::NoticePeriod, availability.notice_period.as_deref());
    }
    flat.set_text(
        CanonicalKey::AvailableFullTime,
        Some(SYNTHETIC_AVAILABLE_FULL_TIME),
    );

    if let Some(education) = &profile.education {
        flat.set_text(CanonicalKey::School, education.school.as_deref());
        flat.set_text(CanonicalKey::Degree, education.degree.as_deref());
        flat.set_text(CanonicalKey::Major, education.major.as_deref());
        flat.set_text(CanonicalKey::Gpa, education.gpa.as_deref());
        let year = education.graduation_year.map(|year| year.to_string());
        flat.set_text(CanonicalKey::GraduationYear, year.as_deref());
    }

    let current = profile
        .experience
        .iter()
        .find(|entry| entry.current)
        .or_else(|| profile.experience.first());
    if let Some(entry) = current {
        flat.set_text(CanonicalKey::CurrentCompany, entry.company.as_deref());
        flat.set_text(CanonicalKey::CurrentTitle, entry.title.as_deref());
    }
    let total_years: f32 = profile
        .experience
        .iter()
        .filter_map(|entry| entry.years)
        .sum();
    if total_years > 0.0 {
        let rendered = format_years(total_years);
        flat.set_text(CanonicalKey::YearsExperience, Some(rendered.as_str()));
    }

    let skills: Vec<String> = profile
        .skills
        .iter()
        .map(|skill| skill.trim().to_string())
        .filter(|skill| !skill.is_empty())
        .collect();
    if !skills.is_empty() {
        flat.set(CanonicalKey::Skills, FlatValue::List(skills));
    }

    if let Some(demographics) = &profile.demographics {
        flat.set_text(CanonicalKey::Gender, demographics.gender.as_deref());
        flat.set_text(CanonicalKey::Transgender, demographics.transgender.as_deref());
        flat.set_text(
            CanonicalKey::SexualOrientation,
            demographics.sexual_orientation.as_deref(),
        );
        flat.set_text(CanonicalKey::Ethnicity, demographics.ethnicity.as_deref());
        flat.set_text(CanonicalKey::VeteranStatus, demographics.veteran_status.as_deref());
        flat.set_text(
            CanonicalKey::DisabilityStatus,
            demographics.disability_status.as_deref(),
        );
    }

    if let Some(answers) = &profile.answers {
        flat.set_text(CanonicalKey::WhyCompany, answers.why_company.as_deref());
        flat.set_text(CanonicalKey::GoodFit, answers.good_fit.as_deref());
        flat.set_text(
            CanonicalKey::SalaryExpectation,
            answers.salary_expectation.as_deref(),
        );
        flat.set_text(CanonicalKey::CoverLetter, answers.cover_letter.as_deref());
        flat.set_text(CanonicalKey::AdditionalInfo, answers.additional_info.as_deref());
    }

    flat
}

fn yes_no(value: bool) -> &'static str {
    if value {
        YES
    } else {
        NO
    }
}

fn format_years(years: f32) -> String {
    if years.fract().abs() < f32::EPSILON {
        format!("{}", years as u32)
    } else {
        format!("{years:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::profile::domain::{
        Availability, Contact, Education, Experience, Identity, WorkAuthorization,
    };

    fn sample_profile() -> PersonalProfile {
        PersonalProfile {
            identity: Some(Identity {
                first_name: Some("Jane".to_string()),
                last_name: Some("Doe".to_string()),
                ..Identity::default()
            }),
            contact: Some(Contact {
                email: Some("jane@example.com".to_string()),
                phone: Some("  ".to_string()),
                ..Contact::default()
            }),
            work_authorization: Some(WorkAuthorization {
                authorized_countries: vec!["India".to_string()],
                requires_sponsorship: Some(true),
                citizenship: None,
            }),
            availability: Some(Availability {
                start_date: Some("2026-05-01".to_string()),
                ..Availability::default()
            }),
            education: Some(Education {
                school: Some("IIT Madras".to_string()),
                graduation_year: Some(2027),
                ..Education::default()
            }),
            experience: vec![
                Experience {
                    company: Some("Acme".to_string()),
                    title: Some("Intern".to_string()),
                    years: Some(0.5),
                    current: false,
                },
                Experience {
                    company: Some("Globex".to_string()),
                    title: Some("Research Assistant".to_string()),
                    years: Some(1.0),
                    current: true,
                },
            ],
            skills: vec!["Rust".to_string(), " ".to_string(), "SQL".to_string()],
            ..PersonalProfile::default()
        }
    }

    #[test]
    fn flatten_maps_nested_sections_to_canonical_keys() {
        let flat = flatten(&sample_profile());

        assert_eq!(flat.text(CanonicalKey::FirstName).as_deref(), Some("Jane"));
        assert_eq!(flat.text(CanonicalKey::FullName).as_deref(), Some("Jane Doe"));
        assert_eq!(flat.text(CanonicalKey::RequiresSponsorship).as_deref(), Some("Yes"));
        assert_eq!(
            flat.value(CanonicalKey::WorkAuthorization),
            Some(&FlatValue::List(vec!["India".to_string()]))
        );
        assert_eq!(flat.text(CanonicalKey::GraduationYear).as_deref(), Some("2027"));
        assert_eq!(flat.text(CanonicalKey::CurrentCompany).as_deref(), Some("Globex"));
        assert_eq!(flat.text(CanonicalKey::YearsExperience).as_deref(), Some("1.5"));
        assert_eq!(flat.text(CanonicalKey::Skills).as_deref(), Some("Rust, SQL"));
    }

    #[test]
    fn blank_values_count_as_absent() {
        let flat = flatten(&sample_profile());
        assert!(flat.has_slot(CanonicalKey::Phone));
        assert!(flat.value(CanonicalKey::Phone).is_none());
    }

    #[test]
    fn missing_education_leaves_education_slots_empty() {
        let mut profile = sample_profile();
        profile.education = None;

        let flat = flatten(&profile);

        for key in [
            CanonicalKey::School,
            CanonicalKey::Degree,
            CanonicalKey::Major,
            CanonicalKey::Gpa,
            CanonicalKey::GraduationYear,
        ] {
            assert!(flat.has_slot(key), "{key} should keep a slot");
            assert!(flat.value(key).is_none(), "{key} should be empty");
        }
    }

    #[test]
    fn empty_profile_still_defines_every_slot() {
        let flat = flatten(&PersonalProfile::default());
        for key in CanonicalKey::ALL {
            assert!(flat.has_slot(key));
        }
        assert_eq!(
            flat.text(CanonicalKey::AvailableFullTime).as_deref(),
            Some(SYNTHETIC_AVAILABLE_FULL_TIME)
        );
        assert_eq!(flat.filled_len(), 1);
    }
}
