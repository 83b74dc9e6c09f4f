use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed vocabulary of applicant data a form control can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalKey {
    FirstName,
    LastName,
    FullName,
    PreferredName,
    Pronouns,
    Email,
    Phone,
    Linkedin,
    Github,
    Portfolio,
    Address,
    City,
    State,
    PostalCode,
    Country,
    Location,
    WorkAuthorization,
    RequiresSponsorship,
    Citizenship,
    AvailableStartDate,
    AvailableFullTime,
    WillingToRelocate,
    NoticePeriod,
    School,
    Degree,
    Major,
    Gpa,
    GraduationYear,
    CurrentCompany,
    CurrentTitle,
    YearsExperience,
    Skills,
    Gender,
    Transgender,
    SexualOrientation,
    Ethnicity,
    VeteranStatus,
    DisabilityStatus,
    SalaryExpectation,
    WhyCompany,
    GoodFit,
    CoverLetter,
    AdditionalInfo,
}

impl CanonicalKey {
    pub const ALL: [Self; 43] = [
        Self::FirstName,
        Self::LastName,
        Self::FullName,
        Self::PreferredName,
        Self::Pronouns,
        Self::Email,
        Self::Phone,
        Self::Linkedin,
        Self::Github,
        Self::Portfolio,
        Self::Address,
        Self::City,
        Self::State,
        Self::PostalCode,
        Self::Country,
        Self::Location,
        Self::WorkAuthorization,
        Self::RequiresSponsorship,
        Self::Citizenship,
        Self::AvailableStartDate,
        Self::AvailableFullTime,
        Self::WillingToRelocate,
        Self::NoticePeriod,
        Self::School,
        Self::Degree,
        Self::Major,
        Self::Gpa,
        Self::GraduationYear,
        Self::CurrentCompany,
        Self::CurrentTitle,
        Self::YearsExperience,
        Self::Skills,
        Self::Gender,
        Self::Transgender,
        Self::SexualOrientation,
        Self::Ethnicity,
        Self::VeteranStatus,
        Self::DisabilityStatus,
        Self::SalaryExpectation,
        Self::WhyCompany,
        Self::GoodFit,
        Self::CoverLetter,
        Self::AdditionalInfo,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::FullName => "fullName",
            Self::PreferredName => "preferredName",
            Self::Pronouns => "pronouns",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Linkedin => "linkedin",
            Self::Github => "github",
            Self::Portfolio => "portfolio",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postalCode",
            Self::Country => "country",
            Self::Location => "location",
            Self::WorkAuthorization => "workAuthorization",
            Self::RequiresSponsorship => "requiresSponsorship",
            Self::Citizenship => "citizenship",
            Self::AvailableStartDate => "availableStartDate",
            Self::AvailableFullTime => "availableFullTime",
            Self::WillingToRelocate => "willingToRelocate",
            Self::NoticePeriod => "noticePeriod",
            Self::School => "school",
            Self::Degree => "degree",
            Self::Major => "major",
            Self::Gpa => "gpa",
            Self::GraduationYear => "graduationYear",
            Self::CurrentCompany => "currentCompany",
            Self::CurrentTitle => "currentTitle",
            Self::YearsExperience => "yearsExperience",
            Self::Skills => "skills",
            Self::Gender => "gender",
            Self::Transgender => "transgender",
            Self::SexualOrientation => "sexualOrientation",
            Self::Ethnicity => "ethnicity",
            Self::VeteranStatus => "veteranStatus",
            Self::DisabilityStatus => "disabilityStatus",
            Self::SalaryExpectation => "salaryExpectation",
            Self::WhyCompany => "whyCompany",
            Self::GoodFit => "goodFit",
            Self::CoverLetter => "coverLetter",
            Self::AdditionalInfo => "additionalInfo",
        }
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn vocabulary_lists_every_key_once() {
        let unique: HashSet<_> = CanonicalKey::ALL.iter().collect();
        assert_eq!(unique.len(), CanonicalKey::ALL.len());
    }

    #[test]
    fn serde_name_matches_display_name() {
        for key in CanonicalKey::ALL {
            let json = serde_json::to_string(&key).expect("serializes");
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }
}
