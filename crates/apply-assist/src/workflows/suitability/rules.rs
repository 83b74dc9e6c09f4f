use regex::Regex;
use std::sync::OnceLock;

use super::config::SuitabilityPolicy;
use super::verdict::RejectionReason;

/// Policy phrase lists compiled into case-insensitive, word-bounded matchers.
pub(crate) struct PolicyMatchers {
    pub(crate) home: Option<Regex>,
    pub(crate) disallowed: Option<Regex>,
    remote: Option<Regex>,
    full_time: Option<Regex>,
    onsite: Option<Regex>,
    position: Option<Regex>,
    authorized: Vec<String>,
    expected_positions: Vec<String>,
}

impl PolicyMatchers {
    pub(crate) fn compile(policy: &SuitabilityPolicy) -> Result<Self, regex::Error> {
        Ok(Self {
            home: phrase_matcher(&policy.home_regions)?,
            disallowed: phrase_matcher(&policy.disallowed_regions)?,
            remote: phrase_matcher(&policy.remote_keywords)?,
            full_time: phrase_matcher(&policy.full_time_keywords)?,
            onsite: phrase_matcher(&policy.onsite_keywords)?,
            position: phrase_matcher(&policy.position_keywords)?,
            authorized: policy
                .authorized_regions
                .iter()
                .map(|region| region.trim().to_lowercase())
                .filter(|region| !region.is_empty())
                .collect(),
            expected_positions: policy.position_keywords.clone(),
        })
    }

    fn first_disallowed(&self, text: &str) -> Option<String> {
        self.disallowed
            .as_ref()
            .and_then(|matcher| matcher.find(text))
            .map(|found| found.as_str().to_string())
    }

    fn is_authorized_for(&self, region: &str) -> bool {
        let region = words(region);
        self.authorized.iter().any(|allowed| {
            let allowed = words(allowed);
            contains_run(&region, &allowed) || contains_run(&allowed, &region)
        })
    }

    fn is_home(&self, place: &str) -> bool {
        matches(&self.home, place)
    }

    /// Home or disallowed region mention closest to the on-site phrase.
    fn region_near_onsite(&self, text: &str) -> Option<String> {
        let anchor = self.onsite.as_ref()?.find(text)?.start();
        [&self.home, &self.disallowed]
            .into_iter()
            .flatten()
            .flat_map(|matcher| matcher.find_iter(text))
            .min_by_key(|found| found.start().abs_diff(anchor))
            .map(|found| found.as_str().to_string())
    }
}

fn words(value: &str) -> Vec<String> {
    value
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether `needle` occurs in `haystack` as a contiguous run of whole words.
fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

fn phrase_matcher(values: &[String]) -> Result<Option<Regex>, regex::Error> {
    let alternatives: Vec<String> = values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return Ok(None);
    }

    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).map(Some)
}

fn matches(matcher: &Option<Regex>, text: &str) -> bool {
    matcher.as_ref().is_some_and(|matcher| matcher.is_match(text))
}

fn in_person_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:in[- ]person|must\s+(?:be\s+)?(?:located|based|reside|relocate|live)|required\s+to\s+(?:relocate|be\s+(?:located|based|on[- ]?site))|on[- ]?site\s+(?:presence|attendance)\s+(?:is\s+)?required|must\s+work\s+(?:on[- ]?site|from\s+(?:our|the)\s+office))\b",
        )
        .expect("in-person pattern is valid")
    })
}

fn authorization_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)\b(?:must|should|will\s+need\s+to|needs?\s+to|required\s+to)\s+(?:already\s+)?(?:be|have|hold|possess)\s+(?:legally\s+|currently\s+|fully\s+)?(?:authori[sz]ed|eligible|permitted|entitled|allowed)\s+to\s+work\s+in\s+(?:the\s+)?(?P<region>[a-z][a-z.]*(?:\s+[a-z][a-z.]*){0,4})",
            r"(?i)\b(?:must\s+(?:have|hold|possess)|requires?|required:?|mandatory:?)\s+(?:a\s+)?(?:valid\s+|current\s+|existing\s+)?(?:work\s+authori[sz]ation|work\s+permit|right\s+to\s+work|work\s+visa)\s+(?:in|for)\s+(?:the\s+)?(?P<region>[a-z][a-z.]*(?:\s+[a-z][a-z.]*){0,4})",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("authorization pattern is valid"))
        .collect()
    })
}

fn office_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"\b(?:[Aa]t|[Ii]n|[Ff]rom)\s+(?:[Oo]ur|[Tt]he|[Tt]heir)\s+(?P<place>\p{Lu}[\p{L}.]*(?:[ \t]+\p{Lu}[\p{L}.]*){0,3})[ \t]+(?:[Oo]ffices?|[Hh]eadquarters|HQ|[Cc]ampus|[Hh]ub|[Ss]tudio)\b",
            r"(?i:\b(?:offices?|on[- ]?site|in[- ]office|based|located|headquartered))\s+in\s+(?P<place>\p{Lu}[\p{L}.]*(?:,?[ \t]+\p{Lu}[\p{L}.]*){0,2})",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("office pattern is valid"))
        .collect()
    })
}

/// Where the role's office is: an explicit "at our X office" / "on-site in X"
/// phrase, else the known region mentioned closest to the on-site wording.
fn office_location(text: &str, matchers: &PolicyMatchers) -> Option<String> {
    office_patterns()
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|captures| captures.name("place"))
        .map(|place| {
            place
                .as_str()
                .trim_end_matches(|ch: char| matches!(ch, '.' | ','))
                .to_string()
        })
        .or_else(|| matchers.region_near_onsite(text))
}

const REGION_STOPWORDS: &[&str] = &[
    "without", "and", "or", "for", "at", "on", "by", "to", "with", "as", "prior", "before",
    "from", "is", "are", "in", "no", "any", "will", "who", "which",
];

const DEICTIC_REGIONS: &[&str] = &["this", "that", "our", "your", "the", "their"];

const QUESTION_LEADS: &[&str] = &[
    "are you", "do you", "will you", "would you", "can you", "have you", "is your", "does your",
];

/// Splits text into sentences, keeping each sentence's terminator. A period
/// only ends a sentence when followed by whitespace, so "U.S." stays whole.
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        let ends = match ch {
            '\n' => true,
            '.' | '!' | '?' => chars
                .peek()
                .map_or(true, |(_, next)| next.is_whitespace()),
            _ => false,
        };
        if ends {
            let end = index + ch.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                result.push(sentence);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        result.push(tail);
    }
    result
}

fn is_question(sentence: &str) -> bool {
    let trimmed = sentence.trim();
    if trimmed.ends_with('?') {
        return true;
    }
    let lower = trimmed.to_lowercase();
    QUESTION_LEADS.iter().any(|lead| lower.starts_with(lead))
}

fn clean_region(raw: &str) -> Option<String> {
    let words: Vec<&str> = raw
        .split_whitespace()
        .take_while(|word| !REGION_STOPWORDS.contains(&word.to_lowercase().as_str()))
        .take(4)
        .collect();
    let first = words.first()?;
    if DEICTIC_REGIONS.contains(&first.to_lowercase().as_str()) {
        return None;
    }
    let region = words
        .join(" ")
        .trim_end_matches(|ch: char| matches!(ch, '.' | ',' | ';' | ':'))
        .to_string();
    (!region.is_empty()).then_some(region)
}

/// Rejects full-time on-site roles outside the home region and roles that
/// demand in-person presence in a disallowed region.
pub(crate) fn location_rule(
    text: &str,
    matchers: &PolicyMatchers,
) -> Result<(), RejectionReason> {
    let full_time = matches(&matchers.full_time, text);
    let onsite = matches(&matchers.onsite, text);
    let remote = matches(&matchers.remote, text);

    if full_time && onsite && !remote && matchers.home.is_some() {
        if let Some(region) = office_location(text, matchers) {
            if !matchers.is_home(&region) {
                return Err(RejectionReason::OnsiteOutsideHomeRegion { region });
            }
        }
    }

    for sentence in sentences(text) {
        if in_person_pattern().is_match(sentence) {
            if let Some(region) = matchers.first_disallowed(sentence) {
                return Err(RejectionReason::InPersonRequired { region });
            }
        }
    }

    Ok(())
}

/// Rejects only asserted requirements to already hold authorization for a
/// region the applicant lacks. Questions about authorization are answerable
/// on the form and pass.
pub(crate) fn authorization_rule(
    text: &str,
    matchers: &PolicyMatchers,
) -> Result<(), RejectionReason> {
    for sentence in sentences(text) {
        if is_question(sentence) {
            continue;
        }

        for pattern in authorization_patterns() {
            let Some(captures) = pattern.captures(sentence) else {
                continue;
            };
            let Some(region) = captures
                .name("region")
                .and_then(|found| clean_region(found.as_str()))
            else {
                continue;
            };
            if !matchers.is_authorized_for(&region) {
                return Err(RejectionReason::AuthorizationRequired { region });
            }
        }
    }

    Ok(())
}

/// Accepts only text that names one of the sought position types.
pub(crate) fn position_rule(
    text: &str,
    matchers: &PolicyMatchers,
) -> Result<(), RejectionReason> {
    match &matchers.position {
        Some(matcher) if !matcher.is_match(text) => Err(RejectionReason::PositionTypeMismatch {
            expected: matchers.expected_positions.clone(),
        }),
        _ => Ok(()),
    }
}
