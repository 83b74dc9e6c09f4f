use regex::Regex;
use std::sync::OnceLock;

use super::rules::PolicyMatchers;
use super::verdict::ExtractedAttributes;

const LEADING_NOISE: &[&str] = &[
    "At", "We", "The", "Our", "This", "You", "It", "They", "About", "Join", "Here", "Why", "Who",
    "What", "Apply", "Location",
];

const ROLE_SUFFIXES: &[&str] = &[
    "Intern",
    "Internship",
    "Engineer",
    "Developer",
    "Analyst",
    "Scientist",
    "Designer",
    "Manager",
    "Associate",
];

const MAX_LOCATION_LEN: usize = 80;

pub(crate) fn extract_attributes(text: &str, matchers: &PolicyMatchers) -> ExtractedAttributes {
    ExtractedAttributes {
        employer: extract_employer(text),
        location: extract_location(text, matchers),
        role: extract_role(text),
    }
}

fn employer_statement_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"\b([A-Z][A-Za-z0-9&\-]*(?:[ \t]+[A-Z][A-Za-z0-9&\-]*){0,3})[ \t]+(?:is|are|was|builds|provides|offers|helps|develops|creates|powers|enables|makes|designs)\b",
        )
        .expect("employer statement pattern is valid")
    })
}

fn employer_fallback_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b(?:at|join|Join|About)[ \t]+([A-Z][A-Za-z0-9&\-]*(?:[ \t]+[A-Z][A-Za-z0-9&\-]*){0,2})")
            .expect("employer fallback pattern is valid")
    })
}

fn labelled_location_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\blocations?\s*[:\-]\s*([^\n|;]+)")
            .expect("labelled location pattern is valid")
    })
}

fn based_in_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b(?:based|located)\s+in\s+([A-Z][A-Za-z]+(?:,?\s+[A-Z][A-Za-z]+){0,2})")
            .expect("based-in pattern is valid")
    })
}

fn role_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let suffixes = ROLE_SUFFIXES.join("|");
        Regex::new(&format!(
            r"\b((?:[A-Z][A-Za-z+#/&\-]*[ \t]+){{0,4}}(?:{suffixes}))\b"
        ))
        .expect("role pattern is valid")
    })
}

fn strip_leading_noise(phrase: &str) -> Option<String> {
    let words: Vec<&str> = phrase
        .split_whitespace()
        .skip_while(|word| LEADING_NOISE.contains(word))
        .collect();
    let cleaned = words
        .join(" ")
        .trim_end_matches(|ch: char| matches!(ch, '.' | ',' | '-'))
        .to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}

fn looks_like_role(phrase: &str) -> bool {
    phrase
        .split_whitespace()
        .any(|word| ROLE_SUFFIXES.contains(&word))
}

fn extract_employer(text: &str) -> Option<String> {
    let candidate = |captures: regex::Captures<'_>| {
        captures
            .get(1)
            .and_then(|found| strip_leading_noise(found.as_str()))
            .filter(|phrase| !looks_like_role(phrase))
    };

    employer_statement_pattern()
        .captures_iter(text)
        .find_map(candidate)
        .or_else(|| employer_fallback_pattern().captures_iter(text).find_map(candidate))
}

fn extract_location(text: &str, matchers: &PolicyMatchers) -> Option<String> {
    if let Some(captures) = labelled_location_pattern().captures(text) {
        let value = captures
            .get(1)
            .map(|found| found.as_str().trim())
            .unwrap_or_default();
        if !value.is_empty() {
            return Some(value.chars().take(MAX_LOCATION_LEN).collect::<String>().trim().to_string());
        }
    }

    if let Some(captures) = based_in_pattern().captures(text) {
        if let Some(found) = captures.get(1) {
            return Some(found.as_str().to_string());
        }
    }

    [&matchers.home, &matchers.disallowed]
        .into_iter()
        .flatten()
        .filter_map(|matcher| matcher.find(text))
        .min_by_key(|found| found.start())
        .map(|found| found.as_str().to_string())
}

fn extract_role(text: &str) -> Option<String> {
    role_pattern()
        .captures_iter(text)
        .find_map(|captures| captures.get(1).and_then(|found| strip_leading_noise(found.as_str())))
}
