use regex::Regex;
use std::sync::OnceLock;

use super::verdict::ExtractedAttributes;

/// Recurring motifs in job descriptions that the narrative answer echoes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Scale,
    Impact,
    Mentorship,
    Innovation,
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::Scale,
        Theme::Impact,
        Theme::Mentorship,
        Theme::Innovation,
    ];

    fn cues(self) -> &'static [&'static str] {
        match self {
            Theme::Scale => &["scale", "millions", "billions", "global", "high-throughput"],
            Theme::Impact => &["impact", "mission", "users", "customers", "change the way"],
            Theme::Mentorship => &["mentor", "learn", "growth", "coaching", "pair"],
            Theme::Innovation => &[
                "innovat",
                "cutting-edge",
                "cutting edge",
                "research",
                "state-of-the-art",
                "ai",
                "machine learning",
            ],
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Theme::Scale => "the chance to work on systems that operate at real scale",
            Theme::Impact => "the meaningful impact the team has on the people it serves",
            Theme::Mentorship => "the emphasis on mentorship and learning",
            Theme::Innovation => "the focus on innovation and building new technology",
        }
    }
}

/// Cues match at the start of a word so stems like "innovat" cover
/// "innovation"; cues of three letters or fewer must be the whole word.
fn theme_patterns() -> &'static [(Theme, Regex)] {
    static PATTERNS: OnceLock<Vec<(Theme, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        Theme::ALL
            .into_iter()
            .map(|theme| {
                let alternatives: Vec<String> = theme
                    .cues()
                    .iter()
                    .map(|cue| {
                        let escaped = regex::escape(cue);
                        if cue.len() <= 3 {
                            format!(r"{escaped}\b")
                        } else {
                            escaped
                        }
                    })
                    .collect();
                let pattern = format!(r"(?i)\b(?:{})", alternatives.join("|"));
                (theme, Regex::new(&pattern).expect("theme pattern is valid"))
            })
            .collect()
    })
}

/// Themes whose cues appear in the text, in fixed theme order.
pub fn detect_themes(text: &str) -> Vec<Theme> {
    theme_patterns()
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(theme, _)| *theme)
        .collect()
}

fn indefinite_article(word: &str) -> &'static str {
    match word.chars().next().map(|ch| ch.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

fn join_phrases(phrases: &[&str]) -> String {
    match phrases {
        [] => String::new(),
        [only] => only.to_string(),
        [rest @ .., last] => format!("{} and {last}", rest.join(", ")),
    }
}

/// Short first-person answer to "why this company" built from the page's
/// themes and extracted attributes. Falls back to a generic paragraph when no
/// theme is detected.
pub fn compose_narrative(text: &str, attributes: &ExtractedAttributes) -> String {
    let employer = attributes.employer.as_deref().unwrap_or("your team");
    let role_clause = attributes
        .role
        .as_deref()
        .map(|role| format!(" as {} {role}", indefinite_article(role)))
        .unwrap_or_default();
    let opening = format!("I am excited about the opportunity to join {employer}{role_clause}.");

    let themes = detect_themes(text);
    if themes.is_empty() {
        return format!(
            "{opening} I admire the work the team is doing and the problems it is solving. \
             I am eager to learn quickly, contribute from day one and grow in an environment \
             that values ownership and curiosity."
        );
    }

    let phrases: Vec<&str> = themes.iter().map(|theme| theme.phrase()).collect();
    format!(
        "{opening} What draws me most is {}. I want to contribute to that work while growing \
         as an engineer, and I believe my background and eagerness to learn would let me add \
         value quickly.",
        join_phrases(&phrases)
    )
}
