use super::domain::ChoiceOption;

const PLACEHOLDER_PREFIXES: &[&str] = &["select", "choose", "please select", "--", "pick"];

fn is_placeholder(option: &ChoiceOption) -> bool {
    let label = option.label.trim().to_lowercase();
    let value = option.value.trim();
    if label.is_empty() && value.is_empty() {
        return true;
    }
    value.is_empty()
        && PLACEHOLDER_PREFIXES
            .iter()
            .any(|prefix| label.starts_with(prefix))
}

fn texts(option: &ChoiceOption) -> impl Iterator<Item = String> + '_ {
    [option.label.as_str(), option.value.as_str()]
        .into_iter()
        .map(|text| text.trim().to_lowercase())
        .filter(|text| !text.is_empty())
}

pub(super) fn tokens(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub(super) fn contains_tokens(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

/// Short or numeric option texts ("1", "No") are too weak to be found inside
/// a longer answer.
fn can_be_contained(text: &str) -> bool {
    text.chars().count() >= 3 && !text.chars().all(|ch| ch.is_ascii_digit())
}

/// Finds the option for one target value. An exact case-insensitive match on
/// label or value wins; otherwise the first option whose label or value
/// contains the target's words, or whose words appear in the target.
pub fn match_option<'a>(options: &'a [ChoiceOption], target: &str) -> Option<&'a ChoiceOption> {
    let target = target.trim().to_lowercase();
    if target.is_empty() {
        return None;
    }
    let target_tokens = tokens(&target);
    let candidates = || options.iter().filter(|option| !is_placeholder(option));

    candidates()
        .find(|option| texts(option).any(|text| text == target))
        .or_else(|| {
            candidates().find(|option| {
                texts(option).any(|text| {
                    let option_tokens = tokens(&text);
                    contains_tokens(&option_tokens, &target_tokens)
                        || (can_be_contained(&text)
                            && contains_tokens(&target_tokens, &option_tokens))
                })
            })
        })
}

/// Walks an ordered chain of candidate answers and returns the first option
/// any of them matches, together with the answer that matched.
pub fn match_first<'a, 'b, I>(
    options: &'a [ChoiceOption],
    chain: I,
) -> Option<(&'a ChoiceOption, &'b str)>
where
    I: IntoIterator<Item = &'b str>,
{
    chain
        .into_iter()
        .find_map(|answer| match_option(options, answer).map(|option| (option, answer)))
}
