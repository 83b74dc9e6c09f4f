/// Lower-cases and drops whitespace, hyphen and underscore separators so
/// `first_name`, `First Name` and `firstName` compare equal.
pub fn normalize_signal(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '-' | '_' | '\u{feff}' | '\u{200b}'))
        .flat_map(char::to_lowercase)
        .collect()
}
