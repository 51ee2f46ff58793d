//! Recipient name helpers

/// Derives a display first name from a full name or an email address.
///
/// For email addresses the local part is used, cut at the first `.`, so
/// `jane.doe@example.com` becomes `Jane`. Anything else is treated as a full
/// name and its first whitespace-delimited word is used.
///
/// The rest of the word is lowercased, so `McDonald` becomes `Mcdonald`.
pub fn extract_first_name(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let first = match raw.split_once('@') {
        Some((username, _)) => username.split('.').next().unwrap_or_default(),
        None => raw.split_whitespace().next().unwrap_or_default(),
    };

    capitalize(first)
}

/// First character uppercased, the rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
