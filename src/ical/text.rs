//! Conversion of iCal `TEXT` values (RFC5545, section 3.3.11)

use ics::escape_text;

/// Escape a string so that it can be used as an iCal `TEXT` value
pub fn escape(value: &str) -> String {
    escape_text(value).into_owned()
}

/// Revert [`escape`]
pub fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => result.push('\n'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}

/// Build a comma-separated list of `TEXT` values (e.g. for `CATEGORIES`)
pub fn join_list<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter()
        .map(|v| escape(v.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Split a comma-separated list of `TEXT` values. Escaped commas are part of the values.
/// Values are kept as they are, including empty ones and surrounding spaces. An empty list gives no value.
pub fn split_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            },
            ',' => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    items.push(current);

    items.iter()
        .map(|item| unescape(item))
        .collect()
}
