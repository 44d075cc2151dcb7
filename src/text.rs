//! String cleanup for scraped field values.

use regex::Regex;

use crate::patterns::{LABEL_PREFIX, NUMBER};

/// Trim newlines, spaces and tabs from both ends.
///
/// Other whitespace (notably NBSP, which the site uses as a separator) is
/// preserved.
#[must_use]
pub fn clean_string(s: &str) -> String {
    s.trim_matches(['\n', ' ', '\t']).to_string()
}

/// First capture group of `re` in `s`, or an empty string.
#[must_use]
pub fn submatch_or_empty(s: &str, re: &Regex) -> String {
    re.captures(s)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Value of a labelled field such as `"Instructor: Smith,J."`.
///
/// Returns an empty string when no label is present.
#[must_use]
pub fn remove_prefix(s: &str) -> String {
    submatch_or_empty(s, &LABEL_PREFIX)
}

/// The first `expected` integers in `s`, zero-padded to `expected` entries.
///
/// `"12 of 40 Enrolled"` with `expected = 2` gives `[12, 40]`.
#[must_use]
pub fn extract_numbers(s: &str, expected: usize) -> Vec<u32> {
    let mut values: Vec<u32> = NUMBER
        .find_iter(s)
        .take(expected)
        .map(|m| m.as_str().parse().unwrap_or(0))
        .collect();
    values.resize(expected, 0);
    values
}
