//! Query term extraction and substring counting.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// A balanced pair of double quotes and everything between them.
static QUOTED_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("quoted phrase regex must compile"));

/// Split a raw query into search terms.
///
/// Double-quoted phrases become single terms; the rest of the query is split
/// on whitespace. Terms are trimmed, empties dropped, and repeats (ignoring
/// case) collapsed onto their first occurrence. An unmatched quote stays part
/// of the word it is attached to.
///
/// - `"empty tomb" grace` → `["empty tomb", "grace"]`
/// - `"empty tomb` → `["\"empty", "tomb"]`
pub fn extract_terms(query: &str) -> Vec<String> {
    let mut candidates: Vec<&str> = QUOTED_PHRASE
        .captures_iter(query)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect();

    let remainder = QUOTED_PHRASE.replace_all(query, " ");
    candidates.extend(remainder.split_whitespace());

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .filter(|term| seen.insert(term.to_lowercase()))
        .map(String::from)
        .collect()
}

/// The whole query as one literal: trimmed, with quote characters removed.
pub fn full_text_needle(query: &str) -> String {
    query.trim().replace('"', "").trim().to_string()
}

/// Case-insensitive count of non-overlapping occurrences of `needle`.
///
/// An empty needle never matches.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    count_lowered(&haystack.to_lowercase(), &needle.to_lowercase())
}

/// [`count_occurrences`] for inputs that are already lowercase.
pub(crate) fn count_lowered(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
