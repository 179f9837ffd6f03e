//! Display rows for ranked search results.
//!
//! Front ends show one row per result: identifier, match count, matched
//! terms, three short display fields, and a prefix of one long text field.

use crate::config::SearchConfig;
use crate::schema::Field;
use crate::search::{SearchResult, SearchTier};
use serde::{Deserialize, Serialize};

/// Which fields a result row shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenterConfig {
    pub display_fields: [Field; 3],
    pub snippet_field: Field,
    pub snippet_len: usize,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            display_fields: [Field::SermonTitle, Field::SermonReference, Field::SermonDate],
            snippet_field: Field::Manuscript,
            snippet_len: SearchConfig::SNIPPET_LEN,
        }
    }
}

/// One rendered search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub id: i64,
    pub match_count: usize,
    pub matched: String,
    pub tier: SearchTier,
    pub display: [String; 3],
    pub snippet: String,
}

/// Render results in order.
pub fn present(results: &[SearchResult<'_>], config: &PresenterConfig) -> Vec<ResultRow> {
    results.iter().map(|r| present_one(r, config)).collect()
}

fn present_one(result: &SearchResult<'_>, config: &PresenterConfig) -> ResultRow {
    let record = &result.record;
    ResultRow {
        id: record.id(),
        match_count: result.match_count,
        matched: result.matched_terms.join(SearchConfig::TERM_SEPARATOR),
        tier: result.tier,
        display: config
            .display_fields
            .map(|field| single_line(record.get(field))),
        snippet: snippet(record.get(config.snippet_field), config.snippet_len),
    }
}

/// Map a selected row index back to its record identifier.
pub fn record_id_at(rows: &[ResultRow], index: usize) -> Option<i64> {
    rows.get(index).map(|row| row.id)
}

/// First `max_chars` characters of `text` on one line, with an ellipsis if cut.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let flat = single_line(text);
    match flat.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", flat[..cut].trim_end(), SearchConfig::SNIPPET_ELLIPSIS),
        None => flat,
    }
}

/// Collapse runs of whitespace, including newlines, into single spaces.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
