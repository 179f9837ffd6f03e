//! Two-tier ranked keyword search over a record snapshot.

use crate::schema::Record;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::terms::{count_lowered, extract_terms, full_text_needle};

/// Which ranking tier produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchTier {
    /// The whole query occurs verbatim in the record.
    FullText,
    /// One or more individual terms occur in the record.
    Terms,
}

/// One ranked match.
///
/// For [`SearchTier::FullText`] `matched_terms` holds the full query and
/// `match_count` its occurrence count. For [`SearchTier::Terms`] it holds the
/// terms that matched and `match_count` is how many distinct terms that is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult<'a> {
    pub record: Cow<'a, Record>,
    pub tier: SearchTier,
    pub matched_terms: Vec<String>,
    pub match_count: usize,
}

impl SearchResult<'_> {
    pub fn record_id(&self) -> i64 {
        self.record.id()
    }

    /// Detach from the snapshot the result was computed over.
    pub fn into_owned(self) -> SearchResult<'static> {
        SearchResult {
            record: Cow::Owned(self.record.into_owned()),
            tier: self.tier,
            matched_terms: self.matched_terms,
            match_count: self.match_count,
        }
    }
}

/// Lowercased field text of one record, computed once per search.
struct LoweredRecord<'a> {
    record: &'a Record,
    fields: Vec<String>,
}

impl<'a> LoweredRecord<'a> {
    fn new(record: &'a Record) -> Self {
        Self {
            record,
            fields: record.fields().map(|(_, v)| v.to_lowercase()).collect(),
        }
    }

    fn occurrences(&self, lowered_needle: &str) -> usize {
        self.fields
            .iter()
            .map(|f| count_lowered(f, lowered_needle))
            .sum()
    }
}

/// Sum of case-insensitive occurrences of `needle` across a record's content fields.
pub fn record_occurrences(record: &Record, needle: &str) -> usize {
    LoweredRecord::new(record).occurrences(&needle.to_lowercase())
}

/// Rank `records` against a free-text query.
///
/// Records containing the whole query come first, by descending occurrence
/// count. The remaining records that contain at least one term follow, by
/// descending number of distinct matched terms. Ties keep the input order and
/// each record appears at most once. An empty query yields no results.
pub fn search<'a>(query: &str, records: &'a [Record]) -> Vec<SearchResult<'a>> {
    let needle = full_text_needle(query);
    let terms = extract_terms(query);
    if needle.is_empty() && terms.is_empty() {
        return Vec::new();
    }

    let lowered_needle = needle.to_lowercase();
    let lowered_terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();

    let mut full_text = Vec::new();
    let mut by_term = Vec::new();

    for record in records {
        let lowered = LoweredRecord::new(record);

        let full_count = lowered.occurrences(&lowered_needle);
        if full_count > 0 {
            full_text.push(SearchResult {
                record: Cow::Borrowed(lowered.record),
                tier: SearchTier::FullText,
                matched_terms: vec![needle.clone()],
                match_count: full_count,
            });
            continue;
        }

        let matched: Vec<String> = terms
            .iter()
            .zip(&lowered_terms)
            .filter(|(_, lowered_term)| lowered.occurrences(lowered_term) > 0)
            .map(|(term, _)| term.clone())
            .collect();

        if !matched.is_empty() {
            by_term.push(SearchResult {
                record: Cow::Borrowed(lowered.record),
                tier: SearchTier::Terms,
                match_count: matched.len(),
                matched_terms: matched,
            });
        }
    }

    // Stable sorts: equal counts keep scan order.
    full_text.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    by_term.sort_by(|a, b| b.match_count.cmp(&a.match_count));

    full_text.extend(by_term);
    full_text
}
