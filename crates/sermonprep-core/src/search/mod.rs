//! Free-text search over sermon records.
//!
//! Ranking is two-tier: records containing the whole query verbatim rank
//! above records that only contain some of its terms. The engine is a pure
//! function over an in-memory snapshot and never touches the store.
//!
//! ## Submodules
//! - **`engine`**: tiered ranking of a record snapshot.
//! - **`terms`**: phrase/word extraction and case-insensitive counting.

mod engine;
mod terms;

pub use engine::{record_occurrences, search, SearchResult, SearchTier};
pub use terms::{count_occurrences, extract_terms, full_text_needle};
