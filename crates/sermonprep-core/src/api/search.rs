//! Search methods on SermonLibrary.
//!
//! The ranking itself is synchronous. It runs on the blocking pool over an
//! owned snapshot from the store, so writers are never held up and the
//! snapshot cannot change mid-scan.

use crate::error::Result;
use crate::presenter::{present, ResultRow};
use crate::search::{search, SearchResult};
use crate::SermonLibrary;
use std::time::Instant;
use tracing::debug;

impl SermonLibrary {
    /// Ranked search rendered as display rows.
    pub async fn search(&self, query: &str) -> Result<Vec<ResultRow>> {
        let presenter = self.presenter.clone();
        self.run_search(query, move |results| present(&results, &presenter))
            .await
    }

    /// Ranked search returning full records.
    pub async fn search_results(&self, query: &str) -> Result<Vec<SearchResult<'static>>> {
        self.run_search(query, |results| {
            results.into_iter().map(SearchResult::into_owned).collect()
        })
        .await
    }

    async fn run_search<T, F>(&self, query: &str, finish: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Vec<SearchResult<'_>>) -> T + Send + 'static,
    {
        let query = query.to_string();

        self.with_store(move |store| {
            let start = Instant::now();
            let snapshot = store.fetch_all()?;
            let results = search(&query, &snapshot);
            debug!(
                "Search {:?} matched {} of {} records in {:.2}ms",
                query,
                results.len(),
                snapshot.len(),
                start.elapsed().as_secs_f64() * 1000.0
            );
            Ok(finish(results))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::{Field, RecordDraft};
    use crate::search::SearchTier;
    use crate::SermonLibrary;
    use tempfile::TempDir;

    async fn library_with(manuscripts: &[&str]) -> (SermonLibrary, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let library = SermonLibrary::builder(temp_dir.path())
            .in_memory(true)
            .build()
            .await
            .unwrap();
        for text in manuscripts {
            library
                .insert_record(&RecordDraft::new().with(Field::Manuscript, *text))
                .await
                .unwrap();
        }
        (library, temp_dir)
    }

    #[tokio::test]
    async fn test_search_rows() {
        let (library, _temp) =
            library_with(&["faith hope love", "Jonah and the fish", "faith love"]).await;

        let rows = library.search("faith love").await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(rows[0].tier, SearchTier::FullText);
        assert_eq!(rows[1].match_count, 2);
    }

    #[tokio::test]
    async fn test_search_results_are_owned() {
        let (library, _temp) = library_with(&["grace and the empty tomb of sin"]).await;

        let results = library.search_results("\"empty tomb\"").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].tier, SearchTier::FullText);
        assert_eq!(
            results[0].record.get(Field::Manuscript),
            "grace and the empty tomb of sin"
        );
    }

    #[tokio::test]
    async fn test_empty_query_no_rows() {
        let (library, _temp) = library_with(&["anything"]).await;
        assert!(library.search("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_does_not_modify_store() {
        let (library, _temp) = library_with(&["grace", "mercy"]).await;

        let before = library.list_records().await.unwrap();
        library.search("grace mercy").await.unwrap();
        assert_eq!(library.list_records().await.unwrap(), before);
    }
}
