//! Integration tests for the SermonLibrary public interface.
//!
//! These tests drive the library the way a front end does: open a root,
//! edit records, search, export and reopen.

use sermonprep_core::{Field, RecordDraft, SearchTier, SermonError, SermonLibrary};
use tempfile::TempDir;

/// Create a library root with the expected directory layout.
async fn create_test_library() -> (SermonLibrary, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let library = SermonLibrary::builder(temp_dir.path())
        .auto_create_dirs(true)
        .build()
        .await
        .expect("Failed to open library");
    (library, temp_dir)
}

async fn insert(library: &SermonLibrary, title: &str, manuscript: &str) -> i64 {
    let draft = RecordDraft::new()
        .with(Field::SermonTitle, title)
        .with(Field::Manuscript, manuscript);
    library.insert_record(&draft).await.unwrap().id()
}

#[tokio::test]
async fn test_open_fails_for_nonexistent_root() {
    let result = SermonLibrary::open("/nonexistent/path/that/does/not/exist").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_library_paths() {
    let (library, temp_dir) = create_test_library().await;

    assert_eq!(library.root(), temp_dir.path());
    assert!(library.data_dir().ends_with("data"));
    assert!(library.exports_dir().ends_with("exports"));
    assert!(library.db_path().unwrap().starts_with(library.data_dir()));
}

#[tokio::test]
async fn test_records_persist_across_reopen() {
    let temp_dir = TempDir::new().unwrap();

    let id = {
        let library = SermonLibrary::builder(temp_dir.path())
            .auto_create_dirs(true)
            .build()
            .await
            .unwrap();
        let mut record = library.create_record().await.unwrap();
        record.set(Field::SermonTitle, "Easter Sermon");
        record.set(Field::SermonDate, "4/9/2023");
        library.save_record(&record).await.unwrap();
        library.shutdown().await.unwrap();
        record.id()
    };

    let library = SermonLibrary::open(temp_dir.path()).await.unwrap();
    let record = library.get_record(id).await.unwrap();
    assert_eq!(record.get(Field::SermonTitle), "Easter Sermon");
    assert_eq!(record.get(Field::SermonDate), "2023-04-09");
    assert_eq!(library.active_record_id().await, None);
}

#[tokio::test]
async fn test_identifiers_not_reused() {
    let (library, _temp) = create_test_library().await;

    let first = insert(&library, "One", "").await;
    assert!(library.delete_record(first).await.unwrap());
    let second = insert(&library, "Two", "").await;
    assert!(second > first);
}

#[tokio::test]
async fn test_save_rejects_ambiguous_date() {
    let (library, _temp) = create_test_library().await;

    let mut record = library.create_record().await.unwrap();
    record.set(Field::SermonDate, "03/04/05");
    let result = library.save_record(&record).await;
    assert!(matches!(result, Err(SermonError::Validation { .. })));
}

#[tokio::test]
async fn test_full_text_phrase_search() {
    let (library, _temp) = create_test_library().await;

    insert(&library, "Easter Sermon", "the tomb was empty that morning").await;
    let grace = insert(&library, "Grace Talk", "grace and the empty tomb of sin").await;

    let results = library.search_results("\"empty tomb\"").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record_id(), grace);
    assert_eq!(results[0].tier, SearchTier::FullText);
}

#[tokio::test]
async fn test_no_match_returns_nothing() {
    let (library, _temp) = create_test_library().await;

    insert(&library, "", "Jonah and the fish").await;
    assert!(library.search("whale").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_term_tier_ignores_adjacency() {
    let (library, _temp) = create_test_library().await;

    let id = insert(&library, "", "faith hope love").await;
    let results = library.search_results("faith love").await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record_id(), id);
    assert_eq!(results[0].tier, SearchTier::Terms);
    assert_eq!(results[0].match_count, 2);
    assert_eq!(results[0].matched_terms, vec!["faith", "love"]);
}

#[tokio::test]
async fn test_empty_query() {
    let (library, _temp) = create_test_library().await;

    insert(&library, "Anything", "at all").await;
    assert!(library.search("").await.unwrap().is_empty());
    assert!(library.search("   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_full_text_before_terms() {
    let (library, _temp) = create_test_library().await;

    let terms_only = insert(&library, "", "love is patient, faith endures").await;
    let full = insert(&library, "", "faith love").await;

    let rows = library.search("faith love").await.unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![full, terms_only]);
    assert_eq!(rows[0].tier, SearchTier::FullText);
    assert_eq!(rows[1].tier, SearchTier::Terms);
}

#[tokio::test]
async fn test_search_rows_display_fields() {
    let (library, _temp) = create_test_library().await;

    let draft = RecordDraft::new()
        .with(Field::SermonTitle, "Grace Talk")
        .with(Field::SermonReference, "Eph 2:8-9")
        .with(Field::SermonDate, "2024-01-07")
        .with(Field::Manuscript, "By grace you have been saved.");
    library.insert_record(&draft).await.unwrap();

    let rows = library.search("grace").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].display,
        [
            "Grace Talk".to_string(),
            "Eph 2:8-9".to_string(),
            "2024-01-07".to_string()
        ]
    );
    assert_eq!(rows[0].snippet, "By grace you have been saved.");
}

#[tokio::test]
async fn test_backup_restore_between_libraries() {
    let (source, _source_temp) = create_test_library().await;
    insert(&source, "Advent 1", "Keep awake").await;
    insert(&source, "Advent 2", "Prepare the way").await;

    let (path, count) = source.backup(None).await.unwrap();
    assert_eq!(count, 2);

    let (target, _target_temp) = create_test_library().await;
    insert(&target, "Existing", "").await;
    assert_eq!(target.restore(&path).await.unwrap(), 2);
    assert_eq!(target.record_count().await.unwrap(), 3);

    let rows = target.search("advent").await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_import_plain_text_as_manuscript() {
    let (library, _temp) = create_test_library().await;

    let record = library
        .import_record_text("In the beginning was the Word.\n")
        .await
        .unwrap();
    assert_eq!(
        record.get(Field::Manuscript),
        "In the beginning was the Word."
    );

    let result = library.import_record_text("\n\n").await;
    assert!(matches!(result, Err(SermonError::ImportFailed { .. })));
}
