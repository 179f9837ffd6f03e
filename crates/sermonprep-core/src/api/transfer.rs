//! Text export/import and JSON backup methods on SermonLibrary.

use std::path::{Path, PathBuf};

use crate::config::PathsConfig;
use crate::error::{Result, SermonError};
use crate::schema::{Field, Record};
use crate::transfer::{export_backup, export_text, import_backup, import_text, write_bytes};
use crate::SermonLibrary;
use tracing::{info, warn};

impl SermonLibrary {
    // ========================================
    // Text Export / Import
    // ========================================

    /// Render a record as labelled plain text.
    pub async fn export_record_text(&self, id: i64) -> Result<String> {
        let record = self.get_record(id).await?;
        Ok(export_text(&record))
    }

    /// Write a record's text export into the exports directory.
    ///
    /// Returns the path written.
    pub async fn export_record_to_file(&self, id: i64) -> Result<PathBuf> {
        let record = self.get_record(id).await?;
        let path = self.exports_dir().join(export_file_name(&record));
        let text = export_text(&record);
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_bytes(&target, text.as_bytes()))
            .await
            .map_err(|e| SermonError::Other(format!("Export task failed: {}", e)))??;
        info!("Exported record {} to {}", id, path.display());
        Ok(path)
    }

    /// Parse labelled text into a new record.
    pub async fn import_record_text(&self, text: &str) -> Result<Record> {
        let draft = import_text(text)?;
        let record = self.insert_record(&draft).await?;
        info!("Imported record {} from text", record.id());
        Ok(record)
    }

    // ========================================
    // Backup / Restore
    // ========================================

    /// Write every record to a JSON backup file.
    ///
    /// Defaults to `exports/backup-<timestamp>.json`. Returns the path and
    /// the number of records written.
    pub async fn backup(&self, path: Option<PathBuf>) -> Result<(PathBuf, usize)> {
        let path = path.unwrap_or_else(|| {
            let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
            self.exports_dir().join(format!(
                "backup-{}.{}",
                stamp,
                PathsConfig::BACKUP_EXTENSION
            ))
        });
        let target = path.clone();
        let count = self
            .with_store(move |store| export_backup(&store.fetch_all()?, &target))
            .await?;
        Ok((path, count))
    }

    /// Load a backup file, adding its records as new records.
    ///
    /// Identifiers in the file are not reused. Returns the number inserted.
    pub async fn restore(&self, path: &Path) -> Result<usize> {
        let source = path.to_path_buf();
        self.with_store(move |store| {
            let drafts = import_backup(&source)?;
            let mut inserted = 0;
            for draft in &drafts {
                match store.insert(draft) {
                    Ok(_) => inserted += 1,
                    Err(e @ SermonError::Validation { .. }) => {
                        warn!("Skipping backup entry: {}", e);
                    }
                    Err(e) => return Err(e),
                }
            }
            info!(
                "Restored {} of {} records from {}",
                inserted,
                drafts.len(),
                source.display()
            );
            Ok(inserted)
        })
        .await
    }
}

/// `<id>-<title-slug>.txt`, or `<id>.txt` for untitled records.
fn export_file_name(record: &Record) -> String {
    let slug: String = record
        .get(Field::SermonTitle)
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        format!("{}.{}", record.id(), PathsConfig::TEXT_EXPORT_EXTENSION)
    } else {
        format!(
            "{}-{}.{}",
            record.id(),
            slug,
            PathsConfig::TEXT_EXPORT_EXTENSION
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RecordDraft;
    use tempfile::TempDir;

    async fn create_test_library() -> (SermonLibrary, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let library = SermonLibrary::builder(temp_dir.path())
            .auto_create_dirs(true)
            .build()
            .await
            .unwrap();
        (library, temp_dir)
    }

    #[test]
    fn test_export_file_name() {
        let record = Record::new(4).with(Field::SermonTitle, "He Is Risen!  (Easter)");
        assert_eq!(export_file_name(&record), "4-he-is-risen-easter.txt");
        assert_eq!(export_file_name(&Record::new(9)), "9.txt");
    }

    #[tokio::test]
    async fn test_export_to_file() {
        let (library, _temp) = create_test_library().await;
        let record = library
            .insert_record(&RecordDraft::new().with(Field::SermonTitle, "Grace"))
            .await
            .unwrap();

        let path = library.export_record_to_file(record.id()).await.unwrap();
        assert!(path.starts_with(library.exports_dir()));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Sermon Title:\nGrace\n");
    }

    #[tokio::test]
    async fn test_text_round_trip_creates_new_record() {
        let (library, _temp) = create_test_library().await;
        let original = library
            .insert_record(
                &RecordDraft::new()
                    .with(Field::Pericope, "John 20:1-18")
                    .with(Field::Manuscript, "He is risen."),
            )
            .await
            .unwrap();

        let text = library.export_record_text(original.id()).await.unwrap();
        let imported = library.import_record_text(&text).await.unwrap();

        assert_ne!(imported.id(), original.id());
        assert_eq!(imported.content(), original.content());
    }

    #[tokio::test]
    async fn test_backup_and_restore() {
        let (library, temp) = create_test_library().await;
        for title in ["One", "Two"] {
            library
                .insert_record(&RecordDraft::new().with(Field::SermonTitle, title))
                .await
                .unwrap();
        }

        let (path, count) = library.backup(None).await.unwrap();
        assert_eq!(count, 2);
        assert!(path.exists());

        let other_root = temp.path().join("other");
        let other = SermonLibrary::builder(&other_root)
            .auto_create_dirs(true)
            .build()
            .await
            .unwrap();
        assert_eq!(other.restore(&path).await.unwrap(), 2);
        let titles: Vec<String> = other
            .list_records()
            .await
            .unwrap()
            .iter()
            .map(|r| r.get(Field::SermonTitle).to_string())
            .collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn test_restore_skips_invalid_entries() {
        let (library, temp) = create_test_library().await;
        let path = temp.path().join("mixed.json");
        std::fs::write(
            &path,
            r#"{
                "formatVersion": 1,
                "app": "Sermonprep",
                "exportedAt": "2024-01-01T00:00:00Z",
                "records": [
                    {"id": 1, "sermon_title": "Good"},
                    {"id": 2, "sermon_title": "Bad", "sermon_date": "05-04-20"},
                    {"id": 3, "sermon_title": "Also Good", "sermon_date": "12/25/2023"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(library.restore(&path).await.unwrap(), 2);
        let records = library.list_records().await.unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.get(Field::SermonTitle)).collect();
        assert_eq!(titles, vec!["Good", "Also Good"]);
        assert_eq!(records[1].get(Field::SermonDate), "2023-12-25");
    }

    #[tokio::test]
    async fn test_restore_missing_file() {
        let (library, temp) = create_test_library().await;
        let result = library.restore(&temp.path().join("none.json")).await;
        assert!(matches!(result, Err(SermonError::ImportFailed { .. })));
    }
}
