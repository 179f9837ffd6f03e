//! Whole-store JSON backup and restore.

use crate::config::AppConfig;
use crate::error::{Result, SermonError};
use crate::schema::{Record, RecordDraft};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use super::atomic::{read_json, write_json};

/// On-disk backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFile {
    pub format_version: u32,
    pub app: String,
    pub exported_at: String,
    pub records: Vec<Record>,
}

impl BackupFile {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            format_version: AppConfig::BACKUP_FORMAT_VERSION,
            app: AppConfig::APP_NAME.to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            records,
        }
    }
}

/// Write every record to `path`. Returns the number written.
pub fn export_backup(records: &[Record], path: &Path) -> Result<usize> {
    let backup = BackupFile::new(records.to_vec());
    write_json(path, &backup, true)?;
    info!("Backed up {} records to {}", records.len(), path.display());
    Ok(records.len())
}

/// Read a backup. Identifiers are dropped; the store assigns new ones on insert.
pub fn import_backup(path: &Path) -> Result<Vec<RecordDraft>> {
    let backup: BackupFile = read_json(path)?.ok_or_else(|| SermonError::ImportFailed {
        message: format!("Backup file not found: {}", path.display()),
    })?;

    if backup.format_version > AppConfig::BACKUP_FORMAT_VERSION {
        return Err(SermonError::ImportFailed {
            message: format!(
                "Backup format version {} is newer than supported version {}",
                backup.format_version,
                AppConfig::BACKUP_FORMAT_VERSION
            ),
        });
    }

    Ok(backup
        .records
        .into_iter()
        .map(Record::into_draft)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;
    use tempfile::TempDir;

    #[test]
    fn test_backup_and_restore() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("backup.json");

        let records = vec![
            Record::new(3).with(Field::SermonTitle, "Easter Sermon"),
            Record::new(8).with(Field::Manuscript, "grace alone"),
        ];
        assert_eq!(export_backup(&records, &path).unwrap(), 2);

        let drafts = import_backup(&path).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].get(Field::SermonTitle), "Easter Sermon");
        assert_eq!(drafts[1].get(Field::Manuscript), "grace alone");
    }

    #[test]
    fn test_missing_backup() {
        let temp_dir = TempDir::new().unwrap();
        let result = import_backup(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(SermonError::ImportFailed { .. })));
    }

    #[test]
    fn test_newer_format_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("future.json");
        std::fs::write(
            &path,
            r#"{"formatVersion": 99, "app": "Sermonprep", "exportedAt": "", "records": []}"#,
        )
        .unwrap();

        assert!(matches!(
            import_backup(&path),
            Err(SermonError::ImportFailed { .. })
        ));
    }
}
