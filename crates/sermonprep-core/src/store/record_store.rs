//! SQLite-backed store for sermon records.

use crate::config::StoreConfig;
use crate::dates::{normalize_date, settle_dates};
use crate::error::{Result, SermonError};
use crate::schema::{Field, FieldKind, Record, RecordDraft};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use super::sql;

/// Record store over a single SQLite connection.
///
/// Identifiers come from `AUTOINCREMENT`, so they are positive, unique, and
/// never handed out again after a delete.
#[derive(Clone)]
pub struct RecordStore {
    db_path: Option<PathBuf>,
    conn: Arc<Mutex<Connection>>,
}

impl RecordStore {
    /// Create or open a store at the given path.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| SermonError::Io {
                    message: format!("Failed to create directory {}", parent.display()),
                    path: Some(parent.to_path_buf()),
                    source: Some(e),
                })?;
            }
        }

        let conn = Connection::open(&db_path)?;
        Self::configure_connection(&conn)?;
        Self::ensure_schema(&conn)?;

        info!("Opened record store at {}", db_path.display());
        Ok(Self {
            db_path: Some(db_path),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a throwaway store that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::ensure_schema(&conn)?;
        Ok(Self {
            db_path: None,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.busy_timeout(StoreConfig::BUSY_TIMEOUT)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA temp_store=MEMORY;
            ",
        )?;
        Ok(())
    }

    /// Create the record table, adding any columns an older file lacks.
    fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute(&sql::create_table(), [])?;

        let existing: HashSet<String> = {
            let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", StoreConfig::TABLE_NAME))?;
            let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
            let names: HashSet<String> = names.collect::<rusqlite::Result<_>>()?;
            names
        };

        for field in Field::ALL {
            if !existing.contains(field.key()) {
                conn.execute(&sql::add_column(*field), [])?;
                info!("Added missing column {}", field.key());
            }
        }

        Self::migrate_legacy_dates(conn)
    }

    /// Rewrite date columns that are not yet ISO.
    ///
    /// Readable legacy dates are converted. Unreadable ones are cleared and
    /// their raw text appended to research, so later saves of the record
    /// validate.
    fn migrate_legacy_dates(conn: &Connection) -> Result<()> {
        let records = {
            let mut stmt = conn.prepare(&sql::select_all())?;
            let records = stmt
                .query_map([], Self::row_to_record)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            records
        };

        let mut migrated = 0;
        for record in records {
            let mut draft = record.content().clone();
            settle_dates(&mut draft);
            if &draft == record.content() {
                continue;
            }
            write_draft(conn, record.id(), &draft)?;
            migrated += 1;
        }

        if migrated > 0 {
            info!("Migrated legacy dates on {} records", migrated);
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| SermonError::lock_failed())
    }

    /// Path of the backing file, `None` for in-memory stores.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Create an empty record and return it with its new identifier.
    pub fn create(&self) -> Result<Record> {
        self.insert(&RecordDraft::new())
    }

    /// Insert a record with the given contents under a new identifier.
    pub fn insert(&self, draft: &RecordDraft) -> Result<Record> {
        let draft = normalize_draft(draft)?;
        let conn = self.lock()?;

        let values: Vec<&str> = draft.fields().map(|(_, v)| v).collect();
        conn.execute(&sql::insert(), params_from_iter(values))?;
        let id = conn.last_insert_rowid();

        debug!("Inserted record {}", id);
        Ok(draft.into_record(id))
    }

    /// Get a record by identifier.
    pub fn get(&self, id: i64) -> Result<Option<Record>> {
        let conn = self.lock()?;
        let record = conn
            .query_row(&sql::select_one(), params![id], Self::row_to_record)
            .optional()?;
        Ok(record)
    }

    /// Every record, ordered by identifier.
    ///
    /// The returned vector is an independent snapshot; later writes do not
    /// affect it.
    pub fn fetch_all(&self) -> Result<Vec<Record>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql::select_all())?;
        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Write every content field of an existing record.
    pub fn save(&self, record: &Record) -> Result<Record> {
        let draft = normalize_draft(record.content())?;
        let id = record.id();
        let conn = self.lock()?;

        if write_draft(&conn, id, &draft)? == 0 {
            return Err(SermonError::RecordNotFound { id });
        }

        debug!("Saved record {}", id);
        Ok(draft.into_record(id))
    }

    /// Update a single field in place.
    pub fn update_field(&self, id: i64, field: Field, value: &str) -> Result<()> {
        let value = normalize_value(field, value)?;
        let conn = self.lock()?;

        let affected = conn.execute(&sql::update_one(field), params![value, id])?;
        if affected == 0 {
            return Err(SermonError::RecordNotFound { id });
        }

        debug!("Updated {} on record {}", field, id);
        Ok(())
    }

    /// Delete a record. Returns whether it existed.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;
        let affected = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", StoreConfig::TABLE_NAME),
            params![id],
        )?;

        if affected > 0 {
            debug!("Deleted record {}", id);
        }
        Ok(affected > 0)
    }

    /// All identifiers, ascending.
    pub fn ids(&self) -> Result<Vec<i64>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id FROM {} ORDER BY id",
            StoreConfig::TABLE_NAME
        ))?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }

    pub fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: usize = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", StoreConfig::TABLE_NAME),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Remove every record. Identifiers keep counting up afterwards.
    pub fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(&format!("DELETE FROM {}", StoreConfig::TABLE_NAME), [])?;
        debug!("Cleared record store");
        Ok(())
    }

    /// Checkpoint the WAL file.
    pub fn checkpoint_wal(&self) -> Result<()> {
        if self.db_path.is_none() {
            return Ok(());
        }
        let conn = self.lock()?;
        conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        debug!("Checkpointed WAL");
        Ok(())
    }

    fn row_to_record(row: &Row) -> rusqlite::Result<Record> {
        let id: i64 = row.get(0)?;
        let mut record = Record::new(id);
        for (i, field) in Field::ALL.iter().enumerate() {
            let value: Value = row.get(i + 1)?;
            record.set(*field, value_to_text(value));
        }
        Ok(record)
    }
}

/// Write every content field of record `id`, returning the rows affected.
fn write_draft(conn: &Connection, id: i64, draft: &RecordDraft) -> Result<usize> {
    let texts: Vec<&str> = draft.fields().map(|(_, v)| v).collect();
    let mut values: Vec<&dyn ToSql> = texts.iter().map(|v| v as &dyn ToSql).collect();
    values.push(&id);

    Ok(conn.execute(&sql::update_all(), values.as_slice())?)
}

/// Text form of a stored value.
///
/// Columns are declared `TEXT`, but files written by other tools can hold
/// numbers or blobs. Those are kept as text so the record stays searchable.
fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(n) => n.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

fn normalize_value(field: Field, value: &str) -> Result<String> {
    match field.kind() {
        FieldKind::Date => normalize_date(value).map_err(|e| SermonError::Validation {
            field: field.key().to_string(),
            message: e.to_string(),
        }),
        FieldKind::Text | FieldKind::LongText => Ok(value.to_string()),
    }
}

fn normalize_draft(draft: &RecordDraft) -> Result<RecordDraft> {
    let mut normalized = draft.clone();
    for field in Field::ALL.iter().filter(|f| f.kind() == FieldKind::Date) {
        normalized.set(*field, normalize_value(*field, draft.get(*field))?);
    }
    Ok(normalized)
}
