//! Record CRUD and active-record methods on SermonLibrary.

use crate::error::{Result, SermonError};
use crate::schema::{Field, Record, RecordDraft};
use crate::SermonLibrary;
use tracing::debug;

impl SermonLibrary {
    // ========================================
    // Record Methods
    // ========================================

    /// Every record, ordered by identifier.
    pub async fn list_records(&self) -> Result<Vec<Record>> {
        self.with_store(|store| store.fetch_all()).await
    }

    pub async fn record_count(&self) -> Result<usize> {
        self.with_store(|store| store.count()).await
    }

    /// Get a record, failing with `RecordNotFound` if it does not exist.
    pub async fn get_record(&self, id: i64) -> Result<Record> {
        self.with_store(move |store| store.get(id))
            .await?
            .ok_or(SermonError::RecordNotFound { id })
    }

    /// Create an empty record and make it the active record.
    pub async fn create_record(&self) -> Result<Record> {
        let record = self.with_store(|store| store.create()).await?;
        *self.active_record.write().await = Some(record.id());
        Ok(record)
    }

    /// Insert a record with the given contents.
    pub async fn insert_record(&self, draft: &RecordDraft) -> Result<Record> {
        let draft = draft.clone();
        self.with_store(move |store| store.insert(&draft)).await
    }

    /// Save every field of an existing record. Returns the stored form.
    pub async fn save_record(&self, record: &Record) -> Result<Record> {
        let record = record.clone();
        self.with_store(move |store| store.save(&record)).await
    }

    /// Update one field by key.
    pub async fn update_field(&self, id: i64, field_key: &str, value: &str) -> Result<()> {
        let field = Field::from_key(field_key)?;
        let value = value.to_string();
        self.with_store(move |store| store.update_field(id, field, &value))
            .await
    }

    /// Delete a record. Clears the active record if it was the one deleted.
    pub async fn delete_record(&self, id: i64) -> Result<bool> {
        let deleted = self.with_store(move |store| store.delete(id)).await?;
        if deleted {
            let mut active = self.active_record.write().await;
            if *active == Some(id) {
                *active = None;
                debug!("Cleared active record {}", id);
            }
        }
        Ok(deleted)
    }

    // ========================================
    // Active Record
    // ========================================

    /// Set (or clear, with `None`) the record the user is working on.
    pub async fn set_active_record(&self, id: Option<i64>) -> Result<()> {
        if let Some(id) = id {
            if self.with_store(move |store| store.get(id)).await?.is_none() {
                return Err(SermonError::RecordNotFound { id });
            }
        }
        *self.active_record.write().await = id;
        Ok(())
    }

    pub async fn active_record_id(&self) -> Option<i64> {
        *self.active_record.read().await
    }

    /// The active record, if one is set and still exists.
    pub async fn active_record(&self) -> Result<Option<Record>> {
        match self.active_record_id().await {
            Some(id) => self.with_store(move |store| store.get(id)).await,
            None => Ok(None),
        }
    }
}
