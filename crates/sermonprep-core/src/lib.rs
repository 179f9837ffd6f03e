//! Sermonprep Core - headless library for sermon preparation notes.
//!
//! Records live in a local SQLite file. Each record is one sermon's worth of
//! notes: scripture, exegesis, outlines, research, liturgy and manuscript.
//! The library adds a two-tier ranked search over those records and
//! plain-text/JSON import and export. No UI is included; front ends talk to
//! [`SermonLibrary`] directly or through the `sermonprep-rpc` backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use sermonprep_core::{Field, SermonLibrary};
//!
//! #[tokio::main]
//! async fn main() -> sermonprep_core::Result<()> {
//!     let library = SermonLibrary::builder("./my-sermons")
//!         .auto_create_dirs(true)
//!         .build()
//!         .await?;
//!
//!     let mut record = library.create_record().await?;
//!     record.set(Field::SermonTitle, "Easter Sermon");
//!     library.save_record(&record).await?;
//!
//!     for row in library.search("\"empty tomb\" grace").await? {
//!         println!("{} ({} matches): {}", row.id, row.match_count, row.snippet);
//!     }
//!
//!     library.shutdown().await
//! }
//! ```

pub mod config;
pub mod dates;
pub mod error;
pub mod presenter;
pub mod schema;
pub mod search;
pub mod store;
pub mod transfer;

mod api;

// Re-export commonly used types
pub use error::{Result, SermonError};
pub use presenter::{PresenterConfig, ResultRow};
pub use schema::{Field, FieldGroup, FieldKind, Record, RecordDraft};
pub use search::{SearchResult, SearchTier};
pub use store::RecordStore;

pub use api::SermonLibraryBuilder;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application context for one sermon library.
///
/// Owns the record store, the presenter settings, and the currently open
/// ("active") record. Created once at startup with [`SermonLibrary::open`]
/// or the builder, and torn down with [`SermonLibrary::shutdown`].
pub struct SermonLibrary {
    root: PathBuf,
    store: RecordStore,
    presenter: PresenterConfig,
    active_record: Arc<RwLock<Option<i64>>>,
}

impl SermonLibrary {
    /// Create a builder for SermonLibrary.
    ///
    /// ```rust,ignore
    /// let library = SermonLibrary::builder("./my-sermons")
    ///     .auto_create_dirs(true)
    ///     .build()
    ///     .await?;
    /// ```
    pub fn builder(root: impl Into<PathBuf>) -> SermonLibraryBuilder {
        SermonLibraryBuilder::new(root)
    }

    /// Open the library rooted at an existing directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::builder(root).build().await
    }

    pub(crate) fn from_parts(root: PathBuf, store: RecordStore, presenter: PresenterConfig) -> Self {
        Self {
            root,
            store,
            presenter,
            active_record: Arc::new(RwLock::new(None)),
        }
    }

    /// Library root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the SQLite file.
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(config::PathsConfig::DATA_DIR_NAME)
    }

    /// Default directory for text exports and backups.
    pub fn exports_dir(&self) -> PathBuf {
        self.root.join(config::PathsConfig::EXPORTS_DIR_NAME)
    }

    /// Backing SQLite file, `None` for in-memory libraries.
    pub fn db_path(&self) -> Option<&Path> {
        self.store.db_path()
    }

    /// The underlying record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn presenter_config(&self) -> &PresenterConfig {
        &self.presenter
    }

    /// Flush the store and forget the active record.
    pub async fn shutdown(&self) -> Result<()> {
        *self.active_record.write().await = None;
        self.with_store(|store| store.checkpoint_wal()).await?;
        tracing::info!("Sermon library at {} shut down", self.root.display());
        Ok(())
    }

    /// Run a store call on the blocking pool.
    ///
    /// SQLite calls block on the connection mutex and on disk, so they stay
    /// off the async worker threads.
    pub(crate) async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&RecordStore) -> Result<T> + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| SermonError::Other(format!("Store task failed: {}", e)))?
    }
}
