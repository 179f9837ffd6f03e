//! Builder for configuring SermonLibrary initialization.

use std::path::{Path, PathBuf};

use crate::config::PathsConfig;
use crate::error::{Result, SermonError};
use crate::presenter::PresenterConfig;
use crate::store::RecordStore;
use crate::SermonLibrary;

/// Builder for configuring SermonLibrary initialization.
///
/// # Example
///
/// ```rust,ignore
/// use sermonprep_core::SermonLibrary;
///
/// let library = SermonLibrary::builder("./my-sermons")
///     .auto_create_dirs(true)
///     .build()
///     .await?;
/// ```
pub struct SermonLibraryBuilder {
    root: PathBuf,
    auto_create_dirs: bool,
    in_memory: bool,
    presenter: PresenterConfig,
}

impl SermonLibraryBuilder {
    /// Create a new builder with the library root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            auto_create_dirs: false,
            in_memory: false,
            presenter: PresenterConfig::default(),
        }
    }

    /// Auto-create required directories if they don't exist.
    ///
    /// When enabled, the builder creates the root, `data/` and `exports/`.
    ///
    /// Default: `false` (the root must exist)
    pub fn auto_create_dirs(mut self, enable: bool) -> Self {
        self.auto_create_dirs = enable;
        self
    }

    /// Keep records in memory instead of `data/sermons.sqlite`.
    ///
    /// Default: `false`
    pub fn in_memory(mut self, enable: bool) -> Self {
        self.in_memory = enable;
        self
    }

    /// Fields shown in search result rows.
    pub fn presenter(mut self, presenter: PresenterConfig) -> Self {
        self.presenter = presenter;
        self
    }

    fn create_directory_structure(root: &Path) -> Result<()> {
        let dirs = [
            root.to_path_buf(),
            root.join(PathsConfig::DATA_DIR_NAME),
            root.join(PathsConfig::EXPORTS_DIR_NAME),
        ];

        for dir in &dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| SermonError::Io {
                    message: format!("Failed to create directory: {}", dir.display()),
                    path: Some(dir.clone()),
                    source: Some(e),
                })?;
            }
        }

        Ok(())
    }

    /// Build the SermonLibrary instance.
    pub async fn build(self) -> Result<SermonLibrary> {
        if self.auto_create_dirs {
            Self::create_directory_structure(&self.root)?;
        } else if !self.root.is_dir() {
            return Err(SermonError::Config {
                message: format!("Library root does not exist: {}", self.root.display()),
            });
        }

        if self.presenter.snippet_len == 0 {
            return Err(SermonError::Config {
                message: "Snippet length must be greater than zero".to_string(),
            });
        }

        let store = if self.in_memory {
            RecordStore::open_in_memory()?
        } else {
            let db_path = self
                .root
                .join(PathsConfig::DATA_DIR_NAME)
                .join(PathsConfig::DATABASE_FILENAME);
            tokio::task::spawn_blocking(move || RecordStore::open(db_path))
                .await
                .map_err(|e| SermonError::Other(format!("Store open task failed: {}", e)))??
        };

        tracing::info!(
            "Sermon library ready at {} ({} records)",
            self.root.display(),
            store.count()?
        );

        Ok(SermonLibrary::from_parts(self.root, store, self.presenter))
    }
}
