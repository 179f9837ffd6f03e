//! Atomic file writes for exports and backups.
//!
//! Content goes to a temp file in the target directory, is synced, and is
//! then renamed over the target, so a reader never sees a half-written file.

use crate::error::{Result, SermonError};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Read and parse a JSON file.
///
/// Returns `None` if the file doesn't exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|e| SermonError::Io {
        message: format!("Failed to read {}", path.display()),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })?;

    let data: T = serde_json::from_str(&contents).map_err(|e| SermonError::Json {
        message: format!("Failed to parse {}: {}", path.display(), e),
        source: Some(e),
    })?;

    Ok(Some(data))
}

/// Serialize `data` as pretty JSON and write it atomically.
///
/// With `keep_backup`, an existing target is first copied to `<name>.bak`.
pub fn write_json<T: Serialize>(path: &Path, data: &T, keep_backup: bool) -> Result<()> {
    let serialized = serde_json::to_string_pretty(data).map_err(|e| SermonError::Json {
        message: format!("Failed to serialize data: {}", e),
        source: Some(e),
    })?;

    if keep_backup && path.exists() {
        let backup_path = path.with_extension("json.bak");
        match fs::copy(path, &backup_path) {
            Ok(_) => debug!("Created backup: {}", backup_path.display()),
            Err(e) => warn!("Failed to create backup {}: {}", backup_path.display(), e),
        }
    }

    write_bytes(path, serialized.as_bytes())
}

/// Write raw bytes atomically, creating parent directories as needed.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| SermonError::Io {
            message: format!("Failed to create directory {}", parent.display()),
            path: Some(parent.to_path_buf()),
            source: Some(e),
        })?;
    }

    let io_err = |message: String, e: std::io::Error| SermonError::Io {
        message,
        path: Some(path.to_path_buf()),
        source: Some(e),
    };

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| io_err(format!("Failed to create temp file in {}", parent.display()), e))?;
    temp.write_all(bytes)
        .map_err(|e| io_err("Failed to write temp file".to_string(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| io_err("Failed to sync temp file".to_string(), e))?;
    temp.persist(path)
        .map_err(|e| io_err(format!("Failed to rename into {}", path.display()), e.error))?;

    debug!("Atomically wrote {}", path.display());
    Ok(())
}
