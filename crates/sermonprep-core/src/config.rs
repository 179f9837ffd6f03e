//! Centralized configuration for sermonprep.
//!
//! Constants for file layout, the SQLite store, and search presentation.

use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "Sermonprep";
    pub const BACKUP_FORMAT_VERSION: u32 = 1;
}

/// Directory and file names under the library root.
pub struct PathsConfig;

impl PathsConfig {
    pub const DATA_DIR_NAME: &'static str = "data";
    pub const EXPORTS_DIR_NAME: &'static str = "exports";
    pub const DATABASE_FILENAME: &'static str = "sermons.sqlite";
    pub const BACKUP_EXTENSION: &'static str = "json";
    pub const TEXT_EXPORT_EXTENSION: &'static str = "txt";
}

/// SQLite store settings.
pub struct StoreConfig;

impl StoreConfig {
    pub const TABLE_NAME: &'static str = "sermons";
    pub const BUSY_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Search result presentation.
pub struct SearchConfig;

impl SearchConfig {
    /// Characters of the snippet field shown per result row.
    pub const SNIPPET_LEN: usize = 100;
    pub const SNIPPET_ELLIPSIS: &'static str = "...";
    pub const TERM_SEPARATOR: &'static str = ", ";
}

/// Legacy date import settings.
pub struct DateConfig;

impl DateConfig {
    /// Stored date format (ISO 8601 calendar date).
    pub const STORAGE_FORMAT: &'static str = "%Y-%m-%d";
    /// Two-digit years below this pivot are read as 20xx, the rest as 19xx.
    pub const TWO_DIGIT_YEAR_PIVOT: i32 = 50;
}
