//! Moving records in and out of the store.
//!
//! - `text`: labelled plain-text sections for a single record
//! - `backup`: JSON snapshot of the whole store
//! - `atomic`: temp-file-and-rename writes shared by both

mod atomic;
mod backup;
mod text;

pub use atomic::{read_json, write_bytes, write_json};
pub use backup::{export_backup, import_backup, BackupFile};
pub use text::{export_text, import_text};
