//! SQLite record store.
//!
//! This module provides:
//! - Persistence of sermon records keyed by integer identifier
//! - Table setup derived from the record schema
//! - Whole-store snapshots for the search engine

mod record_store;
mod sql;

pub use record_store::RecordStore;
