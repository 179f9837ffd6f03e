//! API implementation submodules.
//!
//! Each submodule contains `impl SermonLibrary` blocks that extend the public
//! API with domain-specific methods. The struct definition remains in `lib.rs`.

mod builder;
mod records;
mod search;
mod transfer;

pub use builder::SermonLibraryBuilder;
