//! File loading for the `scenarios` binary.

pub mod document;
pub mod schema_file;
