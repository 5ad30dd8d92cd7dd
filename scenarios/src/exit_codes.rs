//! Stable exit codes for `scenarios` CLI commands.

/// Command succeeded; for `check`, the document is valid.
pub const OK: i32 = 0;
/// `scenarios check` found validation errors.
pub const INVALID: i32 = 1;
/// Unreadable files, malformed schema declarations or rule wiring errors.
pub const ERROR: i32 = 2;
