//! Validation outcome: ordered error messages keyed by value path.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single validation failure.
///
/// `path` is relative to the value the producing rule was run against; the
/// validator prefixes it as results bubble up through fields and nested rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub message: String,
    pub path: Vec<String>,
}

impl ValidationError {
    /// Path rendered with `.` separators; the root path is `""`.
    pub fn path_key(&self) -> String {
        self.path.join(".")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`add_error`](Self::add_error).
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.add_error(message);
        self
    }

    /// Record an error at the root of the validated value.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.add_error_at(Vec::new(), message);
    }

    pub fn add_error_at(&mut self, path: Vec<String>, message: impl Into<String>) {
        self.errors.push(ValidationError {
            message: message.into(),
            path,
        });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Append all errors from `other`, keeping their paths.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// Append all errors from `other`, prefixing each path with `segment`.
    pub fn merge_under(&mut self, segment: &str, other: ValidationResult) {
        self.errors
            .extend(other.errors.into_iter().map(|mut error| {
                error.path.insert(0, segment.to_string());
                error
            }));
    }

    pub fn error_messages(&self) -> Vec<&str> {
        self.errors
            .iter()
            .map(|error| error.message.as_str())
            .collect()
    }

    /// Messages grouped by rendered path, in the order they were recorded.
    pub fn error_messages_indexed_by_path(&self) -> BTreeMap<String, Vec<String>> {
        let mut indexed: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            indexed
                .entry(error.path_key())
                .or_default()
                .push(error.message.clone());
        }
        indexed
    }
}
