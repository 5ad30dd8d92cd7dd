//! JSON documents to validate.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

pub fn load_document(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse json {}", path.display()))
}
