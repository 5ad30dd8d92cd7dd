//! `required`: rejects null, blank strings and empty collections.

use std::any::Any;

use serde_json::{Map, Value};

use crate::error::RuleError;
use crate::validation::context::ValidationContext;
use crate::validation::result::ValidationResult;
use crate::validation::rule::{Rule, RuleControls, RuleHandler, WithControls, expect_rule};

/// Value must be present: not null, not a blank string, not an empty list or map.
#[derive(Debug, Clone, Default)]
pub struct Required {
    controls: RuleControls,
}

impl Required {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WithControls for Required {
    fn controls_mut(&mut self) -> &mut RuleControls {
        &mut self.controls
    }
}

impl Rule for Required {
    fn name(&self) -> &'static str {
        "required"
    }

    fn handler(&self) -> &dyn RuleHandler {
        &RequiredHandler
    }

    fn controls(&self) -> &RuleControls {
        &self.controls
    }

    fn options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert(
            "message".to_string(),
            Value::String(BLANK_MESSAGE.to_string()),
        );
        self.controls.append_options(&mut options);
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const BLANK_MESSAGE: &str = "Value cannot be blank.";

pub struct RequiredHandler;

impl RuleHandler for RequiredHandler {
    fn validate(
        &self,
        value: &Value,
        rule: &dyn Rule,
        _ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, RuleError> {
        expect_rule::<Required>(rule)?;
        let blank = match value {
            Value::Null => true,
            Value::String(text) => text.trim().is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        };
        let mut result = ValidationResult::new();
        if blank {
            result.add_error(BLANK_MESSAGE);
        }
        Ok(result)
    }
}
