//! `length`: string length bounds, counted in characters.

use std::any::Any;

use serde_json::{Map, Value};

use crate::error::RuleError;
use crate::validation::context::ValidationContext;
use crate::validation::result::ValidationResult;
use crate::validation::rule::{Rule, RuleControls, RuleHandler, WithControls, expect_rule};

/// String length, in characters, within optional inclusive bounds.
#[derive(Debug, Clone, Default)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
    controls: RuleControls,
}

impl Length {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

impl WithControls for Length {
    fn controls_mut(&mut self) -> &mut RuleControls {
        &mut self.controls
    }
}

impl Rule for Length {
    fn name(&self) -> &'static str {
        "length"
    }

    fn handler(&self) -> &dyn RuleHandler {
        &LengthHandler
    }

    fn controls(&self) -> &RuleControls {
        &self.controls
    }

    fn options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert("min".to_string(), self.min.map_or(Value::Null, Value::from));
        options.insert("max".to_string(), self.max.map_or(Value::Null, Value::from));
        self.controls.append_options(&mut options);
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct LengthHandler;

impl RuleHandler for LengthHandler {
    fn validate(
        &self,
        value: &Value,
        rule: &dyn Rule,
        _ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, RuleError> {
        let rule = expect_rule::<Length>(rule)?;
        let mut result = ValidationResult::new();
        let Value::String(text) = value else {
            result.add_error("This value must be a string.");
            return Ok(result);
        };
        let length = text.chars().count();
        if let Some(min) = rule.min
            && length < min
        {
            result.add_error(format!(
                "This value must contain at least {min} {}.",
                characters(min)
            ));
        }
        if let Some(max) = rule.max
            && length > max
        {
            result.add_error(format!(
                "This value must contain at most {max} {}.",
                characters(max)
            ));
        }
        Ok(result)
    }
}

fn characters(count: usize) -> &'static str {
    if count == 1 { "character" } else { "characters" }
}
