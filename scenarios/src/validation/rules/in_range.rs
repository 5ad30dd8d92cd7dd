//! `inRange`: membership in a fixed list of values.

use std::any::Any;

use serde_json::{Map, Value};

use super::as_number;
use crate::error::RuleError;
use crate::validation::context::ValidationContext;
use crate::validation::result::ValidationResult;
use crate::validation::rule::{Rule, RuleControls, RuleHandler, WithControls, expect_rule};

const INVALID_MESSAGE: &str = "This value is invalid.";

/// Value must be one of a fixed list (or, with `not`, none of them).
#[derive(Debug, Clone, Default)]
pub struct InRange {
    values: Vec<Value>,
    strict: bool,
    not: bool,
    controls: RuleControls,
}

impl InRange {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Compare by exact JSON equality instead of loose numeric equality.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn not(mut self, not: bool) -> Self {
        self.not = not;
        self
    }

    fn contains(&self, value: &Value) -> bool {
        self.values.iter().any(|candidate| {
            if self.strict {
                candidate == value
            } else {
                loosely_equal(candidate, value)
            }
        })
    }
}

fn loosely_equal(left: &Value, right: &Value) -> bool {
    if left == right {
        return true;
    }
    match (as_number(left), as_number(right)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

impl WithControls for InRange {
    fn controls_mut(&mut self) -> &mut RuleControls {
        &mut self.controls
    }
}

impl Rule for InRange {
    fn name(&self) -> &'static str {
        "inRange"
    }

    fn handler(&self) -> &dyn RuleHandler {
        &InRangeHandler
    }

    fn controls(&self) -> &RuleControls {
        &self.controls
    }

    fn options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert("values".to_string(), Value::Array(self.values.clone()));
        options.insert("strict".to_string(), Value::Bool(self.strict));
        options.insert("not".to_string(), Value::Bool(self.not));
        options.insert(
            "message".to_string(),
            Value::String(INVALID_MESSAGE.to_string()),
        );
        self.controls.append_options(&mut options);
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct InRangeHandler;

impl RuleHandler for InRangeHandler {
    fn validate(
        &self,
        value: &Value,
        rule: &dyn Rule,
        _ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, RuleError> {
        let rule = expect_rule::<InRange>(rule)?;
        let mut result = ValidationResult::new();
        if rule.contains(value) == rule.not {
            result.add_error(INVALID_MESSAGE);
        }
        Ok(result)
    }
}
