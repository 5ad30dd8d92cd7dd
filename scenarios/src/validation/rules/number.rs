//! `number`: numeric values within optional bounds.

use std::any::Any;

use serde_json::{Map, Value};

use super::{as_number, format_number, option_number};
use crate::error::RuleError;
use crate::validation::context::ValidationContext;
use crate::validation::result::ValidationResult;
use crate::validation::rule::{Rule, RuleControls, RuleHandler, WithControls, expect_rule};

/// Numeric value within optional inclusive bounds.
#[derive(Debug, Clone, Default)]
pub struct Number {
    min: Option<f64>,
    max: Option<f64>,
    controls: RuleControls,
}

impl Number {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

impl WithControls for Number {
    fn controls_mut(&mut self) -> &mut RuleControls {
        &mut self.controls
    }
}

impl Rule for Number {
    fn name(&self) -> &'static str {
        "number"
    }

    fn handler(&self) -> &dyn RuleHandler {
        &NumberHandler
    }

    fn controls(&self) -> &RuleControls {
        &self.controls
    }

    fn options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert("min".to_string(), option_number(self.min));
        options.insert("max".to_string(), option_number(self.max));
        self.controls.append_options(&mut options);
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct NumberHandler;

impl RuleHandler for NumberHandler {
    fn validate(
        &self,
        value: &Value,
        rule: &dyn Rule,
        _ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, RuleError> {
        let rule = expect_rule::<Number>(rule)?;
        let mut result = ValidationResult::new();
        let Some(number) = as_number(value) else {
            result.add_error("Value must be a number.");
            return Ok(result);
        };
        if let Some(min) = rule.min
            && number < min
        {
            result.add_error(format!("Value must be no less than {}.", format_number(min)));
        }
        if let Some(max) = rule.max
            && number > max
        {
            result.add_error(format!("Value must be no greater than {}.", format_number(max)));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::context::Parameters;
    use crate::validation::validator::Validator;
    use serde_json::json;

    fn check(rule: Number, value: Value) -> Vec<String> {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(rule)];
        Validator::new()
            .validate_value(&value, &rules, &Parameters::new())
            .expect("validate")
            .error_messages()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(check(Number::new().min(1.0).max(2.0), json!(1)).is_empty());
        assert!(check(Number::new().min(1.0).max(2.0), json!(2)).is_empty());
    }

    #[test]
    fn reports_exceeded_bounds() {
        assert_eq!(
            check(Number::new().max(2.0), json!(7)),
            vec!["Value must be no greater than 2."]
        );
        assert_eq!(
            check(Number::new().min(5.0), json!("3")),
            vec!["Value must be no less than 5."]
        );
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(check(Number::new(), json!([1])), vec!["Value must be a number."]);
        assert_eq!(check(Number::new(), Value::Null), vec!["Value must be a number."]);
    }
}
