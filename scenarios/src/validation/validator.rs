//! Rule dispatch: runs rule lists against documents and fields.

use serde_json::Value;
use tracing::trace;

use crate::error::RuleError;
use crate::validation::context::{Parameters, ValidationContext};
use crate::validation::result::ValidationResult;
use crate::validation::rule::Rule;
use crate::validation::schema::Schema;

/// Stateless rule dispatcher.
///
/// Returns `Err` only for contract violations ([`RuleError`]); every ordinary
/// failure, including bad runtime parameters, is an error inside the
/// [`ValidationResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate `data` against a schema: object rules on the whole document,
    /// then each field's rules on `data[field]` (missing fields are null).
    pub fn validate(
        &self,
        data: &Value,
        schema: &Schema,
        parameters: &Parameters,
    ) -> Result<ValidationResult, RuleError> {
        let ctx = ValidationContext::new(self, parameters, data);
        let mut result = self.apply_rules(data, schema.object_rules(), &ctx)?;
        for field in schema.fields() {
            let value = data.get(&field.name).unwrap_or(&Value::Null);
            let field_result = self.apply_rules(value, &field.rules, &ctx)?;
            result.merge_under(&field.name, field_result);
        }
        Ok(result)
    }

    /// Validate a bare value against a rule list; errors land on the root path.
    pub fn validate_value(
        &self,
        value: &Value,
        rules: &[Box<dyn Rule>],
        parameters: &Parameters,
    ) -> Result<ValidationResult, RuleError> {
        let ctx = ValidationContext::new(self, parameters, value);
        self.apply_rules(value, rules, &ctx)
    }

    pub(crate) fn apply_rules(
        &self,
        value: &Value,
        rules: &[Box<dyn Rule>],
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, RuleError> {
        let mut result = ValidationResult::new();
        for rule in rules {
            let controls = rule.controls();
            if controls.skip_on_error && !result.is_valid() {
                trace!(rule = rule.name(), "skipped after previous error");
                continue;
            }
            if let Some(when) = &controls.when
                && !when(value, ctx)
            {
                trace!(rule = rule.name(), "skipped by when condition");
                continue;
            }
            if controls.skip_on_empty.should_skip(value) {
                trace!(rule = rule.name(), "skipped on empty value");
                continue;
            }
            let rule_result = rule.handler().validate(value, rule.as_ref(), ctx)?;
            result.merge(rule_result);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;
    use crate::validation::rule::WithControls;
    use crate::validation::rules::{Number, Required};
    use serde_json::json;

    #[test]
    fn field_errors_are_prefixed_with_field_name() {
        let schema = Schema::builder("Form")
            .field("a", rules![Number::new().max(2.0)])
            .field("b", rules![Required::new()])
            .build();
        let result = Validator::new()
            .validate(&json!({"a": 7}), &schema, &Parameters::new())
            .expect("validate");

        let indexed = result.error_messages_indexed_by_path();
        assert_eq!(indexed["a"], vec!["Value must be no greater than 2."]);
        assert_eq!(indexed["b"], vec!["Value cannot be blank."]);
    }

    #[test]
    fn skip_on_error_skips_after_failure() {
        let rules = rules![
            Required::new(),
            Number::new().max(1.0).skip_on_error(true),
        ];
        let result = Validator::new()
            .validate_value(&json!(""), &rules, &Parameters::new())
            .expect("validate");
        assert_eq!(result.error_messages(), vec!["Value cannot be blank."]);
    }

    #[test]
    fn skip_on_empty_skips_null() {
        let rules = rules![Number::new().skip_on_empty(true)];
        let result = Validator::new()
            .validate_value(&Value::Null, &rules, &Parameters::new())
            .expect("validate");
        assert!(result.is_valid());
    }

    #[test]
    fn when_condition_reads_parameters() {
        let rules = rules![Number::new().max(1.0).when(|_, ctx| ctx.parameter("strict").is_some())];
        let validator = Validator::new();

        let lenient = validator
            .validate_value(&json!(5), &rules, &Parameters::new())
            .expect("validate");
        assert!(lenient.is_valid());

        let strict = validator
            .validate_value(&json!(5), &rules, &Parameters::new().with("strict", "yes"))
            .expect("validate");
        assert!(!strict.is_valid());
    }
}
