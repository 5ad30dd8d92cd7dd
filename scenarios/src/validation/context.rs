//! Read-only state visible to rule handlers during one validation pass.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::scenario::ParamValue;
use crate::error::RuleError;
use crate::validation::result::ValidationResult;
use crate::validation::rule::Rule;
use crate::validation::validator::Validator;

/// Caller-supplied parameters, e.g. the active scenario.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    values: BTreeMap<String, ParamValue>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let _ = self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }
}

pub struct ValidationContext<'a> {
    validator: &'a Validator,
    parameters: &'a Parameters,
    data: &'a Value,
}

impl<'a> ValidationContext<'a> {
    pub(crate) fn new(validator: &'a Validator, parameters: &'a Parameters, data: &'a Value) -> Self {
        Self {
            validator,
            parameters,
            data,
        }
    }

    pub fn parameter(&self, key: &str) -> Option<&ParamValue> {
        self.parameters.get(key)
    }

    /// The full document passed to the validator.
    pub fn data(&self) -> &Value {
        self.data
    }

    /// Run `rules` against `value` under this same context.
    ///
    /// Errors come back with paths relative to `value`.
    pub fn validate(
        &self,
        value: &Value,
        rules: &[Box<dyn Rule>],
    ) -> Result<ValidationResult, RuleError> {
        self.validator.apply_rules(value, rules, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_insert_replaces_parameter() {
        let params = Parameters::new()
            .with("scenario", "login")
            .with("scenario", "register");
        assert!(matches!(
            params.get("scenario"),
            Some(ParamValue::String(name)) if name == "register"
        ));
        assert!(params.get("missing").is_none());
    }

    #[test]
    fn field_rules_see_whole_document() {
        use crate::rules;
        use crate::validation::rules::Callback;
        use crate::validation::schema::Schema;
        use serde_json::json;

        let schema = Schema::builder("Signup")
            .field(
                "confirm",
                rules![Callback::new(|value, ctx| {
                    if ctx.data().get("password") == Some(value) {
                        ValidationResult::new()
                    } else {
                        ValidationResult::new().with_error("Passwords do not match.")
                    }
                })],
            )
            .build();

        let result = Validator::new()
            .validate(
                &json!({"password": "secret", "confirm": "other"}),
                &schema,
                &Parameters::new(),
            )
            .expect("validate");
        assert_eq!(
            result.error_messages_indexed_by_path()["confirm"],
            vec!["Passwords do not match."]
        );

        let matching = Validator::new()
            .validate(
                &json!({"password": "secret", "confirm": "secret"}),
                &schema,
                &Parameters::new(),
            )
            .expect("validate");
        assert!(matching.is_valid());
    }
}
