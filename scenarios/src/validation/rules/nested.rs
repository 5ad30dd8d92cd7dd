//! `nested`: per-field rules inside an object or array value.

use std::any::Any;

use serde_json::{Map, Value};

use crate::error::RuleError;
use crate::validation::context::ValidationContext;
use crate::validation::dumper::dump_rules;
use crate::validation::result::ValidationResult;
use crate::validation::rule::{
    AttachSite, Rule, RuleControls, RuleHandler, WithControls, expect_rule,
};

/// Per-field rules for an object value. Field errors are reported under the
/// field name, relative to the validated value.
#[derive(Debug, Default)]
pub struct Nested {
    fields: Vec<(String, Vec<Box<dyn Rule>>)>,
    controls: RuleControls,
}

impl Nested {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rules: Vec<Box<dyn Rule>>) -> Self {
        self.fields.push((name.into(), rules));
        self
    }

    pub fn fields(&self) -> &[(String, Vec<Box<dyn Rule>>)] {
        &self.fields
    }
}

impl WithControls for Nested {
    fn controls_mut(&mut self) -> &mut RuleControls {
        &mut self.controls
    }
}

impl Rule for Nested {
    fn name(&self) -> &'static str {
        "nested"
    }

    fn handler(&self) -> &dyn RuleHandler {
        &NestedHandler
    }

    fn controls(&self) -> &RuleControls {
        &self.controls
    }

    fn options(&self) -> Map<String, Value> {
        let mut rules = Map::new();
        for (name, field_rules) in &self.fields {
            rules.insert(name.clone(), dump_rules(field_rules));
        }
        let mut options = Map::new();
        options.insert("rules".to_string(), Value::Object(rules));
        self.controls.append_options(&mut options);
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn after_attach(&mut self, site: &AttachSite) {
        for (_, rules) in &mut self.fields {
            for rule in rules {
                rule.after_attach(site);
            }
        }
    }
}

pub struct NestedHandler;

impl RuleHandler for NestedHandler {
    fn validate(
        &self,
        value: &Value,
        rule: &dyn Rule,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, RuleError> {
        let rule = expect_rule::<Nested>(rule)?;
        let mut result = ValidationResult::new();
        if !(value.is_object() || value.is_array()) {
            result.add_error("Value must be an array or an object.");
            return Ok(result);
        }
        for (name, rules) in &rule.fields {
            let field_value = lookup(value, name).unwrap_or(&Value::Null);
            let field_result = ctx.validate(field_value, rules)?;
            result.merge_under(name, field_result);
        }
        Ok(result)
    }
}

fn lookup<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    match value {
        Value::Object(fields) => fields.get(name),
        Value::Array(items) => name.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}
