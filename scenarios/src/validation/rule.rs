//! Rule and handler contracts shared by every rule in the engine.
//!
//! A [`Rule`] is configuration: it names its [`RuleHandler`], exposes its
//! cross-cutting [`RuleControls`] and dumps its options. The handler does the
//! actual checking and receives the rule back as `&dyn Rule`, downcasting it
//! with [`expect_rule`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::RuleError;
use crate::validation::context::ValidationContext;
use crate::validation::result::ValidationResult;

pub trait Rule: fmt::Debug + Send + Sync {
    /// Short name used as the `rule` key in option dumps.
    fn name(&self) -> &'static str;

    /// Fully qualified type name, used in contract errors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn handler(&self) -> &dyn RuleHandler;

    fn controls(&self) -> &RuleControls;

    /// Rule-specific options, followed by `skipOnEmpty` and `skipOnError`.
    fn options(&self) -> Map<String, Value>;

    fn as_any(&self) -> &dyn Any;

    /// Called once when the rule is attached to a schema site.
    fn after_attach(&mut self, _site: &AttachSite) {}
}

pub trait RuleHandler: Send + Sync {
    fn validate(
        &self,
        value: &Value,
        rule: &dyn Rule,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, RuleError>;
}

/// Downcast `rule` to the concrete kind a handler expects.
pub fn expect_rule<R: Rule + 'static>(rule: &dyn Rule) -> Result<&R, RuleError> {
    rule.as_any()
        .downcast_ref::<R>()
        .ok_or_else(|| RuleError::UnexpectedRule {
            expected: std::any::type_name::<R>(),
            given: rule.type_name(),
        })
}

pub type WhenFn = Arc<dyn Fn(&Value, &ValidationContext<'_>) -> bool + Send + Sync>;
pub type EmptyFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// When to skip a rule because the value is empty.
#[derive(Clone, Default)]
pub enum SkipOnEmpty {
    #[default]
    Never,
    /// Skip null, `""`, `[]` and `{}`.
    WhenEmpty,
    Custom(EmptyFn),
}

impl SkipOnEmpty {
    pub fn should_skip(&self, value: &Value) -> bool {
        match self {
            Self::Never => false,
            Self::WhenEmpty => is_empty_value(value),
            Self::Custom(is_empty) => is_empty(value),
        }
    }

    /// Flag exported in option dumps.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Never)
    }
}

impl From<bool> for SkipOnEmpty {
    fn from(enabled: bool) -> Self {
        if enabled { Self::WhenEmpty } else { Self::Never }
    }
}

impl fmt::Debug for SkipOnEmpty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("Never"),
            Self::WhenEmpty => f.write_str("WhenEmpty"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Cross-cutting controls embedded in every rule and applied by the validator.
#[derive(Clone, Default)]
pub struct RuleControls {
    pub skip_on_empty: SkipOnEmpty,
    /// Skip when an earlier rule in the same list already failed.
    pub skip_on_error: bool,
    /// Apply the rule only when this returns `true`.
    pub when: Option<WhenFn>,
}

impl RuleControls {
    pub fn append_options(&self, options: &mut Map<String, Value>) {
        options.insert(
            "skipOnEmpty".to_string(),
            Value::Bool(self.skip_on_empty.is_enabled()),
        );
        options.insert("skipOnError".to_string(), Value::Bool(self.skip_on_error));
    }
}

impl fmt::Debug for RuleControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleControls")
            .field("skip_on_empty", &self.skip_on_empty)
            .field("skip_on_error", &self.skip_on_error)
            .field("when", &self.when.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Builder-style setters for [`RuleControls`], available on every rule.
pub trait WithControls: Sized {
    fn controls_mut(&mut self) -> &mut RuleControls;

    fn skip_on_empty(mut self, skip: impl Into<SkipOnEmpty>) -> Self {
        self.controls_mut().skip_on_empty = skip.into();
        self
    }

    fn skip_on_error(mut self, skip: bool) -> Self {
        self.controls_mut().skip_on_error = skip;
        self
    }

    fn when<F>(mut self, when: F) -> Self
    where
        F: Fn(&Value, &ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.controls_mut().when = Some(Arc::new(when));
        self
    }
}

/// Null, empty string, empty array or empty object.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Where a rule was attached in a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachSite {
    /// Attached to the whole object.
    Object { type_name: String },
    Field { type_name: String, field: String },
}

impl AttachSite {
    pub fn type_name(&self) -> &str {
        match self {
            Self::Object { type_name } | Self::Field { type_name, .. } => type_name.as_str(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Object { .. } => None,
            Self::Field { field, .. } => Some(field.as_str()),
        }
    }
}

pub type RuleProvider = Box<dyn FnOnce() -> Vec<Box<dyn Rule>>>;

/// Accepted shapes for a nested rule list, normalized once by [`into_rules`](Self::into_rules).
pub enum RuleSource {
    One(Box<dyn Rule>),
    Many(Vec<Box<dyn Rule>>),
    Deferred(RuleProvider),
}

impl RuleSource {
    pub fn one<R: Rule + 'static>(rule: R) -> Self {
        Self::One(Box::new(rule))
    }

    pub fn deferred<F>(provider: F) -> Self
    where
        F: FnOnce() -> Vec<Box<dyn Rule>> + 'static,
    {
        Self::Deferred(Box::new(provider))
    }

    pub fn into_rules(self) -> Vec<Box<dyn Rule>> {
        match self {
            Self::One(rule) => vec![rule],
            Self::Many(rules) => rules,
            Self::Deferred(provider) => provider(),
        }
    }
}

impl Default for RuleSource {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<Vec<Box<dyn Rule>>> for RuleSource {
    fn from(rules: Vec<Box<dyn Rule>>) -> Self {
        Self::Many(rules)
    }
}

impl From<Box<dyn Rule>> for RuleSource {
    fn from(rule: Box<dyn Rule>) -> Self {
        Self::One(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;
    use crate::validation::rules::{Number, Required};
    use serde_json::json;

    #[test]
    fn empty_values() {
        assert!(is_empty_value(&json!(null)));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(!is_empty_value(&json!(" ")));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
    }

    #[test]
    fn skip_on_empty_variants() {
        assert!(!SkipOnEmpty::Never.should_skip(&json!(null)));
        assert!(SkipOnEmpty::WhenEmpty.should_skip(&json!(null)));
        let zero_is_empty = SkipOnEmpty::Custom(Arc::new(|value: &Value| value == &json!(0)));
        assert!(zero_is_empty.should_skip(&json!(0)));
        assert!(!zero_is_empty.should_skip(&json!(null)));
        assert!(zero_is_empty.is_enabled());
    }

    #[test]
    fn rule_source_shapes_normalize_in_order() {
        assert_eq!(RuleSource::default().into_rules().len(), 0);
        assert_eq!(RuleSource::one(Required::new()).into_rules().len(), 1);

        let many = RuleSource::from(rules![Required::new(), Number::new()]).into_rules();
        let names: Vec<&str> = many.iter().map(|rule| rule.name()).collect();
        assert_eq!(names, vec!["required", "number"]);

        let deferred = RuleSource::deferred(|| rules![Number::new()]).into_rules();
        assert_eq!(deferred[0].name(), "number");
    }

    #[test]
    fn expect_rule_reports_expected_and_given() {
        let rule: Box<dyn Rule> = Box::new(Required::new());
        assert!(expect_rule::<Required>(rule.as_ref()).is_ok());

        let err = expect_rule::<Number>(rule.as_ref()).expect_err("wrong kind");
        assert_eq!(
            err,
            RuleError::UnexpectedRule {
                expected: std::any::type_name::<Number>(),
                given: std::any::type_name::<Required>(),
            }
        );
    }

    #[test]
    fn controls_dump_flags() {
        let controls = RuleControls {
            skip_on_empty: SkipOnEmpty::WhenEmpty,
            ..RuleControls::default()
        };
        let mut options = Map::new();
        controls.append_options(&mut options);
        assert_eq!(
            Value::Object(options),
            json!({"skipOnEmpty": true, "skipOnError": false})
        );
    }
}
