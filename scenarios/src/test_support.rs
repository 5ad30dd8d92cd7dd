//! Test-only helpers: observable rules, scenario values and a sample schema.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Map, Value};

use crate::core::scenario::Stringable;
use crate::error::RuleError;
use crate::on::On;
use crate::rules;
use crate::validation::rules::{Callback, Email, Length, Nested, Number, Required};
use crate::validation::{
    Rule, RuleControls, RuleHandler, Schema, ValidationContext, ValidationResult, expect_rule,
};

/// Rule that passes and counts how often its handler ran. Clones share the count.
#[derive(Debug, Clone, Default)]
pub struct CountingRule {
    calls: Arc<AtomicUsize>,
    controls: RuleControls,
}

impl CountingRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Rule for CountingRule {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn handler(&self) -> &dyn RuleHandler {
        &CountingHandler
    }

    fn controls(&self) -> &RuleControls {
        &self.controls
    }

    fn options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        self.controls.append_options(&mut options);
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct CountingHandler;

impl RuleHandler for CountingHandler {
    fn validate(
        &self,
        _value: &Value,
        rule: &dyn Rule,
        _ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, RuleError> {
        let rule = expect_rule::<CountingRule>(rule)?;
        let _ = rule.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ValidationResult::new())
    }
}

/// A [`Stringable`] scenario label.
#[derive(Debug, Clone)]
pub struct Label(String);

impl Label {
    pub fn new(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl Stringable for Label {
    fn to_display_string(&self) -> String {
        self.0.clone()
    }
}

/// An object with no string form.
#[derive(Debug, Clone, Copy)]
pub struct Opaque;

/// `UserDto` with per-scenario rules:
/// - `name`: required, 7..=10 chars, only on `register`
/// - `email`: always required and a valid address
/// - `password`: required, at least 8 chars, on `login` and `register`
pub fn user_schema() -> Schema {
    Schema::builder("UserDto")
        .field(
            "name",
            rules![On::new("register", rules![Required::new(), Length::new().min(7).max(10)])
                .expect("register rule")],
        )
        .field("email", rules![Required::new(), Email::new()])
        .field(
            "password",
            rules![
                On::new(["login", "register"], rules![Required::new(), Length::new().min(8)])
                    .expect("login/register rule")
            ],
        )
        .build()
}

/// Object-level `on` rule mixing a nested field check with a callback error.
pub fn class_rule_schema() -> Schema {
    Schema::builder("ClassAttribute")
        .object_rule(
            On::new(
                "test",
                rules![
                    Nested::new().field("a", rules![Number::new().min(5.0)]),
                    Callback::new(|_, _| ValidationResult::new().with_error("test error")),
                ],
            )
            .expect("class rule"),
        )
        .build()
}
