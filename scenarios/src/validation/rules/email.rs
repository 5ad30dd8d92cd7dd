//! `email`: address syntax check.

use std::any::Any;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::RuleError;
use crate::validation::context::ValidationContext;
use crate::validation::result::ValidationResult;
use crate::validation::rule::{Rule, RuleControls, RuleHandler, WithControls, expect_rule};

const INVALID_MESSAGE: &str = "This value is not a valid email address.";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?$",
    )
    .unwrap()
});

/// Value must be a plain `local@domain` email address.
#[derive(Debug, Clone, Default)]
pub struct Email {
    controls: RuleControls,
}

impl Email {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WithControls for Email {
    fn controls_mut(&mut self) -> &mut RuleControls {
        &mut self.controls
    }
}

impl Rule for Email {
    fn name(&self) -> &'static str {
        "email"
    }

    fn handler(&self) -> &dyn RuleHandler {
        &EmailHandler
    }

    fn controls(&self) -> &RuleControls {
        &self.controls
    }

    fn options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert(
            "pattern".to_string(),
            Value::String(EMAIL_RE.as_str().to_string()),
        );
        self.controls.append_options(&mut options);
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct EmailHandler;

impl RuleHandler for EmailHandler {
    fn validate(
        &self,
        value: &Value,
        rule: &dyn Rule,
        _ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, RuleError> {
        expect_rule::<Email>(rule)?;
        let valid = value.as_str().is_some_and(|text| EMAIL_RE.is_match(text));
        let mut result = ValidationResult::new();
        if !valid {
            result.add_error(INVALID_MESSAGE);
        }
        Ok(result)
    }
}
