//! The `on` rule: apply nested rules only in selected scenarios.
//!
//! ```
//! use scenarios::rules;
//! use scenarios::validation::rules::{Length, Required};
//! use scenarios::validation::{Parameters, Schema, Validator};
//! use scenarios::On;
//!
//! let schema = Schema::builder("UserDto")
//!     .field(
//!         "password",
//!         rules![On::new(["login", "register"], rules![Required::new(), Length::new().min(8)]).unwrap()],
//!     )
//!     .build();
//!
//! let data = serde_json::json!({ "password": "short" });
//! let params = Parameters::new().with("scenario", "login");
//! let result = Validator::new().validate(&data, &schema, &params).unwrap();
//! assert!(!result.is_valid());
//! ```

mod handler;

pub use handler::OnHandler;

use std::any::Any;

use serde_json::{Map, Value};

use crate::core::scenario::{ParamValue, scenario_name};
use crate::error::ConfigError;
use crate::validation::dumper::dump_rules;
use crate::validation::rule::{AttachSite, Rule, RuleControls, RuleHandler, RuleSource, WithControls};

/// Declared scenarios for an [`On`] rule, before normalization.
#[derive(Debug, Clone, Default)]
pub enum ScenarioSpec {
    /// No scenario restriction.
    #[default]
    Always,
    One(ParamValue),
    Many(Vec<ParamValue>),
}

impl From<&str> for ScenarioSpec {
    fn from(name: &str) -> Self {
        Self::One(name.into())
    }
}

impl From<String> for ScenarioSpec {
    fn from(name: String) -> Self {
        Self::One(name.into())
    }
}

impl From<Option<&str>> for ScenarioSpec {
    fn from(name: Option<&str>) -> Self {
        name.map_or(Self::Always, Self::from)
    }
}

impl From<ParamValue> for ScenarioSpec {
    fn from(value: ParamValue) -> Self {
        if value.is_null() {
            Self::Always
        } else {
            Self::One(value)
        }
    }
}

impl From<Vec<ParamValue>> for ScenarioSpec {
    fn from(values: Vec<ParamValue>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for ScenarioSpec {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(ParamValue::from).collect())
    }
}

impl From<Vec<String>> for ScenarioSpec {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names.into_iter().map(ParamValue::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ScenarioSpec {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.into_iter().map(ParamValue::from).collect())
    }
}

impl ScenarioSpec {
    /// Normalize to `None` (unconditional) or the ordered list of names.
    pub fn normalize(self) -> Result<Option<Vec<String>>, ConfigError> {
        let values: Vec<ParamValue> = match self {
            Self::Always => return Ok(None),
            Self::One(value) if value.is_null() => return Ok(None),
            Self::One(ParamValue::Json(Value::Array(items))) => {
                items.into_iter().map(ParamValue::Json).collect()
            }
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        };
        values
            .iter()
            .map(|value| {
                scenario_name(value).map_err(|unsupported| ConfigError::InvalidScenario {
                    type_name: unsupported.type_name,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Scenario-gated rule list.
///
/// With no declared scenarios the nested rules always apply; negated, they
/// apply only while some scenario is active. With declared scenarios they
/// apply when the active scenario is one of them, or, negated, when it is not.
#[derive(Debug, Default)]
pub struct On {
    scenarios: Option<Vec<String>>,
    rules: Vec<Box<dyn Rule>>,
    negate: bool,
    controls: RuleControls,
}

impl On {
    pub fn new(
        scenario: impl Into<ScenarioSpec>,
        rules: impl Into<RuleSource>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            scenarios: scenario.into().normalize()?,
            rules: rules.into().into_rules(),
            negate: false,
            controls: RuleControls::default(),
        })
    }

    /// Invert the scenario check.
    pub fn negated(mut self, negate: bool) -> Self {
        self.negate = negate;
        self
    }

    pub fn scenarios(&self) -> Option<&[String]> {
        self.scenarios.as_deref()
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn is_negated(&self) -> bool {
        self.negate
    }
}

impl WithControls for On {
    fn controls_mut(&mut self) -> &mut RuleControls {
        &mut self.controls
    }
}

impl Rule for On {
    fn name(&self) -> &'static str {
        "on"
    }

    fn handler(&self) -> &dyn RuleHandler {
        &OnHandler
    }

    fn controls(&self) -> &RuleControls {
        &self.controls
    }

    fn options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert(
            "scenarios".to_string(),
            self.scenarios
                .as_ref()
                .map_or(Value::Null, |names| Value::from(names.clone())),
        );
        options.insert("rules".to_string(), dump_rules(&self.rules));
        options.insert("not".to_string(), Value::Bool(self.negate));
        self.controls.append_options(&mut options);
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn after_attach(&mut self, site: &AttachSite) {
        for rule in &mut self.rules {
            rule.after_attach(site);
        }
    }
}
