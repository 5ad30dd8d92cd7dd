//! Declarative schema files (TOML).
//!
//! A schema file lists rules for the whole object and for each field. Rule
//! declarations are tagged by `rule`:
//!
//! ```toml
//! type = "UserDto"
//!
//! [[fields]]
//! name = "password"
//! rules = [
//!   { rule = "on", scenario = ["login", "register"], rules = [
//!     { rule = "required" },
//!     { rule = "length", min = 8 },
//!   ] },
//! ]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;

use crate::core::scenario::ParamValue;
use crate::error::ConfigError;
use crate::on::{On, ScenarioSpec};
use crate::validation::rules::{Email, InRange, Length, Nested, Number, Required};
use crate::validation::{Rule, Schema, SkipOnEmpty, WithControls};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Name of the validated shape, reported to attached rules.
    #[serde(rename = "type", default = "default_type_name")]
    pub type_name: String,
    /// Rules for the whole document.
    #[serde(default)]
    pub object: Vec<RuleDecl>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

fn default_type_name() -> String {
    "Document".to_string()
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<RuleDecl>,
}

/// Options shared by every rule declaration.
///
/// Flattened into each rule, so it also collects keys no rule option claimed;
/// [`SchemaFile::validate`] rejects those.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ControlsDecl {
    #[serde(default)]
    pub skip_on_empty: bool,
    #[serde(default)]
    pub skip_on_error: bool,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleDecl {
    On {
        /// A name, a list of names, or absent for "always".
        #[serde(default, alias = "scenarios")]
        scenario: Option<Value>,
        #[serde(default)]
        rules: Vec<RuleDecl>,
        #[serde(default)]
        not: bool,
        #[serde(flatten)]
        controls: ControlsDecl,
    },
    Required {
        #[serde(flatten)]
        controls: ControlsDecl,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        #[serde(flatten)]
        controls: ControlsDecl,
    },
    Length {
        min: Option<usize>,
        max: Option<usize>,
        #[serde(flatten)]
        controls: ControlsDecl,
    },
    InRange {
        values: Vec<Value>,
        #[serde(default)]
        strict: bool,
        #[serde(default)]
        not: bool,
        #[serde(flatten)]
        controls: ControlsDecl,
    },
    Email {
        #[serde(flatten)]
        controls: ControlsDecl,
    },
    Nested {
        #[serde(default)]
        fields: Vec<FieldDecl>,
        #[serde(flatten)]
        controls: ControlsDecl,
    },
}

impl RuleDecl {
    /// The `rule` tag as written in the file.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::On { .. } => "on",
            Self::Required { .. } => "required",
            Self::Number { .. } => "number",
            Self::Length { .. } => "length",
            Self::InRange { .. } => "in_range",
            Self::Email { .. } => "email",
            Self::Nested { .. } => "nested",
        }
    }

    pub fn controls(&self) -> &ControlsDecl {
        match self {
            Self::On { controls, .. }
            | Self::Required { controls }
            | Self::Number { controls, .. }
            | Self::Length { controls, .. }
            | Self::InRange { controls, .. }
            | Self::Email { controls }
            | Self::Nested { controls, .. } => controls,
        }
    }
}

impl SchemaFile {
    /// Load and check a schema file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read schema {}", path.display()))?;
        Self::parse_str(&contents).with_context(|| format!("load schema {}", path.display()))
    }

    pub fn parse_str(contents: &str) -> Result<Self> {
        let file: SchemaFile = toml::from_str(contents).context("parse schema toml")?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<()> {
        if self.type_name.trim().is_empty() {
            bail!("type must be non-empty");
        }
        validate_rules(&self.object, "object")?;
        validate_fields(&self.fields, "fields")
    }

    /// Build the runtime schema. Scenario values of the wrong type surface here.
    pub fn to_schema(&self) -> Result<Schema, ConfigError> {
        let mut builder = Schema::builder(self.type_name.clone())
            .object_rules(build_rules(&self.object)?);
        for field in &self.fields {
            builder = builder.field(field.name.clone(), build_rules(&field.rules)?);
        }
        Ok(builder.build())
    }
}

fn validate_fields(fields: &[FieldDecl], at: &str) -> Result<()> {
    for field in fields {
        if field.name.trim().is_empty() {
            bail!("{at}: field name must be non-empty");
        }
        validate_rules(&field.rules, &format!("{at}.{}", field.name))?;
    }
    Ok(())
}

fn validate_rules(rules: &[RuleDecl], at: &str) -> Result<()> {
    for rule in rules {
        if let Some(key) = rule.controls().unknown.keys().next() {
            bail!("{at}: unknown key '{key}' in '{}' rule", rule.tag());
        }
        match rule {
            RuleDecl::On { rules, .. } => validate_rules(rules, &format!("{at}.on"))?,
            RuleDecl::Number {
                min: Some(min),
                max: Some(max),
                ..
            } if min > max => bail!("{at}: number min {min} exceeds max {max}"),
            RuleDecl::Length {
                min: Some(min),
                max: Some(max),
                ..
            } if min > max => bail!("{at}: length min {min} exceeds max {max}"),
            RuleDecl::Nested { fields, .. } => validate_fields(fields, &format!("{at}.nested"))?,
            _ => {}
        }
    }
    Ok(())
}

fn build_rules(decls: &[RuleDecl]) -> Result<Vec<Box<dyn Rule>>, ConfigError> {
    decls.iter().map(build_rule).collect()
}

fn build_rule(decl: &RuleDecl) -> Result<Box<dyn Rule>, ConfigError> {
    let rule: Box<dyn Rule> = match decl {
        RuleDecl::On {
            scenario,
            rules,
            not,
            controls,
        } => {
            let spec = scenario
                .clone()
                .map_or(ScenarioSpec::Always, |value| ParamValue::from(value).into());
            let on = On::new(spec, build_rules(rules)?)?.negated(*not);
            Box::new(apply_controls(on, controls))
        }
        RuleDecl::Required { controls } => Box::new(apply_controls(Required::new(), controls)),
        RuleDecl::Number { min, max, controls } => {
            let mut number = Number::new();
            if let Some(min) = min {
                number = number.min(*min);
            }
            if let Some(max) = max {
                number = number.max(*max);
            }
            Box::new(apply_controls(number, controls))
        }
        RuleDecl::Length { min, max, controls } => {
            let mut length = Length::new();
            if let Some(min) = min {
                length = length.min(*min);
            }
            if let Some(max) = max {
                length = length.max(*max);
            }
            Box::new(apply_controls(length, controls))
        }
        RuleDecl::InRange {
            values,
            strict,
            not,
            controls,
        } => {
            if values.is_empty() {
                return Err(ConfigError::InvalidRule {
                    rule: "inRange",
                    message: "values must be non-empty".to_string(),
                });
            }
            Box::new(apply_controls(
                InRange::new(values.clone()).strict(*strict).not(*not),
                controls,
            ))
        }
        RuleDecl::Email { controls } => Box::new(apply_controls(Email::new(), controls)),
        RuleDecl::Nested { fields, controls } => {
            let mut nested = Nested::new();
            for field in fields {
                nested = nested.field(field.name.clone(), build_rules(&field.rules)?);
            }
            Box::new(apply_controls(nested, controls))
        }
    };
    Ok(rule)
}

fn apply_controls<R: WithControls>(rule: R, controls: &ControlsDecl) -> R {
    rule.skip_on_empty(SkipOnEmpty::from(controls.skip_on_empty))
        .skip_on_error(controls.skip_on_error)
}
