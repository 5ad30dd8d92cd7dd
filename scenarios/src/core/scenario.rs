//! Scenario values and their normalization to `Option<String>`.
//!
//! Scenario values arrive from two places: rule declarations (construction
//! time) and the validation context (evaluation time). Both go through the
//! same closed set of [`ParamValue`] variants; only strings and
//! [`Stringable`] objects are accepted as scenario names.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Context parameter key holding the active scenario.
pub const SCENARIO_PARAMETER: &str = "scenario";

/// An object with a canonical string form usable as a scenario name.
pub trait Stringable: fmt::Debug + Send + Sync {
    fn to_display_string(&self) -> String;
}

/// A context parameter or declared scenario value.
#[derive(Debug, Clone)]
pub enum ParamValue {
    Null,
    String(String),
    Stringable(Arc<dyn Stringable>),
    /// Any JSON value (strings and null here behave like the dedicated variants).
    Json(Value),
    /// An arbitrary object, carried with its type name for diagnostics.
    Object {
        type_name: &'static str,
        value: Arc<dyn Any + Send + Sync>,
    },
}

impl ParamValue {
    pub fn stringable<S: Stringable + 'static>(value: S) -> Self {
        Self::Stringable(Arc::new(value))
    }

    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Self::Object {
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Json(Value::Null))
    }

    /// Runtime type label used in error messages.
    pub fn debug_type(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::String(_) => "string".to_string(),
            Self::Stringable(_) => "Stringable".to_string(),
            Self::Json(value) => json_type(value).to_string(),
            Self::Object { type_name, .. } => (*type_name).to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(text) => Self::String(text),
            other => Self::Json(other),
        }
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A value that cannot serve as a scenario name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedScenario {
    pub type_name: String,
}

/// Normalize a runtime scenario value: null stays `None`, strings and
/// [`Stringable`] objects become `Some(text)`, anything else is unsupported.
pub fn normalize_scenario(value: &ParamValue) -> Result<Option<String>, UnsupportedScenario> {
    match value {
        ParamValue::Null | ParamValue::Json(Value::Null) => Ok(None),
        other => scenario_name(other).map(Some),
    }
}

/// Normalize a declared scenario name. Null is rejected.
pub fn scenario_name(value: &ParamValue) -> Result<String, UnsupportedScenario> {
    match value {
        ParamValue::String(text) | ParamValue::Json(Value::String(text)) => Ok(text.clone()),
        ParamValue::Stringable(inner) => Ok(inner.to_display_string()),
        other => Err(UnsupportedScenario {
            type_name: other.debug_type(),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
