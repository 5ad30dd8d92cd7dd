//! Built-in rules.

pub mod callback;
pub mod email;
pub mod in_range;
pub mod length;
pub mod nested;
pub mod number;
pub mod required;

pub use callback::Callback;
pub use email::Email;
pub use in_range::InRange;
pub use length::Length;
pub use nested::Nested;
pub use number::Number;
pub use required::Required;

use serde_json::Value;

/// Render a bound for messages: integral values without a fraction.
pub(crate) fn format_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// Numeric view of a JSON value; numeric strings count.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

pub(crate) fn option_number(bound: Option<f64>) -> Value {
    bound.map_or(Value::Null, Value::from)
}
