//! Scenario-gated validation rules.
//!
//! The [`On`] rule wraps a list of nested rules and applies them only when the
//! `scenario` parameter of the validation context matches one of its declared
//! scenarios (or does *not* match, when negated). One data shape can then carry
//! rules for several use cases, e.g. `login` and `register` forms.
//!
//! The crate is split like this:
//!
//! - **[`core`]**: Pure scenario logic (value normalization, the match
//!   predicate). No I/O, no rule engine types.
//! - **[`validation`]**: A small rule engine hosting [`On`]: the [`Rule`]
//!   and [`RuleHandler`] traits, contexts, results, schemas and built-in rules.
//! - **[`io`]**: Loading TOML schema declarations and JSON documents.
//!
//! [`check`] wires these together for the `scenarios` binary.
//!
//! ```
//! use scenarios::rules;
//! use scenarios::validation::rules::Number;
//! use scenarios::validation::{Parameters, Schema, Validator};
//! use scenarios::On;
//!
//! let schema = Schema::builder("Form")
//!     .field("age", rules![On::new("adult", rules![Number::new().min(18.0)]).unwrap()])
//!     .build();
//! let data = serde_json::json!({ "age": 12 });
//!
//! let guest = Validator::new()
//!     .validate(&data, &schema, &Parameters::new().with("scenario", "guest"))
//!     .unwrap();
//! assert!(guest.is_valid());
//!
//! let adult = Validator::new()
//!     .validate(&data, &schema, &Parameters::new().with("scenario", "adult"))
//!     .unwrap();
//! assert_eq!(adult.error_messages(), vec!["Value must be no less than 18."]);
//! ```

pub mod check;
pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod on;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validation;

pub use crate::core::scenario::{ParamValue, SCENARIO_PARAMETER, Stringable};
pub use crate::error::{ConfigError, RuleError};
pub use crate::on::{On, OnHandler, ScenarioSpec};
pub use crate::validation::{Rule, RuleHandler};

/// Box a list of rules into the `Vec<Box<dyn Rule>>` the engine works with.
///
/// ```
/// use scenarios::rules;
/// use scenarios::validation::rules::{Number, Required};
///
/// let list = rules![Required::new(), Number::new().max(10.0)];
/// assert_eq!(list.len(), 2);
/// ```
#[macro_export]
macro_rules! rules {
    ($($rule:expr),* $(,)?) => {
        vec![$(::std::boxed::Box::new($rule) as ::std::boxed::Box<dyn $crate::validation::Rule>),*]
    };
}
