//! Minimal rule engine hosting the scenario rule.
//!
//! Rules are configuration objects implementing [`Rule`]; each names a
//! stateless [`RuleHandler`] that performs the check. The [`Validator`]
//! dispatches rules, applies their [`RuleControls`], and prefixes error paths
//! as results bubble up through fields.

pub mod context;
pub mod dumper;
pub mod result;
pub mod rule;
pub mod rules;
pub mod schema;
pub mod validator;

pub use context::{Parameters, ValidationContext};
pub use result::{ValidationError, ValidationResult};
pub use rule::{
    AttachSite, Rule, RuleControls, RuleHandler, RuleSource, SkipOnEmpty, WithControls,
    expect_rule,
};
pub use schema::{Schema, SchemaBuilder};
pub use validator::Validator;
