//! Error types for rule construction and rule dispatch.
//!
//! Invalid *runtime* input (e.g. a bad scenario value in the context) is not an
//! error here: it is reported through [`ValidationResult`] like any other
//! validation failure.
//!
//! [`ValidationResult`]: crate::validation::ValidationResult

use thiserror::Error;

/// Invalid rule configuration, raised while building a rule or schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A declared scenario is neither a string nor [`Stringable`](crate::Stringable).
    #[error(
        "Scenario must be null, a string, or an array of strings or an array of \"Stringable\", \"{type_name}\" given."
    )]
    InvalidScenario { type_name: String },

    /// A rule declaration has inconsistent options.
    #[error("invalid '{rule}' rule: {message}")]
    InvalidRule { rule: &'static str, message: String },
}

/// Contract violation between the validator and a rule handler.
///
/// Returned when a handler receives a rule of a kind it does not handle. This
/// is a wiring bug, never user input, so the validator aborts instead of
/// recording a validation message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("Expected \"{expected}\", but \"{given}\" given.")]
    UnexpectedRule {
        expected: &'static str,
        given: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_scenario_message_names_type() {
        let err = ConfigError::InvalidScenario {
            type_name: "int".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Scenario must be null, a string, or an array of strings or an array of \"Stringable\", \"int\" given."
        );
    }

    #[test]
    fn unexpected_rule_message_names_both_kinds() {
        let err = RuleError::UnexpectedRule {
            expected: "scenarios::on::On",
            given: "scenarios::validation::rules::number::Number",
        };
        assert_eq!(
            err.to_string(),
            "Expected \"scenarios::on::On\", but \"scenarios::validation::rules::number::Number\" given."
        );
    }
}
