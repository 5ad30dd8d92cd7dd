//! Evaluation of the `on` rule.

use serde_json::Value;
use tracing::debug;

use super::On;
use crate::core::matcher::scenario_matches;
use crate::core::scenario::{SCENARIO_PARAMETER, normalize_scenario};
use crate::error::RuleError;
use crate::validation::context::ValidationContext;
use crate::validation::result::ValidationResult;
use crate::validation::rule::{Rule, RuleHandler, expect_rule};

/// Reads the active scenario from the context and, on a match, runs the
/// nested rules under the same context. On a mismatch nothing is evaluated
/// and the result is empty.
///
/// A scenario parameter of an unsupported type is reported as a single
/// validation error, not as `Err`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnHandler;

impl RuleHandler for OnHandler {
    fn validate(
        &self,
        value: &Value,
        rule: &dyn Rule,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, RuleError> {
        let rule = expect_rule::<On>(rule)?;

        let raw = ctx.parameter(SCENARIO_PARAMETER);
        let scenario = match raw.map_or(Ok(None), normalize_scenario) {
            Ok(scenario) => scenario,
            Err(unsupported) => {
                debug!(type_name = %unsupported.type_name, "unsupported scenario parameter");
                return Ok(ValidationResult::new().with_error(format!(
                    "Scenario must be null, a string or \"Stringable\" type, \"{}\" given.",
                    unsupported.type_name
                )));
            }
        };

        if !scenario_matches(rule.scenarios(), rule.is_negated(), scenario.as_deref()) {
            debug!(
                scenario = scenario.as_deref().unwrap_or("<none>"),
                negated = rule.is_negated(),
                "scenario rules skipped"
            );
            return Ok(ValidationResult::new());
        }

        debug!(
            scenario = scenario.as_deref().unwrap_or("<none>"),
            rules = rule.rules().len(),
            "scenario rules applied"
        );
        ctx.validate(value, rule.rules())
    }
}
