//! Scenario match predicate.
//!
//! Decides whether a scenario-gated rule applies:
//! - No declared scenarios: applies always; negated, applies only when some
//!   scenario is active.
//! - Declared scenarios: applies when the active scenario is one of them
//!   (exact, case-sensitive). Negation is the exact complement. No active
//!   scenario is never a member.

/// Return `true` when rules gated by `declared` / `negate` apply under `active`.
pub fn scenario_matches(declared: Option<&[String]>, negate: bool, active: Option<&str>) -> bool {
    match declared {
        None => !negate || active.is_some(),
        Some(names) => {
            let member = active.is_some_and(|active| names.iter().any(|name| name == active));
            member != negate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn unconditional_always_matches() {
        assert!(scenario_matches(None, false, None));
        assert!(scenario_matches(None, false, Some("login")));
    }

    /// Negating "always" matches only when a scenario is set.
    #[test]
    fn unconditional_negated_requires_active_scenario() {
        assert!(!scenario_matches(None, true, None));
        assert!(scenario_matches(None, true, Some("login")));
        assert!(scenario_matches(None, true, Some("")));
    }

    #[test]
    fn membership_is_exact_and_case_sensitive() {
        let declared = names(&["login", "register"]);
        assert!(scenario_matches(Some(declared.as_slice()), false, Some("login")));
        assert!(!scenario_matches(Some(declared.as_slice()), false, Some("Login")));
        assert!(!scenario_matches(Some(declared.as_slice()), false, Some(" login")));
        assert!(!scenario_matches(Some(declared.as_slice()), false, None));
    }

    #[test]
    fn negation_complements_declared_sets() {
        let sets = [names(&[]), names(&["x"]), names(&["x", "y"])];
        let actives = [None, Some("x"), Some("y"), Some("z"), Some("")];
        for declared in &sets {
            for active in actives {
                assert_eq!(
                    scenario_matches(Some(declared.as_slice()), true, active),
                    !scenario_matches(Some(declared.as_slice()), false, active),
                    "declared={declared:?} active={active:?}"
                );
            }
        }
    }

    #[test]
    fn negated_set_with_no_scenario_matches() {
        let declared = names(&["test"]);
        assert!(scenario_matches(Some(declared.as_slice()), true, None));
    }

    #[test]
    fn empty_declared_set_never_matches() {
        let declared = names(&[]);
        assert!(!scenario_matches(Some(declared.as_slice()), false, Some("x")));
        assert!(!scenario_matches(Some(declared.as_slice()), false, None));
    }
}
