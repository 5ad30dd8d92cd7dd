//! End-to-end behavior of `on` rules through the validator.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

use scenarios::test_support::{Label, Opaque, class_rule_schema, user_schema};
use scenarios::validation::rules::Number;
use scenarios::validation::{Parameters, Schema, ValidationResult, Validator};
use scenarios::{On, ParamValue, SCENARIO_PARAMETER, rules};
use serde_json::json;

/// Field `a` with `on("test", max 1)` then an unconditional `on(max 2)`.
fn max_schema(negate: bool) -> Schema {
    Schema::builder("Data")
        .field(
            "a",
            rules![
                On::new("test", rules![Number::new().max(1.0)])
                    .expect("test rule")
                    .negated(negate),
                On::new(ParamValue::Null, rules![Number::new().max(2.0)])
                    .expect("unconditional rule")
                    .negated(negate),
            ],
        )
        .build()
}

fn run(schema: &Schema, scenario: Option<ParamValue>) -> ValidationResult {
    let mut params = Parameters::new();
    if let Some(scenario) = scenario {
        params.insert(SCENARIO_PARAMETER, scenario);
    }
    Validator::new()
        .validate(&json!({"a": 7}), schema, &params)
        .expect("validate")
}

fn messages_at(path: &str, messages: &[&str]) -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([(
        path.to_string(),
        messages.iter().map(|m| (*m).to_string()).collect(),
    )])
}

#[test]
fn without_scenario_only_unconditional_rule_applies() {
    let result = run(&max_schema(false), None);
    assert_eq!(
        result.error_messages_indexed_by_path(),
        messages_at("a", &["Value must be no greater than 2."])
    );
}

#[test]
fn matching_scenario_applies_both_rules() {
    let expected = messages_at(
        "a",
        &["Value must be no greater than 1.", "Value must be no greater than 2."],
    );
    let plain = run(&max_schema(false), Some("test".into()));
    assert_eq!(plain.error_messages_indexed_by_path(), expected);

    let stringable = run(
        &max_schema(false),
        Some(ParamValue::stringable(Label::new("test"))),
    );
    assert_eq!(stringable.error_messages_indexed_by_path(), expected);
}

#[test]
fn explicit_null_scenario_matches_absent_one() {
    let result = run(&max_schema(false), Some(ParamValue::Null));
    assert_eq!(
        result.error_messages_indexed_by_path(),
        messages_at("a", &["Value must be no greater than 2."])
    );
}

#[test]
fn negated_rules_without_scenario() {
    let result = run(&max_schema(true), Some(ParamValue::Null));
    assert_eq!(
        result.error_messages_indexed_by_path(),
        messages_at("a", &["Value must be no greater than 1."])
    );
}

#[test]
fn negated_rules_with_scenario() {
    let result = run(&max_schema(true), Some("test".into()));
    assert_eq!(
        result.error_messages_indexed_by_path(),
        messages_at("a", &["Value must be no greater than 2."])
    );
}

#[test]
fn unsupported_scenario_is_reported_at_root() {
    let params = Parameters::new().with(SCENARIO_PARAMETER, ParamValue::object(Opaque));
    let result = Validator::new()
        .validate_value(&json!(7), &rules![On::default()], &params)
        .expect("validate");
    let expected = format!(
        "Scenario must be null, a string or \"Stringable\" type, \"{}\" given.",
        std::any::type_name::<Opaque>()
    );
    assert_eq!(
        result.error_messages_indexed_by_path(),
        messages_at("", &[expected.as_str()])
    );
}

#[test]
fn user_form_login_and_register() {
    let schema = user_schema();
    let data = json!({"name": "Bob", "email": "bob@example.com", "password": "12345"});

    let login = Validator::new()
        .validate(&data, &schema, &Parameters::new().with(SCENARIO_PARAMETER, "login"))
        .expect("login");
    assert_eq!(
        login.error_messages_indexed_by_path(),
        messages_at("password", &["This value must contain at least 8 characters."])
    );

    let register = Validator::new()
        .validate(&data, &schema, &Parameters::new().with(SCENARIO_PARAMETER, "register"))
        .expect("register");
    let mut expected = messages_at("name", &["This value must contain at least 7 characters."]);
    expected.extend(messages_at(
        "password",
        &["This value must contain at least 8 characters."],
    ));
    assert_eq!(register.error_messages_indexed_by_path(), expected);

    let other = Validator::new()
        .validate(&data, &schema, &Parameters::new().with(SCENARIO_PARAMETER, "profile"))
        .expect("profile");
    assert!(other.is_valid());
}

#[test]
fn object_rule_reports_nested_and_root_errors() {
    let schema = class_rule_schema();
    let data = json!({"a": 1});

    let result = Validator::new()
        .validate(&data, &schema, &Parameters::new().with(SCENARIO_PARAMETER, "test"))
        .expect("validate");
    let mut expected = messages_at("", &["test error"]);
    expected.extend(messages_at("a", &["Value must be no less than 5."]));
    assert_eq!(result.error_messages_indexed_by_path(), expected);

    let skipped = Validator::new()
        .validate(&data, &schema, &Parameters::new())
        .expect("validate");
    assert!(skipped.is_valid());
}

#[test]
fn schema_is_shared_across_threads() {
    let schema = Arc::new(user_schema());
    let handles: Vec<_> = ["login", "register", "profile"]
        .into_iter()
        .map(|scenario| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let data = json!({"name": "Bob", "email": "bob@example.com", "password": "x"});
                let result = Validator::new()
                    .validate(
                        &data,
                        &schema,
                        &Parameters::new().with(SCENARIO_PARAMETER, scenario),
                    )
                    .expect("validate");
                (scenario, result.errors().len())
            })
        })
        .collect();

    let counts: BTreeMap<&str, usize> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread"))
        .collect();
    assert_eq!(
        counts,
        BTreeMap::from([("login", 1), ("profile", 0), ("register", 2)])
    );
}
