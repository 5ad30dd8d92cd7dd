//! Structured option dumps for rules (consumed by client-side mirrors).
//!
//! Every dump is a JSON object whose first key is `rule` (the rule name),
//! followed by the rule's own options in the order the rule emits them.

use serde_json::{Map, Value};

use crate::validation::rule::Rule;
use crate::validation::schema::Schema;

pub fn dump_rule(rule: &dyn Rule) -> Value {
    let mut dump = Map::new();
    dump.insert("rule".to_string(), Value::String(rule.name().to_string()));
    dump.extend(rule.options());
    Value::Object(dump)
}

pub fn dump_rules(rules: &[Box<dyn Rule>]) -> Value {
    Value::Array(rules.iter().map(|rule| dump_rule(rule.as_ref())).collect())
}

/// Dump a whole schema: object rules under `""`, then each field in
/// declaration order.
pub fn dump_schema(schema: &Schema) -> Value {
    let mut dump = Map::new();
    if !schema.object_rules().is_empty() {
        dump.insert(String::new(), dump_rules(schema.object_rules()));
    }
    for field in schema.fields() {
        dump.insert(field.name.clone(), dump_rules(&field.rules));
    }
    Value::Object(dump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;
    use crate::validation::rules::{Number, Required};
    use serde_json::json;

    #[test]
    fn dump_puts_rule_name_first() {
        let dump = dump_rule(&Number::new().max(2.0));
        let keys: Vec<&String> = dump.as_object().expect("object").keys().collect();
        assert_eq!(keys[0], "rule");
        assert_eq!(
            dump,
            json!({"rule": "number", "min": null, "max": 2.0, "skipOnEmpty": false, "skipOnError": false})
        );
    }

    #[test]
    fn schema_dump_lists_fields_in_order() {
        let schema = Schema::builder("Form")
            .field("z", rules![Required::new()])
            .field("a", rules![Required::new()])
            .build();
        let dump = dump_schema(&schema);
        let keys: Vec<&String> = dump.as_object().expect("object").keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }
}
