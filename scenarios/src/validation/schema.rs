//! Rules attached to an object shape and its fields.
//!
//! A [`Schema`] is assembled once by [`SchemaBuilder`] and read-only afterwards;
//! share it behind an `Arc` to validate from several threads. Each attached
//! rule receives [`Rule::after_attach`] with its [`AttachSite`] as it is added.

use crate::validation::rule::{AttachSite, Rule};

#[derive(Debug)]
pub struct Schema {
    type_name: String,
    object_rules: Vec<Box<dyn Rule>>,
    fields: Vec<FieldRules>,
}

#[derive(Debug)]
pub struct FieldRules {
    pub name: String,
    pub rules: Vec<Box<dyn Rule>>,
}

impl Schema {
    pub fn builder(type_name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            schema: Schema {
                type_name: type_name.into(),
                object_rules: Vec::new(),
                fields: Vec::new(),
            },
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Rules run against the whole document.
    pub fn object_rules(&self) -> &[Box<dyn Rule>] {
        &self.object_rules
    }

    /// Field rules, in declaration order.
    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&[Box<dyn Rule>]> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.rules.as_slice())
    }
}

pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn object_rule<R: Rule + 'static>(self, rule: R) -> Self {
        self.object_rules(vec![Box::new(rule) as Box<dyn Rule>])
    }

    /// Attach rules to the whole object. Repeatable; rules accumulate.
    pub fn object_rules(mut self, rules: Vec<Box<dyn Rule>>) -> Self {
        let site = AttachSite::Object {
            type_name: self.schema.type_name.clone(),
        };
        self.schema.object_rules.extend(attach(rules, &site));
        self
    }

    /// Attach rules to a field. Repeatable; a second call for the same field
    /// appends to its existing rules.
    pub fn field(mut self, name: impl Into<String>, rules: Vec<Box<dyn Rule>>) -> Self {
        let name = name.into();
        let site = AttachSite::Field {
            type_name: self.schema.type_name.clone(),
            field: name.clone(),
        };
        let rules = attach(rules, &site);
        match self.schema.fields.iter_mut().find(|field| field.name == name) {
            Some(existing) => existing.rules.extend(rules),
            None => self.schema.fields.push(FieldRules { name, rules }),
        }
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

fn attach(mut rules: Vec<Box<dyn Rule>>, site: &AttachSite) -> Vec<Box<dyn Rule>> {
    for rule in &mut rules {
        rule.after_attach(site);
    }
    rules
}
