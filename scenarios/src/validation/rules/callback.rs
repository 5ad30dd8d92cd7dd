//! `callback`: rules backed by a closure.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::RuleError;
use crate::validation::context::ValidationContext;
use crate::validation::result::ValidationResult;
use crate::validation::rule::{
    AttachSite, Rule, RuleControls, RuleHandler, WithControls, expect_rule,
};

pub type CallbackFn = Arc<dyn Fn(&Value, &ValidationContext<'_>) -> ValidationResult + Send + Sync>;

/// Rule backed by a closure. Remembers the schema site it was attached to.
#[derive(Clone)]
pub struct Callback {
    callback: CallbackFn,
    site: Option<AttachSite>,
    controls: RuleControls,
}

impl Callback {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Value, &ValidationContext<'_>) -> ValidationResult + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
            site: None,
            controls: RuleControls::default(),
        }
    }

    pub fn site(&self) -> Option<&AttachSite> {
        self.site.as_ref()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("site", &self.site)
            .field("controls", &self.controls)
            .finish_non_exhaustive()
    }
}

impl WithControls for Callback {
    fn controls_mut(&mut self) -> &mut RuleControls {
        &mut self.controls
    }
}

impl Rule for Callback {
    fn name(&self) -> &'static str {
        "callback"
    }

    fn handler(&self) -> &dyn RuleHandler {
        &CallbackHandler
    }

    fn controls(&self) -> &RuleControls {
        &self.controls
    }

    fn options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        self.controls.append_options(&mut options);
        options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn after_attach(&mut self, site: &AttachSite) {
        self.site = Some(site.clone());
    }
}

pub struct CallbackHandler;

impl RuleHandler for CallbackHandler {
    fn validate(
        &self,
        value: &Value,
        rule: &dyn Rule,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, RuleError> {
        let rule = expect_rule::<Callback>(rule)?;
        Ok((rule.callback)(value, ctx))
    }
}
