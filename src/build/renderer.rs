//! Placeholder substitution for workflow templates
//!
//! String values in a template may contain `{{ param }}` placeholders, filled
//! from the definition's parameters, and `{{ secret:KEY }}` placeholders,
//! filled from the env file. A string that is exactly one parameter
//! placeholder takes the parameter's type, so `"{{ retries }}"` can become
//! the number `3`.

use super::TemplateSource;
use crate::error::{Error, Result};
use crate::etl::Transformer;
use crate::storage::Secrets;
use crate::workflow::Workflow;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*(secret:)?\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("valid placeholder regex")
});

/// Transformer that renders a template into a named workflow
pub struct TemplateRenderer {
    secrets: Secrets,
}

/// Values available while rendering one workflow
struct Scope<'a> {
    workflow: &'a str,
    parameters: BTreeMap<String, Value>,
    secrets: &'a Secrets,
}

impl TemplateRenderer {
    pub fn new(secrets: Secrets) -> Self {
        Self { secrets }
    }

    /// Render a single template source
    pub fn render(&self, source: TemplateSource) -> Result<Workflow> {
        let name = source.definition.name;

        let parameters = source
            .definition
            .parameters
            .into_iter()
            .map(|(key, value)| {
                serde_json::to_value(value)
                    .map(|value| (key.clone(), value))
                    .map_err(|e| Error::Render {
                        workflow: name.clone(),
                        reason: format!("parameter '{}' is not representable as JSON: {}", key, e),
                    })
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        let scope = Scope {
            workflow: &name,
            parameters,
            secrets: &self.secrets,
        };

        let mut document = source.template;
        if !document.is_object() {
            return Err(Error::Render {
                workflow: name,
                reason: "template is not a JSON object".to_string(),
            });
        }
        scope.render_value(&mut document)?;

        let mut workflow = Workflow::new(name, document);
        workflow.stamp_name();
        Ok(workflow)
    }
}

impl Scope<'_> {
    fn render_value(&self, value: &mut Value) -> Result<()> {
        match value {
            Value::String(s) => {
                if let Some(rendered) = self.render_string(s)? {
                    *value = rendered;
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.render_value(item)?;
                }
            }
            Value::Object(map) => {
                for (_, item) in map.iter_mut() {
                    self.render_value(item)?;
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
        Ok(())
    }

    /// Returns `None` when the string holds no placeholders
    fn render_string(&self, s: &str) -> Result<Option<Value>> {
        if !PLACEHOLDER.is_match(s) {
            return Ok(None);
        }

        // A lone parameter placeholder keeps the parameter's JSON type
        if let Some(caps) = PLACEHOLDER.captures(s) {
            let whole = caps.get(0).map(|m| m.as_str().len()) == Some(s.len());
            if whole && caps.get(1).is_none() {
                return self.parameter(&caps[2]).map(|v| Some(v.clone()));
            }
        }

        let mut failure = None;
        let rendered = PLACEHOLDER.replace_all(s, |caps: &Captures| {
            match self.lookup_text(caps) {
                Ok(text) => text,
                Err(e) => {
                    failure.get_or_insert(e);
                    String::new()
                }
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(Some(Value::String(rendered.into_owned()))),
        }
    }

    fn lookup_text(&self, caps: &Captures) -> Result<String> {
        let key = &caps[2];
        if caps.get(1).is_some() {
            return self.secrets.required(key);
        }

        Ok(match self.parameter(key)? {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    fn parameter(&self, key: &str) -> Result<&Value> {
        self.parameters.get(key).ok_or_else(|| Error::Render {
            workflow: self.workflow.to_string(),
            reason: format!("unknown parameter '{}'", key),
        })
    }
}

impl Transformer for TemplateRenderer {
    type Input = TemplateSource;
    type Output = Workflow;

    fn transform(&self, input: Self::Input) -> eyre::Result<Self::Output> {
        Ok(self.render(input)?)
    }
}
