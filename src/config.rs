//! Build configuration
//!
//! The configuration is a YAML file describing where built and pulled
//! workflows live, which n8n instance to talk to, and which workflows to
//! render:
//!
//! ```yaml
//! output_dir: workflows/built
//! pulled_dir: workflows/pulled
//! n8n_instance:
//!   url: https://n8n.example.com
//!   api_key_env: N8N_API_KEY
//! workflows:
//!   - name: daily-report
//!     template: templates/report.json
//!     parameters:
//!       channel: "#reports"
//! ```
//!
//! Relative paths are resolved against the directory holding the config
//! file, so commands behave the same from any working directory.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use url::Url;

/// Connection settings for the n8n instance
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct N8nInstance {
    pub url: Url,
    /// Name of the secret holding the API key
    pub api_key_env: String,
}

/// A workflow rendered by `build`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WorkflowDefinition {
    pub name: String,
    /// JSON5 template file
    pub template: PathBuf,
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_pulled_dir")]
    pub pulled_dir: PathBuf,
    pub n8n_instance: N8nInstance,
    #[serde(default)]
    pub workflows: Vec<WorkflowDefinition>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("workflows/built")
}

fn default_pulled_dir() -> PathBuf {
    PathBuf::from("workflows/pulled")
}

impl BuildConfig {
    /// Read, resolve and validate a config file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::from_yaml_str(&content, base_dir).map_err(|reason| Error::Config {
            path: path.to_path_buf(),
            reason,
        })?;

        log::debug!(
            "Loaded config {} with {} workflow definition(s)",
            path.display(),
            config.workflows.len()
        );
        Ok(config)
    }

    /// Parse config text, resolving relative paths against `base_dir`
    pub fn from_yaml_str(content: &str, base_dir: &Path) -> std::result::Result<Self, String> {
        let mut config: Self = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;

        config.output_dir = base_dir.join(&config.output_dir);
        config.pulled_dir = base_dir.join(&config.pulled_dir);
        for workflow in &mut config.workflows {
            workflow.template = base_dir.join(&workflow.template);
        }

        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        match self.n8n_instance.url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(format!(
                    "n8n_instance.url must use http or https, got '{}'",
                    other
                ));
            }
        }

        if self.n8n_instance.api_key_env.trim().is_empty() {
            return Err("n8n_instance.api_key_env must not be empty".to_string());
        }

        let mut seen = HashSet::new();
        for workflow in &self.workflows {
            if workflow.name.trim().is_empty() {
                return Err("workflow name must not be empty".to_string());
            }
            if workflow.name.contains(['/', '\\']) {
                return Err(format!(
                    "workflow name '{}' must not contain path separators",
                    workflow.name
                ));
            }
            if !seen.insert(workflow.name.as_str()) {
                return Err(format!("duplicate workflow name '{}'", workflow.name));
            }
        }

        Ok(())
    }
}
