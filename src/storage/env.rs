//! Secrets sourced from a dotenv file
//!
//! The env file is parsed with `dotenvy` without touching the process
//! environment. Lookups check the file first, then fall back to the
//! environment so CI jobs can inject secrets directly.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct Secrets {
    values: HashMap<String, String>,
    env_file: PathBuf,
}

impl Secrets {
    /// Load secrets from a dotenv file.
    ///
    /// A missing file yields an empty set backed only by the environment.
    pub fn load(env_file: impl AsRef<Path>) -> Result<Self> {
        let env_file = env_file.as_ref().to_path_buf();

        if !env_file.exists() {
            log::debug!(
                "Env file {} not found, using process environment only",
                env_file.display()
            );
            return Ok(Self {
                values: HashMap::new(),
                env_file,
            });
        }

        let iter = dotenvy::from_filename_iter(&env_file)
            .map_err(|e| Error::parse(&env_file, e))?;

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| Error::parse(&env_file, e))?;
            values.insert(key, value);
        }

        log::debug!("Loaded {} secret(s) from {}", values.len(), env_file.display());

        Ok(Self { values, env_file })
    }

    /// Look up a secret that may be absent
    pub fn optional(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .filter(|v| !v.is_empty())
    }

    /// Look up a secret that must be present
    pub fn required(&self, key: &str) -> Result<String> {
        self.optional(key).ok_or_else(|| Error::MissingSecret {
            key: key.to_string(),
            env_file: self.env_file.clone(),
        })
    }
}

// Values stay out of debug output
impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("Secrets")
            .field("env_file", &self.env_file)
            .field("keys", &keys)
            .finish()
    }
}
