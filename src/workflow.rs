//! Workflow documents and their on-disk names

use eyre::{Result, eyre};
use serde_json::Value;

/// A named n8n workflow document.
///
/// The name is the identity used for file names and for matching against
/// the server. The document is kept as an opaque JSON tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    pub name: String,
    pub document: Value,
}

impl Workflow {
    pub fn new(name: impl Into<String>, document: Value) -> Self {
        Self {
            name: name.into(),
            document,
        }
    }

    /// Take the name from the document's `name` field
    pub fn from_document(document: Value) -> Result<Self> {
        let name = document
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| eyre!("Workflow missing 'name' field"))?
            .to_string();
        if name.trim().is_empty() {
            return Err(eyre!("Workflow has an empty 'name'"));
        }
        Ok(Self { name, document })
    }

    /// File name used for this workflow, `<name>.json`.
    ///
    /// Path separators in the name are replaced with `_`.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name.replace(['/', '\\'], "_"))
    }

    /// Set the document's `name` field to the workflow name
    pub fn stamp_name(&mut self) {
        if let Some(obj) = self.document.as_object_mut() {
            obj.insert("name".to_string(), Value::String(self.name.clone()));
        }
    }
}
