//! Field dropper transformer
//!
//! Removes top-level fields from workflow documents. The n8n API rejects
//! server-managed fields on create and update, so they are stripped before
//! a push.

use crate::etl::Transformer;
use eyre::Result;
use serde_json::Value;

/// Fields the n8n API owns and refuses in request bodies
pub const N8N_READ_ONLY_FIELDS: &[&str] = &[
    "id",
    "active",
    "tags",
    "createdAt",
    "updatedAt",
    "versionId",
    "meta",
    "pinData",
    "shared",
    "isArchived",
    "triggerCount",
];

/// Transformer that drops specified fields from objects
///
/// # Example
/// ```
/// use n8n_builder::transform::FieldDropper;
/// use n8n_builder::etl::Transformer;
/// use serde_json::json;
///
/// let dropper = FieldDropper::new(vec!["createdAt", "versionId"]);
/// let input = json!({
///     "name": "Daily report",
///     "createdAt": "2024-01-01T00:00:00.000Z",
///     "versionId": "3f2a",
/// });
///
/// let output = dropper.transform(input).unwrap();
/// assert_eq!(output, json!({"name": "Daily report"}));
/// ```
pub struct FieldDropper {
    fields: Vec<String>,
}

impl FieldDropper {
    pub fn new(fields: Vec<&str>) -> Self {
        Self {
            fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Drops the fields in [`N8N_READ_ONLY_FIELDS`]
    pub fn n8n_read_only_fields() -> Self {
        Self::new(N8N_READ_ONLY_FIELDS.to_vec())
    }
}

impl Transformer for FieldDropper {
    type Input = Value;
    type Output = Value;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        if let Some(obj) = input.as_object_mut() {
            for field in &self.fields {
                obj.remove(field);
            }
        }
        Ok(input)
    }
}
