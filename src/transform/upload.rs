//! Prepares built workflows for upload

use super::FieldDropper;
use crate::etl::Transformer;
use crate::workflow::Workflow;
use eyre::Result;

/// Strips read-only fields and sets `name` to the file's base name
pub struct UploadPreparer {
    dropper: FieldDropper,
}

impl UploadPreparer {
    pub fn new() -> Self {
        Self {
            dropper: FieldDropper::n8n_read_only_fields(),
        }
    }
}

impl Default for UploadPreparer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for UploadPreparer {
    type Input = Workflow;
    type Output = Workflow;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        if !input.document.is_object() {
            eyre::bail!("Workflow '{}' is not a JSON object", input.name);
        }

        let mut workflow = Workflow::new(input.name, self.dropper.transform(input.document)?);
        workflow.stamp_name();
        Ok(workflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prepares_document() {
        let input = Workflow::new(
            "Daily",
            json!({"id": "9", "name": "Old name", "active": true, "nodes": []}),
        );

        let output = UploadPreparer::new().transform(input).unwrap();
        assert_eq!(output.name, "Daily");
        assert_eq!(output.document, json!({"name": "Daily", "nodes": []}));
    }

    #[test]
    fn test_rejects_non_object() {
        let err = UploadPreparer::new()
            .transform(Workflow::new("Broken", json!("text")))
            .unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }
}
