//! n8n Workflows API
//!
//! Extract and load operations for `/api/v1/workflows`.

mod extractor;
mod loader;

pub use extractor::WorkflowsExtractor;
pub use loader::WorkflowsLoader;

use serde_json::Value;

/// The `id` of a workflow document; n8n sends strings, some versions numbers
pub(crate) fn workflow_id(document: &Value) -> Option<String> {
    match document.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
