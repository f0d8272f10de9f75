//! Reads the templates named by workflow definitions

use crate::config::WorkflowDefinition;
use crate::etl::Extractor;
use crate::storage::read_json5_file;
use eyre::{Context, Result};
use serde_json::Value;

/// A definition paired with its parsed template
#[derive(Debug, Clone)]
pub struct TemplateSource {
    pub definition: WorkflowDefinition,
    pub template: Value,
}

/// Extractor that loads each definition's JSON5 template
pub struct TemplateExtractor {
    definitions: Vec<WorkflowDefinition>,
}

impl TemplateExtractor {
    pub fn new(definitions: Vec<WorkflowDefinition>) -> Self {
        Self { definitions }
    }
}

impl Extractor for TemplateExtractor {
    type Item = TemplateSource;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        let mut sources = Vec::with_capacity(self.definitions.len());

        for definition in &self.definitions {
            log::debug!(
                "Reading template for {} from {}",
                definition.name,
                definition.template.display()
            );
            let template = read_json5_file(&definition.template)
                .with_context(|| format!("Error building workflow '{}'", definition.name))?;
            sources.push(TemplateSource {
                definition: definition.clone(),
                template,
            });
        }

        Ok(sources)
    }
}
