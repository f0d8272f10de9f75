//! Workflows API loader
//!
//! Creates workflows via POST /api/v1/workflows and updates existing ones
//! via PUT /api/v1/workflows/<id>. Existing workflows are matched by name.

use super::workflow_id;
use crate::client::N8nClient;
use crate::etl::Loader;
use crate::workflow::Workflow;
use eyre::{Context, Result, eyre};
use owo_colors::OwoColorize;
use std::collections::HashMap;

/// Loader that upserts workflows by name
pub struct WorkflowsLoader {
    client: N8nClient,
}

impl WorkflowsLoader {
    pub fn new(client: N8nClient) -> Self {
        Self { client }
    }

    /// Map workflow names on the server to their ids.
    ///
    /// When several server workflows share a name the first listed wins.
    async fn existing_ids(&self) -> Result<HashMap<String, String>> {
        let mut ids = HashMap::new();

        for summary in self.client.list_workflows().await? {
            let (Some(name), Some(id)) = (
                summary.get("name").and_then(|v| v.as_str()),
                workflow_id(&summary),
            ) else {
                continue;
            };

            if ids.contains_key(name) {
                log::warn!(
                    "Several workflows on the server are named {}, updating the first",
                    name.cyan()
                );
                continue;
            }
            ids.insert(name.to_string(), id);
        }

        Ok(ids)
    }

    /// Create or update a single workflow, returning its server id
    async fn upsert_workflow(
        &self,
        workflow: &Workflow,
        existing: &HashMap<String, String>,
    ) -> Result<String> {
        let stored = match existing.get(&workflow.name) {
            Some(id) => {
                log::debug!("Updating workflow {} (id: {})", workflow.name.cyan(), id);
                self.client
                    .update_workflow(id, &workflow.document)
                    .await
                    .with_context(|| format!("Failed to update workflow '{}'", workflow.name))?
            }
            None => {
                log::debug!("Creating workflow {}", workflow.name.cyan());
                self.client
                    .create_workflow(&workflow.document)
                    .await
                    .with_context(|| format!("Failed to create workflow '{}'", workflow.name))?
            }
        };

        workflow_id(&stored)
            .ok_or_else(|| eyre!("Response for workflow '{}' has no 'id'", workflow.name))
    }
}

impl Loader for WorkflowsLoader {
    type Item = Workflow;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        let existing = self.existing_ids().await?;
        let mut count = 0;

        for workflow in &items {
            let id = self.upsert_workflow(workflow, &existing).await?;
            log::info!("  ✓ {} -> {}", workflow.name.cyan(), id);
            count += 1;
        }

        Ok(count)
    }
}
