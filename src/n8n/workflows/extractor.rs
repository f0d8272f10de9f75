//! Workflows API extractor
//!
//! Lists workflows via GET /api/v1/workflows, then fetches each full
//! definition via GET /api/v1/workflows/<id>.

use super::workflow_id;
use crate::client::N8nClient;
use crate::etl::Extractor;
use crate::workflow::Workflow;
use eyre::{Context, Result, eyre};
use owo_colors::OwoColorize;
use serde_json::Value;

/// Extractor for every workflow on an n8n instance
///
/// # Example
/// ```no_run
/// use n8n_builder::client::{ApiKey, N8nClient};
/// use n8n_builder::etl::Extractor;
/// use n8n_builder::n8n::WorkflowsExtractor;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("http://localhost:5678")?;
/// let client = N8nClient::try_new(url, ApiKey::new("key"))?;
///
/// let workflows = WorkflowsExtractor::new(client).extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct WorkflowsExtractor {
    client: N8nClient,
}

impl WorkflowsExtractor {
    pub fn new(client: N8nClient) -> Self {
        Self { client }
    }

    /// Fetch a single workflow by ID
    async fn fetch_workflow(&self, summary: &Value) -> Result<Workflow> {
        let id = workflow_id(summary)
            .ok_or_else(|| eyre!("Workflow in list response is missing 'id'"))?;

        log::debug!("Fetching workflow {}", id.cyan());

        let document = self
            .client
            .get_workflow(&id)
            .await
            .with_context(|| format!("Failed to fetch workflow '{}'", id))?;

        Workflow::from_document(document).with_context(|| format!("Workflow '{}'", id))
    }
}

impl Extractor for WorkflowsExtractor {
    type Item = Workflow;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        let summaries = self.client.list_workflows().await?;

        let mut workflows = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            workflows.push(self.fetch_workflow(summary).await?);
        }

        log::info!(
            "Fetched {} workflow(s) from {}",
            workflows.len(),
            self.client.url().bright_black()
        );

        Ok(workflows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiKey;
    use serde_json::json;
    use url::Url;

    fn extractor() -> WorkflowsExtractor {
        let url = Url::parse("http://localhost:5678").unwrap();
        WorkflowsExtractor::new(N8nClient::try_new(url, ApiKey::new("key")).unwrap())
    }

    #[tokio::test]
    async fn test_summary_without_id_fails() {
        let err = extractor()
            .fetch_workflow(&json!({"name": "No ID"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing 'id'"));
    }
}
