//! n8n client module
//!
//! Provides `N8nClient` for the workflow endpoints of the public API.
//! Requests are sent one at a time and never retried.

use super::ApiKey;
use crate::error::Error;
use eyre::{Context, Result, eyre};
use owo_colors::OwoColorize;
use reqwest::{Client, Method, header};
use serde_json::Value;
use url::Url;

const WORKFLOWS_PATH: &str = "api/v1/workflows";
const PAGE_SIZE: &str = "100";

/// Client for the n8n public REST API
///
/// # Example
/// ```no_run
/// use n8n_builder::client::{ApiKey, N8nClient};
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("http://localhost:5678")?;
/// let client = N8nClient::try_new(url, ApiKey::new("n8n_api_key"))?;
///
/// for workflow in client.list_workflows().await? {
///     println!("{}", workflow["name"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct N8nClient {
    client: Client,
    url: Url,
}

impl N8nClient {
    /// Create a client for the instance at `url`.
    ///
    /// A base URL with a path prefix (`https://host/n8n`) is kept as a
    /// prefix for every request.
    pub fn try_new(mut url: Url, api_key: ApiKey) -> Result<Self> {
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let mut key = header::HeaderValue::from_str(api_key.expose())
            .context("API key contains characters not allowed in a header")?;
        key.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("X-N8N-API-KEY", key);
        headers.insert(header::ACCEPT, "application/json".parse()?);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client, url })
    }

    /// Get the base URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid API path: {}", path))
    }

    /// Send a request and decode the JSON response.
    ///
    /// Non-success statuses become [`Error::Api`].
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.endpoint(path)?;
        log::debug!("{} {}", method.green(), url);

        let mut request = self.client.request(method.clone(), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request to {}: {}", self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                method: method.to_string(),
                path: path.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {} {}", method, path))
    }

    /// List every workflow, following cursor pagination
    pub async fn list_workflows(&self) -> Result<Vec<Value>> {
        let mut workflows = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query = vec![("limit", PAGE_SIZE)];
            if let Some(cursor) = cursor.as_deref() {
                query.push(("cursor", cursor));
            }

            let page = self
                .request(Method::GET, WORKFLOWS_PATH, &query, None)
                .await?;

            match page.get("data") {
                Some(Value::Array(data)) => workflows.extend(data.iter().cloned()),
                _ => eyre::bail!("Unexpected workflow list response: missing 'data' array"),
            }

            cursor = page
                .get("nextCursor")
                .and_then(|v| v.as_str())
                .filter(|c| !c.is_empty())
                .map(str::to_string);

            if cursor.is_none() {
                break;
            }
        }

        log::debug!("Listed {} workflow(s)", workflows.len());
        Ok(workflows)
    }

    /// Fetch a single workflow by id
    pub async fn get_workflow(&self, id: &str) -> Result<Value> {
        let path = format!("{}/{}", WORKFLOWS_PATH, id);
        self.request(Method::GET, &path, &[], None).await
    }

    /// Create a workflow, returning the stored document
    pub async fn create_workflow(&self, workflow: &Value) -> Result<Value> {
        self.request(Method::POST, WORKFLOWS_PATH, &[], Some(workflow))
            .await
    }

    /// Replace the workflow with the given id, returning the stored document
    pub async fn update_workflow(&self, id: &str, workflow: &Value) -> Result<Value> {
        let path = format!("{}/{}", WORKFLOWS_PATH, id);
        self.request(Method::PUT, &path, &[], Some(workflow)).await
    }
}

impl std::fmt::Display for N8nClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
