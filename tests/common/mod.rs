//! Shared helpers for integration tests
//!
//! `FakeN8n` is a tiny in-memory stand-in for the n8n public API, served by
//! axum on a random local port. It understands just enough of
//! `/api/v1/workflows` for pull and push to run against it.

#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path as AxumPath, Query, State},
    http::{HeaderMap, StatusCode, Uri},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

pub const API_KEY_ENV: &str = "N8N_TEST_API_KEY";
pub const API_KEY: &str = "test-api-key";

/// A request as seen by the fake server
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub api_key: Option<String>,
    pub body: Option<Value>,
}

struct ServerState {
    workflows: Vec<Value>,
    requests: Vec<Recorded>,
    next_id: usize,
    page_size: usize,
}

type Shared = Arc<Mutex<ServerState>>;
type Reply = (StatusCode, Json<Value>);

pub struct FakeN8n {
    url: String,
    state: Shared,
}

impl FakeN8n {
    /// Start a server holding `workflows`, listing `page_size` per page
    pub async fn start(workflows: Vec<Value>, page_size: usize) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let state = Arc::new(Mutex::new(ServerState {
            workflows,
            requests: Vec::new(),
            next_id: 100,
            page_size,
        }));

        let app = Router::new()
            .route(
                "/api/v1/workflows",
                get(list_workflows).post(create_workflow),
            )
            .route(
                "/api/v1/workflows/{id}",
                get(get_workflow).put(update_workflow),
            )
            .with_state(Arc::clone(&state));

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Fake n8n server error: {}", e);
            }
        });

        Self { url, state }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn workflows(&self) -> Vec<Value> {
        self.state.lock().unwrap().workflows.clone()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests other than GET
    pub fn writes(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != "GET")
            .collect()
    }
}

/// Log the request, then lock the state if the API key matches
fn accept<'a>(
    state: &'a Shared,
    method: &str,
    uri: &Uri,
    headers: &HeaderMap,
    body: Option<Value>,
) -> Result<MutexGuard<'a, ServerState>, Reply> {
    let api_key = headers
        .get("x-n8n-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut guard = state.lock().unwrap();
    guard.requests.push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        api_key: api_key.clone(),
        body,
    });

    match api_key.as_deref() {
        Some(API_KEY) => Ok(guard),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "unauthorized"})),
        )),
    }
}

fn not_found() -> Reply {
    (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"})))
}

#[derive(Deserialize)]
struct ListParams {
    cursor: Option<String>,
}

async fn list_workflows(
    State(state): State<Shared>,
    Query(params): Query<ListParams>,
    uri: Uri,
    headers: HeaderMap,
) -> Reply {
    let state = match accept(&state, "GET", &uri, &headers, None) {
        Ok(state) => state,
        Err(reply) => return reply,
    };

    let start: usize = params
        .cursor
        .and_then(|c| c.parse().ok())
        .unwrap_or(0);
    let end = (start + state.page_size).min(state.workflows.len());

    let data: Vec<Value> = state.workflows[start.min(end)..end]
        .iter()
        .map(|w| json!({"id": w["id"], "name": w["name"]}))
        .collect();
    let next = if end < state.workflows.len() {
        json!(end.to_string())
    } else {
        Value::Null
    };

    (
        StatusCode::OK,
        Json(json!({"data": data, "nextCursor": next})),
    )
}

async fn get_workflow(
    State(state): State<Shared>,
    AxumPath(id): AxumPath<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Reply {
    let state = match accept(&state, "GET", &uri, &headers, None) {
        Ok(state) => state,
        Err(reply) => return reply,
    };

    match find(&state, &id) {
        Some(index) => (StatusCode::OK, Json(state.workflows[index].clone())),
        None => not_found(),
    }
}

async fn create_workflow(
    State(state): State<Shared>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Reply {
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    let mut state = match accept(&state, "POST", &uri, &headers, body.clone()) {
        Ok(state) => state,
        Err(reply) => return reply,
    };

    let mut workflow = body.unwrap_or_else(|| json!({}));
    workflow["id"] = json!(format!("wf-{}", state.next_id));
    workflow["active"] = json!(false);
    state.next_id += 1;
    state.workflows.push(workflow.clone());

    (StatusCode::OK, Json(workflow))
}

async fn update_workflow(
    State(state): State<Shared>,
    AxumPath(id): AxumPath<String>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Reply {
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    let mut state = match accept(&state, "PUT", &uri, &headers, body.clone()) {
        Ok(state) => state,
        Err(reply) => return reply,
    };

    let Some(index) = find(&state, &id) else {
        return not_found();
    };
    let mut workflow = body.unwrap_or_else(|| json!({}));
    workflow["id"] = state.workflows[index]["id"].clone();
    state.workflows[index] = workflow.clone();

    (StatusCode::OK, Json(workflow))
}

/// Position of the workflow with `id`, whether stored as a string or a number
fn find(state: &ServerState, id: &str) -> Option<usize> {
    state.workflows.iter().position(|w| match &w["id"] {
        Value::String(s) => s == id,
        Value::Number(n) => n.to_string() == id,
        _ => false,
    })
}

/// Write a build config plus env file into `dir`, returning both paths
pub fn write_project(dir: &Path, n8n_url: &str, workflows_yaml: &str) -> (PathBuf, PathBuf) {
    let config = format!(
        "output_dir: out/built\npulled_dir: out/pulled\nn8n_instance:\n  url: {}\n  api_key_env: {}\nworkflows:{}\n",
        n8n_url, API_KEY_ENV, workflows_yaml
    );
    let config_path = dir.join("n8n-build.yml");
    std::fs::write(&config_path, config).unwrap();

    let env_path = dir.join(".env");
    std::fs::write(&env_path, format!("{}={}\n", API_KEY_ENV, API_KEY)).unwrap();

    (config_path, env_path)
}

/// Write `value` as `<dir>/<name>.json`, creating `dir`
pub fn write_workflow(dir: &Path, name: &str, value: &Value) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join(format!("{}.json", name)),
        serde_json::to_string_pretty(value).unwrap(),
    )
    .unwrap();
}
