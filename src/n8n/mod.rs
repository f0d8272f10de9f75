//! n8n API implementations
//!
//! ETL extractors and loaders backed by the n8n REST API.

pub mod workflows;

pub use workflows::{WorkflowsExtractor, WorkflowsLoader};
