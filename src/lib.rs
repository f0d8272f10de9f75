//! n8n Workflow Builder
//!
//! Renders n8n workflows from templates, syncs them with a live instance,
//! and compares the built copies against what the server holds.

pub mod build;
pub mod cli;
pub mod client;
pub mod compare;
pub mod config;
pub mod error;
pub mod etl;
pub mod n8n;
pub mod storage;
pub mod transform;
pub mod workflow;

// Re-exports for convenience
pub use client::{ApiKey, N8nClient};
pub use compare::{ComparisonResult, Difference, Status, compare_directories};
pub use config::BuildConfig;
pub use error::{Error, Result};
pub use etl::{Extractor, IdentityTransformer, Loader, Pipeline, Transformer};
pub use storage::{DirectoryReader, DirectoryWriter, Secrets};
pub use workflow::Workflow;
