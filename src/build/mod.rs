//! Workflow builder
//!
//! Renders the workflow templates declared in the build config into
//! standalone workflow documents.

mod extractor;
mod renderer;

pub use extractor::{TemplateExtractor, TemplateSource};
pub use renderer::TemplateRenderer;
