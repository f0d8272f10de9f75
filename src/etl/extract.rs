//! Extractor trait for reading items from a source

use eyre::Result;

/// Extract items from a source such as the n8n API or a directory
///
/// # Example
/// ```no_run
/// use n8n_builder::etl::Extractor;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct TemplateNames {
///     dir: PathBuf,
/// }
///
/// impl Extractor for TemplateNames {
///     type Item = String;
///
///     async fn extract(&self) -> Result<Vec<Self::Item>> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    type Item: Send;

    /// Extract all items
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, I/O, parsing, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Vec<Self::Item>>> + Send;
}
