//! Loader trait for writing items to a destination

use eyre::Result;

/// Load items into a destination such as a directory or the n8n API
pub trait Loader: Send + Sync {
    type Item: Send;

    /// Load items, returning how many were loaded.
    ///
    /// Loaders stop at the first item that fails.
    fn load(
        &self,
        items: Vec<Self::Item>,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}
