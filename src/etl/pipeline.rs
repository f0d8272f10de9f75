//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use eyre::Result;

/// Runs an extractor, a transformer and a loader in sequence
///
/// # Example
/// ```no_run
/// use n8n_builder::etl::{IdentityTransformer, Pipeline};
/// use n8n_builder::storage::{DirectoryReader, DirectoryWriter};
///
/// # async fn example() -> eyre::Result<()> {
/// let pipeline = Pipeline::new(
///     DirectoryReader::new("workflows/built"),
///     IdentityTransformer::new(),
///     DirectoryWriter::new("backup")?,
/// );
///
/// let count = pipeline.run().await?;
/// println!("Copied {} workflows", count);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
{
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Extract, transform and load, returning the number of items loaded
    ///
    /// # Errors
    /// Returns the first error from any stage; nothing after it runs.
    pub async fn run(&self) -> Result<usize> {
        log::debug!("Extracting from source...");
        let items = self.extractor.extract().await?;
        log::debug!("Extracted {} item(s)", items.len());

        if items.is_empty() {
            log::warn!("No workflows found, nothing to do");
            return Ok(0);
        }

        log::debug!("Transforming items...");
        let transformed = self.transformer.transform_many(items)?;

        log::debug!("Loading to destination...");
        let count = self.loader.load(transformed).await?;
        log::debug!("Loaded {} item(s)", count);

        Ok(count)
    }
}
