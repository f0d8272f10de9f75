//! Directory-based workflow storage
//!
//! A workflow directory holds one `<name>.json` file per workflow. The file
//! base name is the workflow's identity within the directory.

use crate::error::{Error, Result};
use crate::etl::{Extractor, Loader};
use crate::workflow::Workflow;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

fn is_json_file(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
}

/// Read workflow files from a directory
pub struct DirectoryReader {
    path: PathBuf,
}

impl DirectoryReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// List `(name, path)` for every `.json` file, sorted by name
    pub fn list(&self) -> Result<Vec<(String, PathBuf)>> {
        let entries = std::fs::read_dir(&self.path).map_err(|e| Error::io(&self.path, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(&self.path, e))?.path();
            if !is_json_file(&path) {
                continue;
            }
            if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                files.push((name.to_string(), path.clone()));
            } else {
                log::warn!("Skipping file with non UTF-8 name: {}", path.display());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Parse every workflow file, keyed by file base name.
    ///
    /// Fails on the first file that is not valid JSON.
    pub fn read_named(&self) -> Result<BTreeMap<String, Value>> {
        let mut documents = BTreeMap::new();

        for (name, path) in self.list()? {
            let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            let value: Value =
                serde_json::from_str(&content).map_err(|e| Error::parse(&path, e))?;
            documents.insert(name, value);
        }

        log::debug!(
            "Read {} workflow file(s) from {}",
            documents.len(),
            self.path.display()
        );
        Ok(documents)
    }

    /// Read all workflows, named after their files
    pub fn read_all(&self) -> Result<Vec<Workflow>> {
        Ok(self
            .read_named()?
            .into_iter()
            .map(|(name, document)| Workflow::new(name, document))
            .collect())
    }

    /// Count workflow files in the directory
    pub fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }
}

impl Extractor for DirectoryReader {
    type Item = Workflow;

    async fn extract(&self) -> eyre::Result<Vec<Self::Item>> {
        Ok(self.read_all()?)
    }
}

/// Write workflows to a directory as `<name>.json`
pub struct DirectoryWriter {
    path: PathBuf,
    replace: bool,
}

impl DirectoryWriter {
    /// Create the writer, creating the directory if needed
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::new_with_options(path, false)
    }

    /// Create a writer that swaps out the directory's `.json` files on load.
    ///
    /// Existing files are only removed once a complete, collision-free batch
    /// is ready to be written.
    pub fn new_with_options(path: impl AsRef<Path>, replace: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&path).map_err(|e| Error::io(&path, e))?;
        Ok(Self { path, replace })
    }

    /// Write a single workflow as pretty JSON, returning the file path
    pub fn write(&self, workflow: &Workflow) -> Result<PathBuf> {
        let path = self.path.join(workflow.file_name());
        let json = serde_json::to_string_pretty(&workflow.document)
            .map_err(|e| Error::parse(&path, e))?;
        std::fs::write(&path, json + "\n").map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }

    /// Write workflows, refusing the whole batch if two share a file name
    pub fn write_all(&self, items: &[Workflow]) -> Result<usize> {
        let mut file_names = HashSet::new();
        for workflow in items {
            let file_name = workflow.file_name();
            if !file_names.insert(file_name.clone()) {
                return Err(Error::Io {
                    path: self.path.join(&file_name),
                    source: std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        format!("more than one workflow is named '{}'", workflow.name),
                    ),
                });
            }
        }

        if self.replace {
            self.clear()?;
        }

        for workflow in items {
            let path = self.write(workflow)?;
            log::info!("  ✓ {} -> {}", workflow.name, path.display());
        }

        Ok(items.len())
    }

    /// Remove all `.json` files from the directory
    pub fn clear(&self) -> Result<()> {
        let entries = std::fs::read_dir(&self.path).map_err(|e| Error::io(&self.path, e))?;

        for entry in entries {
            let path = entry.map_err(|e| Error::io(&self.path, e))?.path();
            if is_json_file(&path) {
                std::fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
            }
        }

        Ok(())
    }
}

impl Loader for DirectoryWriter {
    type Item = Workflow;

    async fn load(&self, items: Vec<Self::Item>) -> eyre::Result<usize> {
        Ok(self.write_all(&items)?)
    }
}
