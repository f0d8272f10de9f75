//! Built vs. pulled workflow comparison
//!
//! Pairs the workflow files of two directories by base name and classifies
//! every name found in either directory. Reading is all-or-nothing: one
//! unparsable file fails the whole comparison.

mod diff;
mod report;

pub use diff::{DiffKind, Difference, diff};
pub use report::{Summary, render_json, render_table};

use crate::error::Result;
use crate::storage::DirectoryReader;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Classification of one workflow name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Present on both sides and structurally equal
    Identical,
    /// Present on both sides with at least one difference
    Different,
    BuiltOnly,
    PulledOnly,
}

impl Status {
    /// The status seen with built and pulled exchanged
    pub fn swapped(self) -> Self {
        match self {
            Self::BuiltOnly => Self::PulledOnly,
            Self::PulledOnly => Self::BuiltOnly,
            other => other,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Identical => "identical",
            Self::Different => "different",
            Self::BuiltOnly => "built only",
            Self::PulledOnly => "pulled only",
        };
        f.pad(label)
    }
}

/// Outcome for a single workflow name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    #[serde(skip)]
    pub name: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<Difference>,
}

impl ComparisonResult {
    pub fn diff_count(&self) -> usize {
        self.differences.len()
    }
}

/// Classify every name in `built` and `pulled`, sorted by name
pub fn compare_documents(
    built: &BTreeMap<String, Value>,
    pulled: &BTreeMap<String, Value>,
) -> Vec<ComparisonResult> {
    let names: BTreeSet<&String> = built.keys().chain(pulled.keys()).collect();

    names
        .into_iter()
        .map(|name| {
            let (status, differences) = match (built.get(name), pulled.get(name)) {
                (Some(b), Some(p)) => {
                    let differences = diff(b, p);
                    if differences.is_empty() {
                        (Status::Identical, differences)
                    } else {
                        (Status::Different, differences)
                    }
                }
                (Some(_), None) => (Status::BuiltOnly, Vec::new()),
                (None, _) => (Status::PulledOnly, Vec::new()),
            };

            ComparisonResult {
                name: name.clone(),
                status,
                differences,
            }
        })
        .collect()
}

/// Compare the workflow files in two directories
///
/// # Errors
/// Fails if either directory cannot be read or any `.json` file in them is
/// not valid JSON; the error names the offending file.
pub fn compare_directories(
    built_dir: impl AsRef<Path>,
    pulled_dir: impl AsRef<Path>,
) -> Result<Vec<ComparisonResult>> {
    let built = DirectoryReader::new(built_dir).read_named()?;
    let pulled = DirectoryReader::new(pulled_dir).read_named()?;

    log::debug!(
        "Comparing {} built and {} pulled workflow(s)",
        built.len(),
        pulled.len()
    );

    Ok(compare_documents(&built, &pulled))
}
