//! Error types shared by the library
//!
//! Command-level code wraps these in [`eyre::Report`] with extra context;
//! the variants here carry the facts a user needs to fix the problem.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file is missing, malformed, or fails validation
    #[error("invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// A required secret is not set in the env file or process environment
    #[error("required secret '{key}' not found in {env_file} or the environment")]
    MissingSecret { key: String, env_file: PathBuf },

    /// The n8n API answered with a non-success status
    #[error("{method} {path} failed ({status}): {body}")]
    Api {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    /// A directory a command depends on does not exist
    #[error("{label} directory '{path}' not found. Run '{hint}' first.")]
    DirectoryNotFound {
        label: &'static str,
        path: PathBuf,
        hint: &'static str,
    },

    /// Failed to read or write a file
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file does not hold a valid document
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// A workflow template could not be rendered
    #[error("failed to render workflow '{workflow}': {reason}")]
    Render { workflow: String, reason: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
