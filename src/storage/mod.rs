//! File system storage operations
//!
//! This module handles all file I/O operations including:
//! - Directories of `<name>.json` workflow files
//! - JSON5 template reading
//! - Secrets from dotenv files

mod directory;
mod env;
mod json_file;

pub use directory::{DirectoryReader, DirectoryWriter};
pub use env::Secrets;
pub use json_file::{from_json5_str, read_json5_file};
