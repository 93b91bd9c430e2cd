//! CLI commands

pub mod build;
pub mod schema;
pub mod validate;

use plaque_curator::{parse_dump, ExtractorDump, ValidationError};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that stop a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dump {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Read and validate an extractor dump.
pub(crate) fn read_dump(path: &Path) -> Result<ExtractorDump, CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_dump(&source).map_err(|source| CliError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}
