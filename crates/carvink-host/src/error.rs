//! Host errors.

use carvink_core::{ConfigError, ImportError, StorageError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("{}:{line}: invalid script line: {source}", path.display())]
    Script {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to import paper.js drawing: {0}")]
    Import(#[from] ImportError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type HostResult<T> = Result<T, HostError>;

/// Read a whole file, keeping its path in the error.
pub fn read_file(path: &std::path::Path) -> HostResult<String> {
    std::fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })
}
