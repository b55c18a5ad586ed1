//! Dataset loading error types.

use std::path::PathBuf;

use crate::domain::NetworkError;

/// Errors that can occur when loading a network definition.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid network definition
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition describes an invalid network
    #[error("invalid network: {0}")]
    Network(#[from] NetworkError),
}
