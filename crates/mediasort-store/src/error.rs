//! Error types for preset persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the preset store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error on the store file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No home directory to place the default store in.
    #[error("Could not determine the home directory")]
    NoHomeDirectory,
}

impl StoreError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
