//! Error types for migration runs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a migration run.
///
/// Files migrated before the failure stay where they were copied.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Walking the source tree failed.
    #[error("scanning {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A category folder could not be created.
    #[error("creating directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Opening, reading, writing or syncing a file failed.
    #[error("copying {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The copied file's modification time could not be set.
    #[error("setting modification time of {path}: {source}")]
    Timestamp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source file could not be removed after copying.
    #[error("deleting source file {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The worker went away without sending a terminal event.
    #[error("migration worker stopped before reporting completion")]
    WorkerStopped,
}

impl MigrationError {
    /// Wrap a walk error, keeping the offending path when the walker knows it.
    pub(crate) fn scan(root: impl Into<PathBuf>, err: jwalk::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_else(|| root.into());
        Self::Scan {
            path,
            source: std::io::Error::other(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_paths() {
        let err = MigrationError::Copy {
            from: "/card/a.jpg".into(),
            to: "/import/JPEG/a.jpg".into(),
            source: std::io::Error::other("disk full"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("copying /card/a.jpg to /import/JPEG/a.jpg"));
        assert!(msg.ends_with("disk full"));
    }
}
