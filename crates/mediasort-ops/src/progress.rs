//! Progress events streamed from a migration worker.

use crate::error::MigrationError;

/// One step of a migration run.
///
/// A run produces zero or more non-terminal events, one per migrated file
/// with `current` counting up from 1, followed by exactly one event with
/// `done` set. `total` comes from the pre-scan and does not change.
#[derive(Debug)]
pub struct ProgressEvent {
    /// Files migrated so far.
    pub current: usize,
    /// Files the pre-scan found.
    pub total: usize,
    /// Name of the file just migrated (empty on terminal events).
    pub current_file: String,
    /// Bytes copied so far.
    pub bytes_copied: u64,
    /// Set on the last event of a run.
    pub done: bool,
    /// Why the run stopped early, if it did.
    pub error: Option<MigrationError>,
}

impl ProgressEvent {
    /// A file was migrated.
    pub fn file(
        current: usize,
        total: usize,
        current_file: impl Into<String>,
        bytes_copied: u64,
    ) -> Self {
        Self {
            current,
            total,
            current_file: current_file.into(),
            bytes_copied,
            done: false,
            error: None,
        }
    }

    /// The run completed without errors.
    pub fn finished(current: usize, total: usize, bytes_copied: u64) -> Self {
        Self {
            current,
            total,
            current_file: String::new(),
            bytes_copied,
            done: true,
            error: None,
        }
    }

    /// The run was aborted by `error`.
    pub fn failed(current: usize, total: usize, bytes_copied: u64, error: MigrationError) -> Self {
        Self {
            current,
            total,
            current_file: String::new(),
            bytes_copied,
            done: true,
            error: Some(error),
        }
    }

    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        self.done
    }
}
