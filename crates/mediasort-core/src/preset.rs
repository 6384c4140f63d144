//! Named source/destination pairings.

use std::path::PathBuf;

/// A named, persisted (source, destination) pairing for repeated imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    /// Unique display name.
    pub name: String,
    /// Directory media is imported from.
    pub source: PathBuf,
    /// Directory media is sorted into.
    pub destination: PathBuf,
}

impl Preset {
    /// Create a new preset.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            destination: destination.into(),
        }
    }
}
