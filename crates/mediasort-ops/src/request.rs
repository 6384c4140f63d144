//! Migration run configuration.

use std::path::PathBuf;

use derive_builder::Builder;

/// What to migrate, where to, and whether to delete originals.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct MigrationRequest {
    /// Root of the tree to import from.
    pub source: PathBuf,

    /// Root the category folders are created under.
    pub destination: PathBuf,

    /// Delete each source file once its copy is synced.
    #[builder(default = "false")]
    pub wipe_after_copy: bool,
}

impl MigrationRequestBuilder {
    fn validate(&self) -> Result<(), String> {
        match (&self.source, &self.destination) {
            (Some(source), Some(destination)) => {
                if source.as_os_str().is_empty() || destination.as_os_str().is_empty() {
                    return Err("Source and destination paths cannot be empty".to_string());
                }
                Ok(())
            }
            _ => Err("Source and destination paths are required".to_string()),
        }
    }
}

impl MigrationRequest {
    /// Create a new request builder.
    pub fn builder() -> MigrationRequestBuilder {
        MigrationRequestBuilder::default()
    }

    /// Create a request directly.
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        wipe_after_copy: bool,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            wipe_after_copy,
        }
    }
}
