//! File-backed preset store.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use mediasort_core::Preset;
use tracing::{debug, warn};

use crate::codec;
use crate::error::StoreError;

/// Handle to the preset file.
///
/// Constructed once at startup and passed to whatever needs presets; no
/// global location is consulted after construction.
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    /// File name of the default store inside the home directory.
    pub const DEFAULT_FILE_NAME: &'static str = ".mediasort";

    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default store location (`~/.mediasort`).
    pub fn default_path() -> Result<PathBuf, StoreError> {
        dirs::home_dir()
            .map(|home| home.join(Self::DEFAULT_FILE_NAME))
            .ok_or(StoreError::NoHomeDirectory)
    }

    /// Create a store at the default location.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::default_path().map(Self::new)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every well-formed preset, in file order.
    ///
    /// A missing file is an empty store. Malformed lines are dropped.
    pub fn load(&self) -> Result<Vec<Preset>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let mut presets = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match codec::parse_line(line) {
                Some(preset) => presets.push(preset),
                None => warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    "dropping malformed preset entry"
                ),
            }
        }

        debug!(path = %self.path.display(), count = presets.len(), "loaded presets");
        Ok(presets)
    }

    /// Replace the store contents with `presets`.
    ///
    /// The new contents are written to a sibling temporary file, synced and
    /// renamed over the store.
    pub fn save(&self, presets: &[Preset]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp_path = self.temp_path();
        let file = File::create(&tmp_path).map_err(|e| StoreError::io(&tmp_path, e))?;
        let mut writer = BufWriter::new(file);

        for preset in presets {
            writeln!(writer, "{}", codec::format_line(preset))
                .map_err(|e| StoreError::io(&tmp_path, e))?;
        }

        let file = writer
            .into_inner()
            .map_err(|e| StoreError::io(&tmp_path, e.into_error()))?;
        file.sync_all().map_err(|e| StoreError::io(&tmp_path, e))?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), count = presets.len(), "saved presets");
        Ok(())
    }

    /// Append a preset.
    pub fn add(&self, preset: Preset) -> Result<(), StoreError> {
        let mut presets = self.load()?;
        presets.push(preset);
        self.save(&presets)
    }

    /// Remove every preset with exactly this name.
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut presets = self.load()?;
        presets.retain(|p| p.name != name);
        self.save(&presets)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_is_sibling() {
        let store = PresetStore::new("/home/me/.mediasort");
        assert_eq!(store.temp_path(), PathBuf::from("/home/me/.mediasort.tmp"));
    }

    #[test]
    fn test_default_path_file_name() {
        if let Ok(path) = PresetStore::default_path() {
            assert_eq!(
                path.file_name().and_then(|n| n.to_str()),
                Some(PresetStore::DEFAULT_FILE_NAME)
            );
        }
    }
}
