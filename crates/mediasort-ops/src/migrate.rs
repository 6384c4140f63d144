//! Tree walk and per-file copy/delete sequence.

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, info};

use mediasort_core::{Category, classify};

use crate::error::MigrationError;
use crate::request::MigrationRequest;

/// A file that was copied (and possibly removed from the source).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratedFile {
    /// Original location.
    pub source: PathBuf,
    /// Location of the copy.
    pub destination: PathBuf,
    /// Category folder the file was sorted into.
    pub category: Category,
    /// Bytes copied.
    pub bytes: u64,
}

impl MigratedFile {
    /// File name shown in progress output.
    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Totals of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Number of files migrated.
    pub files: usize,
    /// Total bytes copied.
    pub bytes: u64,
}

/// A classified file found during the walk.
struct MediaFile {
    path: PathBuf,
    category: Category,
}

/// Executes one migration run.
///
/// Both [`count`](Self::count) and [`run`](Self::run) walk the source in the
/// same order: serially, with directory entries sorted by name. When the
/// destination is nested inside the source, its subtree is skipped. A source
/// that is a single file is migrated on its own if it classifies.
#[derive(Debug, Clone)]
pub struct Migrator {
    request: MigrationRequest,
    source: PathBuf,
    destination: PathBuf,
    /// Destination lies strictly below the source.
    skip_destination: bool,
}

impl Migrator {
    /// Create a migrator for the given request.
    pub fn new(request: MigrationRequest) -> Self {
        let source = std::path::absolute(&request.source).unwrap_or_else(|_| request.source.clone());
        let destination =
            std::path::absolute(&request.destination).unwrap_or_else(|_| request.destination.clone());
        let skip_destination = destination != source && destination.starts_with(&source);

        Self {
            request,
            source,
            destination,
            skip_destination,
        }
    }

    /// Count the files a run would migrate.
    pub fn count(&self) -> Result<usize, MigrationError> {
        let root_is_dir = self.check_source()?;

        let mut total = 0;
        for file in self.media_files(root_is_dir) {
            file?;
            total += 1;
        }

        debug!(source = %self.source.display(), total, "pre-scan complete");
        Ok(total)
    }

    /// Migrate every classified file, calling `on_file` after each one.
    ///
    /// Stops at the first failure. Files handled before it are left in place.
    pub fn run<F>(&self, mut on_file: F) -> Result<MigrationSummary, MigrationError>
    where
        F: FnMut(&MigratedFile),
    {
        let root_is_dir = self.check_source()?;

        info!(
            source = %self.source.display(),
            destination = %self.destination.display(),
            wipe = self.request.wipe_after_copy,
            "starting migration"
        );

        let mut summary = MigrationSummary::default();

        for file in self.media_files(root_is_dir) {
            let migrated = self.migrate_file(file?)?;

            summary.files += 1;
            summary.bytes += migrated.bytes;
            on_file(&migrated);
        }

        info!(files = summary.files, bytes = summary.bytes, "migration complete");
        Ok(summary)
    }

    /// Returns whether the source is a directory.
    fn check_source(&self) -> Result<bool, MigrationError> {
        let metadata = fs::metadata(&self.source).map_err(|source| MigrationError::Scan {
            path: self.source.clone(),
            source,
        })?;

        Ok(metadata.is_dir())
    }

    fn media_files(
        &self,
        root_is_dir: bool,
    ) -> Box<dyn Iterator<Item = Result<MediaFile, MigrationError>> + '_> {
        if !root_is_dir {
            let file = classify(&self.source)
                .filter(|&category| self.target_path(&self.source, category) != self.source)
                .map(|category| {
                    Ok(MediaFile {
                        path: self.source.clone(),
                        category,
                    })
                });
            return Box::new(file.into_iter());
        }

        let walk = WalkDir::new(&self.source)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .into_iter()
            .filter_map(move |entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => return Some(Err(MigrationError::scan(&self.source, err))),
                };

                if entry.file_type().is_dir() {
                    return None;
                }

                let path = entry.path();
                if self.skip_destination && path.starts_with(&self.destination) {
                    return None;
                }

                let category = classify(&path)?;
                // Already in its sorted place, copying would truncate it.
                if self.target_path(&path, category) == path {
                    return None;
                }

                Some(Ok(MediaFile { path, category }))
            });

        Box::new(walk)
    }

    fn migrate_file(&self, file: MediaFile) -> Result<MigratedFile, MigrationError> {
        let MediaFile { path, category } = file;

        let dest_path = self.target_path(&path, category);
        if let Some(dest_dir) = dest_path.parent() {
            fs::create_dir_all(dest_dir).map_err(|source| MigrationError::CreateDirectory {
                path: dest_dir.to_path_buf(),
                source,
            })?;
        }

        let bytes = copy_file(&path, &dest_path)?;

        if self.request.wipe_after_copy {
            fs::remove_file(&path).map_err(|source| MigrationError::Delete {
                path: path.clone(),
                source,
            })?;
        }

        debug!(
            from = %path.display(),
            to = %dest_path.display(),
            bytes,
            moved = self.request.wipe_after_copy,
            "migrated file"
        );

        Ok(MigratedFile {
            source: path,
            destination: dest_path,
            category,
            bytes,
        })
    }

    /// Where `path` lands: `<destination>/<FOLDER>/<file name>`.
    fn target_path(&self, path: &Path, category: Category) -> PathBuf {
        self.destination
            .join(category.folder_name())
            .join(path.file_name().unwrap_or_default())
    }
}

/// Copy `from` to `to` byte for byte, sync it, then carry over the mtime.
fn copy_file(from: &Path, to: &Path) -> Result<u64, MigrationError> {
    let copy_err = |source: io::Error| MigrationError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    let mut reader = File::open(from).map_err(copy_err)?;
    let modified = reader.metadata().and_then(|m| m.modified()).map_err(copy_err)?;

    let mut writer = File::create(to).map_err(copy_err)?;
    let bytes = io::copy(&mut reader, &mut writer).map_err(copy_err)?;
    writer.sync_all().map_err(copy_err)?;

    let times = FileTimes::new().set_accessed(modified).set_modified(modified);
    writer
        .set_times(times)
        .map_err(|source| MigrationError::Timestamp {
            path: to.to_path_buf(),
            source,
        })?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_copy_file_preserves_contents_and_mtime() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.jpg");
        let to = dir.path().join("b.jpg");
        fs::write(&from, b"jpeg bytes").unwrap();

        let old = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        File::options()
            .write(true)
            .open(&from)
            .unwrap()
            .set_modified(old)
            .unwrap();

        let bytes = copy_file(&from, &to).unwrap();

        assert_eq!(bytes, 10);
        assert_eq!(fs::read(&to).unwrap(), b"jpeg bytes");
        assert_eq!(fs::metadata(&to).unwrap().modified().unwrap(), old);
    }

    #[test]
    fn test_copy_file_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = copy_file(&dir.path().join("nope.jpg"), &dir.path().join("out.jpg")).unwrap_err();
        assert!(matches!(err, MigrationError::Copy { .. }));
    }

    #[test]
    fn test_migrated_file_name() {
        let file = MigratedFile {
            source: PathBuf::from("/card/DCIM/IMG_0001.JPG"),
            destination: PathBuf::from("/import/JPEG/IMG_0001.JPG"),
            category: Category::Jpeg,
            bytes: 0,
        };
        assert_eq!(file.file_name(), "IMG_0001.JPG");
    }
}
