use crate::core::{GoupError, GoupResult};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tar::Archive;

/// Counts of what an extraction materialized
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub directories: usize,
    pub files: usize,
    /// Entries of unsupported kinds (symlinks, devices, ...) that were not written
    pub skipped: usize,
    pub bytes: u64,
}

/// Streams a tar.gz archive onto disk under a destination directory.
///
/// Entries are processed one at a time in archive order, with at most one
/// output file open at any moment. Only directories and regular files are
/// materialized; other entry kinds are logged and skipped. A failed
/// extraction is not rolled back, so callers should extract into a fresh
/// directory and discard it on error.
pub struct ArchiveExtractor {
    dest_dir: PathBuf,
    cancel: Option<Arc<AtomicBool>>,
}

impl ArchiveExtractor {
    /// Create a new ArchiveExtractor
    pub fn new(dest_dir: PathBuf) -> Self {
        Self {
            dest_dir,
            cancel: None,
        }
    }

    /// Stop before the next entry once `cancel` is set, failing with `Aborted`
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Extract a tar.gz file from disk
    pub fn extract_file(&self, archive_path: &Path) -> GoupResult<ExtractSummary> {
        let file = File::open(archive_path).map_err(|e| {
            GoupError::Extract(format!(
                "Failed to open archive {}: {}",
                archive_path.display(),
                e
            ))
        })?;
        self.extract(BufReader::new(file))
    }

    /// Extract a gzip-compressed tar stream
    pub fn extract<R: Read>(&self, reader: R) -> GoupResult<ExtractSummary> {
        fs::create_dir_all(&self.dest_dir).map_err(|e| {
            GoupError::Extract(format!(
                "Failed to create destination {}: {}",
                self.dest_dir.display(),
                e
            ))
        })?;

        let mut archive = Archive::new(GzDecoder::new(reader));
        let entries = archive
            .entries()
            .map_err(|e| GoupError::Extract(format!("Failed to read archive: {}", e)))?;

        let mut summary = ExtractSummary::default();
        // Directory modes are applied once every entry is written, so a
        // read-only directory can still receive its contents.
        let mut dir_modes: Vec<(PathBuf, u32)> = Vec::new();

        for entry in entries {
            if self.is_cancelled() {
                return Err(GoupError::Aborted("extraction interrupted".to_string()));
            }

            let mut entry = entry
                .map_err(|e| GoupError::Extract(format!("Failed to read archive entry: {}", e)))?;

            let name = entry
                .path()
                .map_err(|e| GoupError::Extract(format!("Invalid entry path: {}", e)))?
                .into_owned();
            let entry_type = entry.header().entry_type();

            if entry_type.is_dir() {
                let mode = entry_mode(&entry, &name)?;
                let target = self.target_path(&name)?;
                create_dir(&target)?;
                dir_modes.push((target, mode));
                summary.directories += 1;
            } else if entry_type.is_file() {
                let mode = entry_mode(&entry, &name)?;
                let target = self.target_path(&name)?;
                let expected = entry.size();
                let written = write_file(&target, mode, &mut entry)?;
                if written != expected {
                    return Err(GoupError::Extract(format!(
                        "Truncated entry {}: expected {} bytes, got {}",
                        name.display(),
                        expected,
                        written
                    )));
                }
                summary.files += 1;
                summary.bytes += written;
            } else {
                tracing::warn!(
                    kind = ?entry_type,
                    name = %name.display(),
                    "skipping unsupported archive entry"
                );
                summary.skipped += 1;
            }
        }

        for (dir, mode) in dir_modes.iter().rev() {
            set_mode(dir, *mode)?;
        }

        tracing::debug!(
            dest = %self.dest_dir.display(),
            directories = summary.directories,
            files = summary.files,
            skipped = summary.skipped,
            "extraction finished"
        );

        Ok(summary)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|cancel| cancel.load(Ordering::Relaxed))
    }

    /// Resolve an entry name under the destination, rejecting absolute paths and `..`
    fn target_path(&self, name: &Path) -> GoupResult<PathBuf> {
        let mut target = self.dest_dir.clone();
        for component in name.components() {
            match component {
                Component::Normal(part) => target.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(GoupError::Extract(format!(
                        "Refusing to extract entry outside destination: {}",
                        name.display()
                    )));
                }
            }
        }
        Ok(target)
    }
}

fn entry_mode<R: Read>(entry: &tar::Entry<'_, R>, name: &Path) -> GoupResult<u32> {
    entry
        .header()
        .mode()
        .map(|mode| mode & 0o7777)
        .map_err(|e| GoupError::Extract(format!("Invalid mode for {}: {}", name.display(), e)))
}

fn ensure_parent(target: &Path) -> GoupResult<()> {
    if let Some(parent) = target.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                GoupError::Extract(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// Owner bits kept on directories until extraction finishes
const DIR_WORKING_MODE: u32 = 0o700;

fn create_dir(target: &Path) -> GoupResult<()> {
    ensure_parent(target)?;

    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_WORKING_MODE);
    }

    match builder.create(target) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && target.is_dir() => {
            tracing::debug!(path = %target.display(), "directory already exists");
        }
        Err(e) => {
            return Err(GoupError::Extract(format!(
                "Failed to create directory {}: {}",
                target.display(),
                e
            )));
        }
    }

    set_mode(target, DIR_WORKING_MODE)
}

fn write_file<R: Read>(target: &Path, mode: u32, content: &mut R) -> GoupResult<u64> {
    ensure_parent(target)?;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let mut out = options.open(target).map_err(|e| {
        GoupError::Extract(format!("Failed to create file {}: {}", target.display(), e))
    })?;

    let written = io::copy(content, &mut out).map_err(|e| {
        GoupError::Extract(format!("Failed to write file {}: {}", target.display(), e))
    })?;

    set_mode(target, mode)?;
    Ok(written)
}

/// Apply the declared permission bits regardless of the process umask
#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> GoupResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| {
        GoupError::Extract(format!(
            "Failed to set permissions on {}: {}",
            path.display(),
            e
        ))
    })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> GoupResult<()> {
    Ok(())
}
