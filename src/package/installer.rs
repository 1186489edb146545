//! Swap a staged toolchain into GOROOT

use crate::core::path::backup_dir;
use crate::core::{GoupError, GoupResult};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Top-level directory of every official Go archive
pub const ARCHIVE_ROOT: &str = "go";

/// Result of a completed swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub goroot: PathBuf,
    /// Where the previous installation was moved, if there was one
    pub backup: Option<PathBuf>,
}

/// Replaces the installation at GOROOT with a freshly extracted one.
///
/// The old installation is kept next to GOROOT as `<goroot>@<version>`.
pub struct ToolchainInstaller {
    goroot: PathBuf,
}

impl ToolchainInstaller {
    pub fn new(goroot: PathBuf) -> Self {
        Self { goroot }
    }

    pub fn goroot(&self) -> &Path {
        &self.goroot
    }

    /// Create a fresh staging directory next to GOROOT.
    ///
    /// Staging on the same filesystem keeps the final swap a pair of renames.
    /// The directory is removed when the returned guard is dropped.
    pub fn create_staging(&self) -> GoupResult<TempDir> {
        let parent = self.goroot.parent().ok_or_else(|| {
            GoupError::Path(format!("GOROOT has no parent: {}", self.goroot.display()))
        })?;
        tempfile::Builder::new()
            .prefix(".goup-staging-")
            .tempdir_in(parent)
            .map_err(|e| {
                GoupError::Install(format!(
                    "Failed to create staging directory in {}: {}",
                    parent.display(),
                    e
                ))
            })
    }

    /// Locate the toolchain root inside an extracted staging directory
    pub fn staged_root(staging: &Path) -> GoupResult<PathBuf> {
        let root = staging.join(ARCHIVE_ROOT);
        if !root.is_dir() {
            return Err(GoupError::Install(format!(
                "Archive did not contain a top-level '{}' directory",
                ARCHIVE_ROOT
            )));
        }
        Ok(root)
    }

    /// Move the current installation aside and the staged one into place
    pub fn install(
        &self,
        staged_root: &Path,
        installed_version: &str,
    ) -> GoupResult<InstallOutcome> {
        if !staged_root.is_dir() {
            return Err(GoupError::Install(format!(
                "Staged toolchain not found: {}",
                staged_root.display()
            )));
        }

        let backup = if self.goroot.exists() {
            let backup = backup_dir(&self.goroot, installed_version)?;
            if backup.exists() {
                return Err(GoupError::Install(format!(
                    "Backup directory already exists: {}",
                    backup.display()
                )));
            }
            fs::rename(&self.goroot, &backup).map_err(|e| {
                GoupError::Install(format!(
                    "Failed to move {} to {}: {}",
                    self.goroot.display(),
                    backup.display(),
                    e
                ))
            })?;
            tracing::info!(
                from = %self.goroot.display(),
                to = %backup.display(),
                "backed up toolchain"
            );
            Some(backup)
        } else {
            None
        };

        if let Err(e) = fs::rename(staged_root, &self.goroot) {
            if let Some(ref backup) = backup {
                if let Err(restore) = fs::rename(backup, &self.goroot) {
                    tracing::error!(
                        backup = %backup.display(),
                        error = %restore,
                        "failed to restore previous toolchain"
                    );
                }
            }
            return Err(GoupError::Install(format!(
                "Failed to move {} to {}: {}",
                staged_root.display(),
                self.goroot.display(),
                e
            )));
        }

        Ok(InstallOutcome {
            goroot: self.goroot.clone(),
            backup,
        })
    }
}
