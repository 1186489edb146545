//! The upgrade pipeline: resolve, download, extract, install.
//!
//! Every step runs strictly after the previous one. The release source and
//! toolchain probe come from a [`ServiceContainer`], so the whole pipeline
//! runs against fakes in tests.

use crate::core::{GoupError, GoupResult};
use crate::di::{ReleaseSource, ServiceContainer, ToolchainProbe};
use crate::package::{ArchiveExtractor, ExtractSummary, InstallOutcome, ToolchainInstaller};
use crate::release::{
    select_upgrade, sort_newest_first, InstalledVersion, Release, ReleaseFile, SelectOptions,
};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Settings for one upgrade run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeOptions {
    pub select: SelectOptions,
    /// Stage the new toolchain but leave GOROOT untouched
    pub dry_run: bool,
    /// Installation directory; probed from the toolchain when absent
    pub goroot: Option<PathBuf>,
}

/// The installed toolchain and the file chosen to replace it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradePlan {
    pub installed: InstalledVersion,
    pub file: ReleaseFile,
}

/// A downloaded and extracted toolchain waiting to be installed.
///
/// Dropping it removes the staging directory.
pub struct StagedToolchain {
    staging: TempDir,
    pub summary: ExtractSummary,
    pub downloaded_bytes: u64,
}

impl StagedToolchain {
    pub fn staging_dir(&self) -> &Path {
        self.staging.path()
    }

    /// The extracted `go` directory
    pub fn root(&self) -> GoupResult<PathBuf> {
        ToolchainInstaller::staged_root(self.staging.path())
    }
}

pub struct Updater {
    releases: Arc<dyn ReleaseSource>,
    probe: Arc<dyn ToolchainProbe>,
}

impl Updater {
    pub fn new(container: &ServiceContainer) -> Self {
        Self::with_providers(container.releases.clone(), container.probe.clone())
    }

    pub fn with_providers(releases: Arc<dyn ReleaseSource>, probe: Arc<dyn ToolchainProbe>) -> Self {
        Self { releases, probe }
    }

    pub fn installed_version(&self) -> GoupResult<InstalledVersion> {
        self.probe.installed_version()
    }

    /// Fetch the release index, newest first
    pub async fn releases(&self) -> GoupResult<Vec<Release>> {
        let releases = self.releases.fetch_releases().await?;
        Ok(sort_newest_first(releases))
    }

    /// Pick the upgrade target for the installed toolchain
    pub async fn plan(&self, options: &SelectOptions) -> GoupResult<UpgradePlan> {
        let installed = self.probe.installed_version()?;
        let releases = self.releases().await?;
        let file = select_upgrade(&releases, &installed, options)?;

        tracing::info!(
            installed = %installed.version,
            target = %file.version,
            platform = %installed.platform(),
            "upgrade available"
        );

        Ok(UpgradePlan { installed, file })
    }

    /// GOROOT from the options, falling back to the toolchain's own report
    pub fn resolve_goroot(&self, options: &UpgradeOptions) -> GoupResult<PathBuf> {
        match &options.goroot {
            Some(goroot) => Ok(goroot.clone()),
            None => self.probe.goroot(),
        }
    }

    /// Download the planned file and extract it into a fresh staging directory.
    ///
    /// Real runs stage next to GOROOT so the swap is a rename on one
    /// filesystem; dry runs stage in the system temp directory.
    pub async fn stage(
        &self,
        plan: &UpgradePlan,
        goroot: &Path,
        dry_run: bool,
    ) -> GoupResult<StagedToolchain> {
        self.stage_until(plan, goroot, dry_run, std::future::pending())
            .await
    }

    /// [`Updater::stage`], abandoned with `Aborted` once `shutdown` completes.
    ///
    /// An interrupted extraction is stopped and joined before the staging
    /// directory is removed.
    pub async fn stage_until<F>(
        &self,
        plan: &UpgradePlan,
        goroot: &Path,
        dry_run: bool,
        shutdown: F,
    ) -> GoupResult<StagedToolchain>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let staging = if dry_run {
            tempfile::Builder::new()
                .prefix("goup-staging-")
                .tempdir()
                .map_err(|e| GoupError::Install(format!("Failed to create staging directory: {}", e)))?
        } else {
            ToolchainInstaller::new(goroot.to_path_buf()).create_staging()?
        };

        let archive = tempfile::Builder::new()
            .prefix("goup-download-")
            .tempfile()?;
        let archive_path = archive.path().to_path_buf();

        let downloaded_bytes = tokio::select! {
            biased;
            _ = &mut shutdown => {
                return Err(GoupError::Aborted("download interrupted".to_string()));
            }
            downloaded = self.releases.download(&plan.file, &archive_path) => downloaded?,
        };
        tracing::info!(file = %plan.file.filename, bytes = downloaded_bytes, "downloaded");

        let cancel = Arc::new(AtomicBool::new(false));
        let extractor =
            ArchiveExtractor::new(staging.path().to_path_buf()).with_cancel(cancel.clone());
        let mut extraction =
            tokio::task::spawn_blocking(move || extractor.extract_file(&archive_path));

        let joined = tokio::select! {
            biased;
            _ = &mut shutdown => {
                cancel.store(true, Ordering::Relaxed);
                if let Err(e) = extraction.await {
                    tracing::error!(error = %e, "extraction task failed while cancelling");
                }
                return Err(GoupError::Aborted("extraction interrupted".to_string()));
            }
            joined = &mut extraction => joined,
        };
        let summary =
            joined.map_err(|e| GoupError::Extract(format!("Extraction task failed: {}", e)))??;
        drop(archive);

        let staged = StagedToolchain {
            staging,
            summary,
            downloaded_bytes,
        };
        staged.root()?;
        Ok(staged)
    }

    /// Swap the staged toolchain into GOROOT
    pub fn install(
        &self,
        plan: &UpgradePlan,
        staged: StagedToolchain,
        goroot: &Path,
    ) -> GoupResult<InstallOutcome> {
        let root = staged.root()?;
        ToolchainInstaller::new(goroot.to_path_buf()).install(&root, &plan.installed.version)
    }
}
