//! Trait definitions for dependency injection

use crate::core::GoupResult;
use crate::release::types::{InstalledVersion, Release, ReleaseFile};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Trait for configuration access
///
/// Provides read-only access to the settings the network layer needs.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Get the release index URL
    fn release_index_url(&self) -> &str;

    /// Build the download URL for a release file name
    fn download_url(&self, filename: &str) -> String;

    /// Get the HTTP request timeout
    fn request_timeout(&self) -> Duration;
}

/// Trait for the remote release index
///
/// Fetches release metadata and downloads release files.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch every release listed in the index, in index order
    async fn fetch_releases(&self) -> GoupResult<Vec<Release>>;

    /// Download a release file to `dest`, returning the number of bytes written
    async fn download(&self, file: &ReleaseFile, dest: &Path) -> GoupResult<u64>;
}

/// Trait for querying the locally installed toolchain
pub trait ToolchainProbe: Send + Sync {
    /// Version and platform of the installed toolchain
    fn installed_version(&self) -> GoupResult<InstalledVersion>;

    /// Installation directory of the installed toolchain
    fn goroot(&self) -> GoupResult<PathBuf>;
}
