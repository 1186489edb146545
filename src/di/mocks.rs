//! Mock implementations of service traits for testing

use super::traits::{ConfigProvider, ReleaseSource, ToolchainProbe};
use crate::core::{GoupError, GoupResult};
use crate::release::types::{InstalledVersion, Release, ReleaseFile};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use goup::di::mocks::MockConfigProvider;
/// use goup::di::ConfigProvider;
///
/// let config = MockConfigProvider::new("http://127.0.0.1:9999");
/// assert_eq!(config.release_index_url(), "http://127.0.0.1:9999/dl/?mode=json");
/// assert_eq!(config.download_url("go.tar.gz"), "http://127.0.0.1:9999/go/go.tar.gz");
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub index_url: String,
    pub download_base_url: String,
    pub timeout: Duration,
}

impl MockConfigProvider {
    /// Point both the index and downloads at a (mock) server
    pub fn new(server_uri: &str) -> Self {
        Self {
            index_url: format!("{}/dl/?mode=json", server_uri),
            download_base_url: format!("{}/go", server_uri),
            timeout: Duration::from_secs(5),
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn release_index_url(&self) -> &str {
        &self.index_url
    }

    fn download_url(&self, filename: &str) -> String {
        format!("{}/{}", self.download_base_url, filename)
    }

    fn request_timeout(&self) -> Duration {
        self.timeout
    }
}

/// Mock release source for testing
///
/// Serves a fixed release list and in-memory archives keyed by file name.
#[derive(Clone, Default)]
pub struct MockReleaseSource {
    releases: Vec<Release>,
    archives: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    downloads: Arc<Mutex<Vec<String>>>,
    fail_fetch: bool,
}

impl MockReleaseSource {
    pub fn new(releases: Vec<Release>) -> Self {
        Self {
            releases,
            ..Default::default()
        }
    }

    /// A source whose index fetch always fails
    pub fn failing() -> Self {
        Self {
            fail_fetch: true,
            ..Default::default()
        }
    }

    /// Register the bytes served for a file name
    pub fn add_archive(&self, filename: &str, bytes: Vec<u8>) {
        self.archives
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(filename.to_string(), bytes);
    }

    /// File names downloaded so far
    pub fn downloads(&self) -> Vec<String> {
        self.downloads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ReleaseSource for MockReleaseSource {
    async fn fetch_releases(&self) -> GoupResult<Vec<Release>> {
        if self.fail_fetch {
            return Err(GoupError::Fetch("mock fetch failure".to_string()));
        }
        Ok(self.releases.clone())
    }

    async fn download(&self, file: &ReleaseFile, dest: &Path) -> GoupResult<u64> {
        let bytes = self
            .archives
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&file.filename)
            .cloned()
            .ok_or_else(|| GoupError::Fetch(format!("HTTP 404 Not Found: {}", file.filename)))?;

        std::fs::write(dest, &bytes)?;
        self.downloads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(file.filename.clone());
        Ok(bytes.len() as u64)
    }
}

/// Mock toolchain probe for testing
#[derive(Clone)]
pub struct MockToolchainProbe {
    pub installed: InstalledVersion,
    pub goroot: PathBuf,
}

impl MockToolchainProbe {
    pub fn new(installed: InstalledVersion, goroot: impl Into<PathBuf>) -> Self {
        Self {
            installed,
            goroot: goroot.into(),
        }
    }
}

impl ToolchainProbe for MockToolchainProbe {
    fn installed_version(&self) -> GoupResult<InstalledVersion> {
        Ok(self.installed.clone())
    }

    fn goroot(&self) -> GoupResult<PathBuf> {
        Ok(self.goroot.clone())
    }
}
