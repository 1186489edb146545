use crate::core::path::{config_file, ensure_dir};
use crate::core::{GoupError, GoupResult};
use crate::di::ConfigProvider;
use crate::release::SelectOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Go release index URL (JSON list of releases)
    #[serde(default = "default_release_index_url")]
    pub release_index_url: String,

    /// Base URL that release file names are appended to for downloads
    #[serde(default = "default_download_base_url")]
    pub download_base_url: String,

    /// Consider betas and release candidates as upgrade targets
    #[serde(default)]
    pub include_unstable: bool,

    /// Download and extract into a staging directory, but do not replace GOROOT
    #[serde(default = "default_true")]
    pub dry_run: bool,

    /// Only select release files of this kind
    /// - "archive": tar.gz / zip distributions (default)
    /// - "installer": .pkg / .msi installers
    /// - "source": source tarballs
    #[serde(default = "default_archive_kind")]
    pub archive_kind: Option<String>,

    /// Installation directory used when GOROOT is not set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goroot: Option<PathBuf>,

    /// Timeout for HTTP requests, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_release_index_url() -> String {
    "https://go.dev/dl/?mode=json&include=all".to_string()
}

fn default_download_base_url() -> String {
    "https://dl.google.com/go/".to_string()
}

fn default_archive_kind() -> Option<String> {
    Some("archive".to_string())
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            release_index_url: default_release_index_url(),
            download_base_url: default_download_base_url(),
            include_unstable: false,
            dry_run: true,
            archive_kind: default_archive_kind(),
            goroot: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from the goup home directory, falling back to defaults if it doesn't exist
    ///
    /// Config locations (`GOUP_HOME` overrides the directory):
    /// - Windows: %APPDATA%\goup\config.yaml
    /// - Linux: ~/.config/goup/config.yaml
    /// - macOS: ~/Library/Application Support/goup/config.yaml
    pub fn load() -> GoupResult<Self> {
        Self::load_from(&config_file()?)
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> GoupResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| GoupError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        Ok(config)
    }

    /// Save config to the goup home directory
    pub fn save(&self) -> GoupResult<PathBuf> {
        let path = config_file()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> GoupResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| GoupError::Path("Invalid config path".to_string()))?;

        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| GoupError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> GoupResult<()> {
        if self.release_index_url.trim().is_empty() {
            return Err(GoupError::Config("release_index_url must not be empty".to_string()));
        }
        if self.download_base_url.trim().is_empty() {
            return Err(GoupError::Config("download_base_url must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(GoupError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Download URL for a release file name
    pub fn download_url(&self, filename: &str) -> String {
        format!("{}/{}", self.download_base_url.trim_end_matches('/'), filename)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Selector options, with `include_unstable` forced on by a CLI/env flag
    pub fn select_options(&self, include_unstable: bool) -> SelectOptions {
        SelectOptions {
            include_unstable: include_unstable || self.include_unstable,
            kind: self.archive_kind.clone(),
        }
    }
}

impl ConfigProvider for Config {
    fn release_index_url(&self) -> &str {
        &self.release_index_url
    }

    fn download_url(&self, filename: &str) -> String {
        Config::download_url(self, filename)
    }

    fn request_timeout(&self) -> Duration {
        Config::request_timeout(self)
    }
}
