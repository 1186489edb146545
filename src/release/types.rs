//! Go release index type definitions
//!
//! Mirrors the JSON served by `https://go.dev/dl/?mode=json&include=all`.

use serde::{Deserialize, Serialize};

/// One downloadable artifact of a release for a single (os, arch) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseFile {
    pub filename: String,
    pub os: String,
    pub arch: String,
    pub version: String,
    pub sha256: String,
    pub size: u64,
    /// "archive", "installer" or "source"
    pub kind: String,
}

/// A release groups every platform artifact sharing one version tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub version: String,
    pub stable: bool,
    #[serde(default)]
    pub files: Vec<ReleaseFile>,
}

impl Release {
    /// Files built for the given platform
    pub fn files_for<'a>(
        &'a self,
        os: &'a str,
        arch: &'a str,
    ) -> impl Iterator<Item = &'a ReleaseFile> + 'a {
        self.files
            .iter()
            .filter(move |f| f.os == os && f.arch == arch)
    }
}

/// The toolchain currently present on this machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledVersion {
    pub os: String,
    pub arch: String,
    pub version: String,
}

impl InstalledVersion {
    pub fn new(
        os: impl Into<String>,
        arch: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
            version: version.into(),
        }
    }

    /// Platform string in Go's `os/arch` notation
    pub fn platform(&self) -> String {
        format!("{}/{}", self.os, self.arch)
    }
}
