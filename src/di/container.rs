//! Service container for dependency injection

use super::traits::{ReleaseSource, ToolchainProbe};
use crate::config::Config;
use crate::core::GoupResult;
use crate::release::client::ReleaseClient;
use crate::toolchain::detector::GoToolchainDetector;
use std::path::Path;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the loaded configuration plus the release source and toolchain
/// probe as trait objects, so tests can swap in fakes.
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<Config>,
    pub releases: Arc<dyn ReleaseSource>,
    pub probe: Arc<dyn ToolchainProbe>,
}

impl ServiceContainer {
    /// Create a container with production implementations
    ///
    /// Loads the config from disk, builds the HTTP client and locates the
    /// `go` binary (under `goroot` if given, else the configured GOROOT,
    /// else PATH).
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded, the HTTP client
    /// cannot be built or no `go` binary can be found.
    pub fn new(goroot: Option<&Path>) -> GoupResult<Self> {
        Self::with_config(Config::load()?, goroot)
    }

    /// Create a container with production implementations and a given config
    pub fn with_config(config: Config, goroot: Option<&Path>) -> GoupResult<Self> {
        let config = Arc::new(config);
        let client = ReleaseClient::new(config.clone())?;
        let detector = GoToolchainDetector::locate(goroot.or(config.goroot.as_deref()))?;

        Ok(Self {
            config,
            releases: Arc::new(client),
            probe: Arc::new(detector),
        })
    }

    /// Create a container with custom providers
    pub fn with_providers(
        config: Config,
        releases: Arc<dyn ReleaseSource>,
        probe: Arc<dyn ToolchainProbe>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            releases,
            probe,
        }
    }
}
