//! Dependency injection infrastructure for goup
//!
//! The network and the local toolchain sit behind traits so the upgrade
//! pipeline can run against in-memory fakes in tests.
//!
//! # Example (Production)
//! ```no_run
//! use goup::di::ServiceContainer;
//!
//! # fn example() -> goup::core::GoupResult<()> {
//! let container = ServiceContainer::new(None)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example (Testing)
//! ```
//! use goup::config::Config;
//! use goup::di::{ServiceContainer, mocks::*};
//! use goup::release::InstalledVersion;
//! use std::sync::Arc;
//!
//! let releases = Arc::new(MockReleaseSource::new(Vec::new()));
//! let probe = Arc::new(MockToolchainProbe::new(
//!     InstalledVersion::new("linux", "amd64", "go1.22.0"),
//!     "/usr/local/go",
//! ));
//!
//! let container = ServiceContainer::with_providers(Config::default(), releases, probe);
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{ConfigProvider, ReleaseSource, ToolchainProbe};
