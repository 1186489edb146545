//! goup: keep a local Go toolchain up to date
//!
//! This crate provides the main goup library, re-exporting core functionality
//! from `goup-core` and organizing the modules that find, download and
//! install a newer Go release.

pub use goup_core::{format_error_with_help, ErrorHelp, GoupError, GoupResult};

/// Core module re-exported from goup-core.
pub mod core {
    pub use goup_core::core::*;
    pub use goup_core::*;
}

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// Archive extraction and GOROOT installation.
pub mod package;

/// Go release index and upgrade selection.
pub mod release;

/// Installed toolchain detection.
pub mod toolchain;

/// The upgrade pipeline.
pub mod updater;
