//! Installed Go toolchain detection

pub mod detector;

pub use detector::{parse_version_output, GoToolchainDetector};
