//! Operator-facing hints attached to errors.

use crate::core::error::GoupError;

/// Suggests a next step for an error.
pub trait ErrorHelp {
    fn help(&self) -> Option<&'static str>;
}

impl ErrorHelp for GoupError {
    fn help(&self) -> Option<&'static str> {
        match self {
            GoupError::NoUpgradeFound => Some("The installed toolchain is already the latest release."),
            GoupError::Probe(_) => {
                Some("Make sure `go` is on PATH or set GOROOT / pass --goroot.")
            }
            GoupError::Fetch(_) => {
                Some("Check your network connection and the `release_index_url` setting.")
            }
            GoupError::Extract(_) => {
                Some("The staging directory may be incomplete; it is discarded, rerun the upgrade.")
            }
            GoupError::Install(_) => Some(
                "Remove or rename the conflicting directory next to GOROOT and try again.",
            ),
            GoupError::Config(_) => {
                Some("Run `goup config path` to locate the config file and fix or delete it.")
            }
            _ => None,
        }
    }
}

/// Renders an error followed by its hint, if any.
pub fn format_error_with_help(error: &GoupError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n  hint: {}", error, help),
        None => format!("Error: {}", error),
    }
}
