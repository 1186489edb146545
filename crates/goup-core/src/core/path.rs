use crate::core::error::{GoupError, GoupResult};
use std::path::{Path, PathBuf};

/// Get the goup home directory
///
/// `GOUP_HOME` overrides the platform default:
/// - Windows: %APPDATA%\goup
/// - Linux: ~/.config/goup
/// - macOS: ~/Library/Application Support/goup
pub fn goup_home() -> GoupResult<PathBuf> {
    if let Ok(home) = std::env::var("GOUP_HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    let config_dir = dirs::config_dir()
        .ok_or_else(|| GoupError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("goup"))
}

/// Get the config file path (`<goup home>/config.yaml`)
pub fn config_file() -> GoupResult<PathBuf> {
    Ok(goup_home()?.join("config.yaml"))
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> GoupResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Backup location for an installation being replaced: `<goroot>@<version>`
pub fn backup_dir(goroot: &Path, version: &str) -> GoupResult<PathBuf> {
    let name = goroot
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| GoupError::Path(format!("Invalid GOROOT: {}", goroot.display())))?;
    Ok(goroot.with_file_name(format!("{}@{}", name, version)))
}
