use crate::core::{GoupError, GoupResult};
use crate::di::ToolchainProbe;
use crate::release::types::InstalledVersion;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str;

#[cfg(windows)]
const GO_BINARY: &str = "go.exe";
#[cfg(not(windows))]
const GO_BINARY: &str = "go";

/// Parse the output of `go version`
///
/// Handles lines like:
/// - "go version go1.22.3 linux/amd64"
/// - "go version go1.23rc1 darwin/arm64"
pub fn parse_version_output(output: &str) -> GoupResult<InstalledVersion> {
    let line = output.lines().next().unwrap_or("").trim();
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() < 4 || tokens[0] != "go" || tokens[1] != "version" {
        return Err(GoupError::Probe(format!(
            "Unrecognized `go version` output: '{}'",
            line
        )));
    }

    let platform = tokens[tokens.len() - 1];
    let (os, arch) = platform.split_once('/').ok_or_else(|| {
        GoupError::Probe(format!("Invalid platform '{}' in `go version` output", platform))
    })?;

    if os.is_empty() || arch.is_empty() {
        return Err(GoupError::Probe(format!(
            "Invalid platform '{}' in `go version` output",
            platform
        )));
    }

    Ok(InstalledVersion::new(os, arch, tokens[2]))
}

/// Detects the installed Go toolchain
pub struct GoToolchainDetector {
    go: PathBuf,
}

impl GoToolchainDetector {
    /// Use a specific `go` binary
    pub fn with_binary(go: PathBuf) -> Self {
        Self { go }
    }

    /// Locate `go`, preferring `<goroot>/bin/go` over PATH
    pub fn locate(goroot: Option<&Path>) -> GoupResult<Self> {
        if let Some(goroot) = goroot {
            let candidate = goroot.join("bin").join(GO_BINARY);
            if candidate.is_file() {
                return Ok(Self::with_binary(candidate));
            }
            tracing::debug!(
                goroot = %goroot.display(),
                "no go binary under GOROOT, searching PATH"
            );
        }

        let go = which::which("go")
            .map_err(|e| GoupError::Probe(format!("Could not find `go` on PATH: {}", e)))?;
        Ok(Self::with_binary(go))
    }

    pub fn binary(&self) -> &Path {
        &self.go
    }

    /// Run `go version` and parse the installed version
    pub fn detect(&self) -> GoupResult<InstalledVersion> {
        let stdout = self.run(&["version"])?;
        parse_version_output(&stdout)
    }

    /// Run `go env GOROOT`
    pub fn goroot(&self) -> GoupResult<PathBuf> {
        let stdout = self.run(&["env", "GOROOT"])?;
        let goroot = stdout.trim();
        if goroot.is_empty() {
            return Err(GoupError::Probe("`go env GOROOT` returned nothing".to_string()));
        }
        Ok(PathBuf::from(goroot))
    }

    fn run(&self, args: &[&str]) -> GoupResult<String> {
        let display = format!("{} {}", self.go.display(), args.join(" "));
        let output = Command::new(&self.go)
            .args(args)
            .output()
            .map_err(|e| GoupError::Probe(format!("Failed to run '{}': {}", display, e)))?;

        if !output.status.success() {
            return Err(GoupError::Probe(format!(
                "'{}' failed: {}",
                display,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        str::from_utf8(&output.stdout)
            .map(str::to_string)
            .map_err(|e| {
                GoupError::Probe(format!("Invalid UTF-8 in '{}' output: {}", display, e))
            })
    }
}

impl ToolchainProbe for GoToolchainDetector {
    fn installed_version(&self) -> GoupResult<InstalledVersion> {
        self.detect()
    }

    fn goroot(&self) -> GoupResult<PathBuf> {
        GoToolchainDetector::goroot(self)
    }
}
