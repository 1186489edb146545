use thiserror::Error;

pub type GoupResult<T> = Result<T, GoupError>;

#[derive(Error, Debug)]
pub enum GoupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A version string could not be parsed.
    #[error("Invalid version: {0}")]
    Parse(String),

    /// No release newer than the installed toolchain matches this platform.
    /// This is the normal outcome when already on the latest version.
    #[error("No new version file found")]
    NoUpgradeFound,

    #[error("Extract error: {0}")]
    Extract(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The installed toolchain could not be queried.
    #[error("Toolchain probe error: {0}")]
    Probe(String),

    #[error("Install error: {0}")]
    Install(String),

    /// The operator cancelled the operation (declined prompt or Ctrl-C).
    #[error("Aborted: {0}")]
    Aborted(String),
}

impl GoupError {
    /// Whether this error is the expected "already on latest" outcome.
    pub fn is_no_upgrade(&self) -> bool {
        matches!(self, GoupError::NoUpgradeFound)
    }
}
