//! Upgrade candidate selection over the release index.

use crate::core::{GoupError, GoupResult};
use crate::release::types::{InstalledVersion, Release, ReleaseFile};
use goup_core::ParsedVersion;

/// Filters applied while scanning releases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Also consider releases not marked stable (betas and release candidates)
    pub include_unstable: bool,
    /// Only consider files of this kind (e.g. "archive")
    pub kind: Option<String>,
}

impl SelectOptions {
    fn accepts_release(&self, release: &Release) -> bool {
        release.stable || self.include_unstable
    }

    fn accepts_file(&self, file: &ReleaseFile) -> bool {
        self.kind.as_deref().map_or(true, |kind| file.kind == kind)
    }
}

/// Find the first file newer than the installed toolchain for its platform.
///
/// Releases are scanned in the given order and the first match wins, so the
/// list must be sorted newest first (see [`sort_newest_first`]) to always
/// pick the latest release. Returns [`GoupError::NoUpgradeFound`] when no
/// file qualifies.
pub fn select_upgrade(
    releases: &[Release],
    installed: &InstalledVersion,
    options: &SelectOptions,
) -> GoupResult<ReleaseFile> {
    let baseline = ParsedVersion::parse(&installed.version)?;

    for release in releases {
        if !options.accepts_release(release) {
            tracing::debug!(version = %release.version, "skipping unstable release");
            continue;
        }

        for file in release.files_for(&installed.os, &installed.arch) {
            if !options.accepts_file(file) {
                continue;
            }
            match ParsedVersion::parse(&file.version) {
                Ok(version) if version > baseline => {
                    tracing::debug!(
                        filename = %file.filename,
                        installed = %installed.version,
                        "selected upgrade candidate"
                    );
                    return Ok(file.clone());
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        filename = %file.filename,
                        error = %e,
                        "skipping file with unparsable version"
                    );
                }
            }
        }
    }

    Err(GoupError::NoUpgradeFound)
}

/// Sort releases newest first. Releases whose version does not parse are dropped.
pub fn sort_newest_first(releases: Vec<Release>) -> Vec<Release> {
    let mut keyed: Vec<(ParsedVersion, Release)> = releases
        .into_iter()
        .filter_map(|release| match ParsedVersion::parse(&release.version) {
            Ok(version) => Some((version, release)),
            Err(e) => {
                tracing::warn!(
                    version = %release.version,
                    error = %e,
                    "dropping release with unparsable version"
                );
                None
            }
        })
        .collect();

    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().map(|(_, release)| release).collect()
}

/// Releases offering at least one acceptable file for the installed platform
pub fn available_for<'a>(
    releases: &'a [Release],
    installed: &InstalledVersion,
    options: &SelectOptions,
) -> Vec<&'a Release> {
    releases
        .iter()
        .filter(|release| options.accepts_release(release))
        .filter(|release| {
            release
                .files_for(&installed.os, &installed.arch)
                .any(|file| options.accepts_file(file))
        })
        .collect()
}
