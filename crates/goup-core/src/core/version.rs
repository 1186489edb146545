//! Go release version parsing and ordering.
//!
//! Go tags releases as `go1.<major>[.<minor>][beta<n>|rc<n>]`, e.g.
//! `go1.22.3`, `go1.22rc1` or `go1.9beta2`. The leading `go1.` is the
//! language compatibility marker and carries no ordering information, so the
//! parsed model keeps only the two numeric components after it plus an
//! optional pre-release tag.

use crate::core::error::{GoupError, GoupResult};
use std::cmp::Ordering;
use std::fmt;

const VERSION_PREFIX: &str = "go1.";
const BARE_VERSION: &str = "go1";

/// Pre-release tag of a release candidate or beta.
///
/// Betas precede release candidates of the same `major.minor`, and tags of
/// the same kind are ordered by their numeric suffix, so `beta10 > beta9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    Beta(u32),
    Rc(u32),
}

impl PreRelease {
    /// Parse a tag such as `beta1` or `rc2`. A tag without digits counts as 0.
    pub fn parse(tag: &str) -> GoupResult<Self> {
        let (kind, number): (fn(u32) -> PreRelease, &str) =
            if let Some(rest) = tag.strip_prefix("beta") {
                (PreRelease::Beta, rest)
            } else if let Some(rest) = tag.strip_prefix("rc") {
                (PreRelease::Rc, rest)
            } else {
                return Err(GoupError::Parse(format!(
                    "Unknown pre-release tag: '{}'",
                    tag
                )));
            };

        if number.is_empty() {
            return Ok(kind(0));
        }

        let n = number.parse::<u32>().map_err(|_| {
            GoupError::Parse(format!("Invalid pre-release number in tag: '{}'", tag))
        })?;
        Ok(kind(n))
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreRelease::Beta(n) => write!(f, "beta{}", n),
            PreRelease::Rc(n) => write!(f, "rc{}", n),
        }
    }
}

/// A parsed Go release version.
///
/// Ordering is total: `major`, then `minor`, then the pre-release tag, where
/// a final release (no tag) outranks every beta or rc of the same
/// `major.minor`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedVersion {
    pub major: u64,
    pub minor: u64,
    pub pre_release: Option<PreRelease>,
}

impl ParsedVersion {
    pub fn new(major: u64, minor: u64) -> Self {
        Self {
            major,
            minor,
            pre_release: None,
        }
    }

    pub fn with_pre_release(major: u64, minor: u64, pre_release: PreRelease) -> Self {
        Self {
            major,
            minor,
            pre_release: Some(pre_release),
        }
    }

    /// Parse a version string (e.g. "go1.22.3", "go1.22rc1", "go1.9beta2", "go1")
    ///
    /// The minor component defaults to 0 when absent. A missing or
    /// non-numeric major component is an error.
    pub fn parse(version: &str) -> GoupResult<Self> {
        let version = version.trim();
        if version.is_empty() {
            return Err(GoupError::Parse("Empty version string".to_string()));
        }

        let (numeric, pre_release) = split_pre_release(version)?;

        // `go1` is the very first release and predates `go1.1`.
        if numeric == BARE_VERSION {
            return Ok(Self {
                major: 0,
                minor: 0,
                pre_release,
            });
        }

        let numeric = numeric.strip_prefix(VERSION_PREFIX).unwrap_or(numeric);
        let mut parts = numeric.split('.');

        let major_part = parts.next().unwrap_or_default();
        let major = major_part.parse::<u64>().map_err(|_| {
            GoupError::Parse(format!(
                "Invalid major version '{}' in '{}'",
                major_part, version
            ))
        })?;

        let minor = match parts.next() {
            Some(minor_part) => minor_part.parse::<u64>().map_err(|_| {
                GoupError::Parse(format!(
                    "Invalid minor version '{}' in '{}'",
                    minor_part, version
                ))
            })?,
            None => 0,
        };

        Ok(Self {
            major,
            minor,
            pre_release,
        })
    }

    /// Whether this is a final (non beta/rc) release
    pub fn is_final(&self) -> bool {
        self.pre_release.is_none()
    }

    /// Textual pre-release tag, empty for a final release
    pub fn pre_release_tag(&self) -> String {
        self.pre_release
            .map(|tag| tag.to_string())
            .unwrap_or_default()
    }
}

/// Split off a `beta`/`rc` suffix. A tag at position 0 is not a tag.
fn split_pre_release(version: &str) -> GoupResult<(&str, Option<PreRelease>)> {
    let index = match version.find("beta") {
        Some(i) if i > 0 => Some(i),
        _ => match version.find("rc") {
            Some(i) if i > 0 => Some(i),
            _ => None,
        },
    };

    match index {
        Some(i) => Ok((&version[..i], Some(PreRelease::parse(&version[i..])?))),
        None => Ok((version, None)),
    }
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(tag) = &self.pre_release {
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}

/// Three-way comparison of two version strings
pub fn compare(a: &str, b: &str) -> GoupResult<Ordering> {
    Ok(ParsedVersion::parse(a)?.cmp(&ParsedVersion::parse(b)?))
}

/// Is `a` strictly newer than `b`?
pub fn is_greater(a: &str, b: &str) -> GoupResult<bool> {
    Ok(compare(a, b)?.is_gt())
}

/// Is `a` strictly older than `b`? Sort predicate, the mirror of [`is_greater`].
pub fn is_less(a: &str, b: &str) -> GoupResult<bool> {
    Ok(compare(a, b)?.is_lt())
}
