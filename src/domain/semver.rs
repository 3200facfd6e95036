//! Three-component version numbers
//!
//! `Semver` only knows `major.minor.patch`. Pre-release and build metadata are
//! not part of the @types versioning scheme and are rejected by the parser.

use crate::error::SemverError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static SEMVER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?$").unwrap());

/// An immutable `major.minor.patch` version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Semver {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Semver {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string.
    ///
    /// Without `coerce` the text must be exactly `X.Y.Z`. With `coerce`,
    /// missing minor and patch components default to 0.
    pub fn parse(text: &str, coerce: bool) -> Result<Self, SemverError> {
        Self::try_parse(text, coerce).ok_or_else(|| SemverError::parse(text, coerce))
    }

    /// Like [`Semver::parse`], but returns `None` on malformed input
    pub fn try_parse(text: &str, coerce: bool) -> Option<Self> {
        let caps = SEMVER_RE.captures(text)?;
        let minor = caps.get(2);
        let patch = caps.get(3);
        if !coerce && (minor.is_none() || patch.is_none()) {
            return None;
        }

        let component = |m: Option<regex::Match<'_>>| match m {
            Some(m) => m.as_str().parse::<u64>().ok(),
            None => Some(0),
        };

        Some(Self::new(
            caps[1].parse().ok()?,
            component(minor)?,
            component(patch)?,
        ))
    }

    /// Canonical `major.minor.patch` rendering
    pub fn version_string(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    pub fn equals(&self, other: &Semver) -> bool {
        compare(self, other) == Ordering::Equal
    }

    /// True only when strictly greater than `other`
    pub fn greater_than(&self, other: &Semver) -> bool {
        compare(self, other) == Ordering::Greater
    }

    /// Same major and minor, patch + 1; `None` when the patch is already `u64::MAX`
    pub fn next_patch(&self) -> Option<Self> {
        let patch = self.patch.checked_add(1)?;
        Some(Self::new(self.major, self.minor, patch))
    }
}

/// Order two versions by major, then minor, then patch
pub fn compare(x: &Semver, y: &Semver) -> Ordering {
    x.major
        .cmp(&y.major)
        .then_with(|| x.minor.cmp(&y.minor))
        .then_with(|| x.patch.cmp(&y.patch))
}

impl Ord for Semver {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl PartialOrd for Semver {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(u64, u64, u64)> for Semver {
    fn from((major, minor, patch): (u64, u64, u64)) -> Self {
        Self::new(major, minor, patch)
    }
}

impl fmt::Display for Semver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Semver {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, false)
    }
}

impl TryFrom<String> for Semver {
    type Error = SemverError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value, false)
    }
}

impl From<Semver> for String {
    fn from(value: Semver) -> Self {
        value.version_string()
    }
}
