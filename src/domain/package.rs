//! Package records: typings packages and not-needed (deprecated) packages

use super::Semver;
use serde::{Deserialize, Serialize};
use std::fmt;

/// npm scope every published package lives under
pub const TYPES_SCOPE: &str = "types";

/// Major/minor pair identifying one version directory of a typings package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MajorMinor {
    pub major: u64,
    pub minor: u64,
}

/// Identifies a typings package version as listed in `versions.json`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageId {
    pub name: String,
    pub version: MajorMinor,
}

impl PackageId {
    pub fn new(name: impl Into<String>, major: u64, minor: u64) -> Self {
        Self {
            name: name.into(),
            version: MajorMinor { major, minor },
        }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}.{}",
            self.name, self.version.major, self.version.minor
        )
    }
}

/// A typings package as recorded in the package index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingsData {
    pub name: String,
    pub library_name: String,
    pub major: u64,
    pub minor: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

impl TypingsData {
    pub fn id(&self) -> PackageId {
        PackageId::new(&self.name, self.major, self.minor)
    }

    pub fn full_npm_name(&self) -> String {
        full_npm_name(&self.name)
    }
}

/// A package that is no longer needed because the library ships its own types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotNeededPackage {
    pub name: String,
    /// Version at which the deprecation is published
    #[serde(rename = "asOfVersion")]
    pub version: Semver,
    pub library_name: String,
    #[serde(rename = "sourceRepoURL")]
    pub source_repo_url: String,
}

impl NotNeededPackage {
    pub fn new(
        name: impl Into<String>,
        version: Semver,
        library_name: impl Into<String>,
        source_repo_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            library_name: library_name.into(),
            source_repo_url: source_repo_url.into(),
        }
    }

    /// Copy of this package deprecated at a different version
    pub fn with_version(&self, version: Semver) -> Self {
        Self {
            version,
            ..self.clone()
        }
    }

    pub fn full_npm_name(&self) -> String {
        full_npm_name(&self.name)
    }

    /// Name as it appears in registry URLs and cache keys
    pub fn full_escaped_npm_name(&self) -> String {
        full_escaped_npm_name(&self.name)
    }

    /// `name@version`, used in log lines
    pub fn desc(&self) -> String {
        format!("{}@{}", self.full_npm_name(), self.version)
    }
}

/// Maps a scoped library name onto a name valid inside the types scope.
///
/// `@babel/core` becomes `babel__core`, unscoped names pass through.
pub fn mangle_scoped_name(name: &str) -> String {
    match name.strip_prefix('@') {
        Some(scoped) => scoped.replacen('/', "__", 1),
        None => name.to_string(),
    }
}

pub fn full_npm_name(name: &str) -> String {
    format!("@{}/{}", TYPES_SCOPE, mangle_scoped_name(name))
}

pub fn full_escaped_npm_name(name: &str) -> String {
    format!("@{}%2f{}", TYPES_SCOPE, mangle_scoped_name(name))
}
