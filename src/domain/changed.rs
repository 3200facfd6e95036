//! Packages with a pending publish, as listed in the versions diff

use super::{NotNeededPackage, Semver, TypingsData};
use serde::{Deserialize, Serialize};

/// A typings package that needs a new version published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedTyping {
    /// Package record resolved from the index
    pub data: TypingsData,
    /// Version to publish
    pub version: Semver,
    /// Version that carried the `latest` tag before this publish, if any
    pub latest_version: Option<Semver>,
}

impl ChangedTyping {
    pub fn new(data: TypingsData, version: Semver, latest_version: Option<Semver>) -> Self {
        Self {
            data,
            version,
            latest_version,
        }
    }
}

/// Everything that needs publishing in one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedPackages {
    pub changed_typings: Vec<ChangedTyping>,
    pub changed_not_needed_packages: Vec<NotNeededPackage>,
}

impl ChangedPackages {
    pub fn new(
        changed_typings: Vec<ChangedTyping>,
        changed_not_needed_packages: Vec<NotNeededPackage>,
    ) -> Self {
        Self {
            changed_typings,
            changed_not_needed_packages,
        }
    }

    /// Returns true if nothing needs publishing
    pub fn is_empty(&self) -> bool {
        self.changed_typings.is_empty() && self.changed_not_needed_packages.is_empty()
    }

    /// Total number of packages across both lists
    pub fn len(&self) -> usize {
        self.changed_typings.len() + self.changed_not_needed_packages.len()
    }
}
