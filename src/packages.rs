//! Package index lookups
//!
//! The diff file only carries ids. `AllPackages` turns them back into full
//! package records; `PackageIndex` is the JSON-file-backed implementation.

use crate::domain::{MajorMinor, NotNeededPackage, PackageId, TypingsData};
use crate::error::{AppError, DataError, LookupError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Read-only id → record lookup
pub trait AllPackages {
    fn get_typings_data(&self, id: &PackageId) -> Result<&TypingsData, LookupError>;

    fn get_not_needed_package(&self, name: &str) -> Result<&NotNeededPackage, LookupError>;
}

/// On-disk layout of the package index
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageIndexFile {
    #[serde(default)]
    typings: Vec<TypingsData>,
    #[serde(default)]
    not_needed_packages: Vec<NotNeededPackage>,
}

/// In-memory package index
#[derive(Debug, Default)]
pub struct PackageIndex {
    typings: HashMap<String, HashMap<MajorMinor, TypingsData>>,
    not_needed: HashMap<String, NotNeededPackage>,
}

impl PackageIndex {
    pub fn new(typings: Vec<TypingsData>, not_needed: Vec<NotNeededPackage>) -> Self {
        let mut index = Self::default();
        for data in typings {
            let version = MajorMinor {
                major: data.major,
                minor: data.minor,
            };
            index
                .typings
                .entry(data.name.clone())
                .or_default()
                .insert(version, data);
        }
        for pkg in not_needed {
            index.not_needed.insert(pkg.name.clone(), pkg);
        }
        index
    }

    /// Parse an index from its JSON text
    pub fn from_json(path: &Path, content: &str) -> Result<Self, DataError> {
        let file: PackageIndexFile = serde_json::from_str(content)
            .map_err(|e| DataError::json_error(path, e.to_string()))?;
        Ok(Self::new(file.typings, file.not_needed_packages))
    }

    /// Read and parse an index file
    pub async fn read(path: &Path) -> Result<Self, AppError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DataError::read_error(path, e))?;
        let index = Self::from_json(path, &content)?;
        debug!(
            "Loaded package index from {}: {} typings, {} not-needed",
            path.display(),
            index.typings_count(),
            index.not_needed.len()
        );
        Ok(index)
    }

    pub fn typings_count(&self) -> usize {
        self.typings.values().map(HashMap::len).sum()
    }

    pub fn not_needed_count(&self) -> usize {
        self.not_needed.len()
    }
}

impl AllPackages for PackageIndex {
    fn get_typings_data(&self, id: &PackageId) -> Result<&TypingsData, LookupError> {
        self.typings
            .get(&id.name)
            .and_then(|versions| versions.get(&id.version))
            .ok_or_else(|| LookupError::TypingsNotFound {
                name: id.name.clone(),
                major: id.version.major,
                minor: id.version.minor,
            })
    }

    fn get_not_needed_package(&self, name: &str) -> Result<&NotNeededPackage, LookupError> {
        self.not_needed
            .get(name)
            .ok_or_else(|| LookupError::NotNeededNotFound {
                name: name.to_string(),
            })
    }
}
