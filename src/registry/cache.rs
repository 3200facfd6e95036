//! Cached registry-info client
//!
//! Registry info is fetched once per package and kept in memory, keyed by
//! escaped package name. The cache can be seeded from, and written back to,
//! a JSON file so that a run can work entirely offline.

use crate::error::{AppError, DataError, RegistryError};
use crate::registry::{NpmInfo, NpmInfoSource};
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, info};

/// Read access to registry info that has already been fetched
pub trait RegistryInfoCache {
    /// Cached info for `escaped_name`; never touches the network
    fn get_info_from_cache(&self, escaped_name: &str) -> Option<&NpmInfo>;
}

/// Registry client that remembers everything it has fetched
pub struct CachedNpmInfoClient {
    source: Option<Box<dyn NpmInfoSource>>,
    cache: IndexMap<String, NpmInfo>,
}

impl CachedNpmInfoClient {
    /// Create a client that fetches through `source`
    pub fn new(source: Box<dyn NpmInfoSource>) -> Self {
        Self {
            source: Some(source),
            cache: IndexMap::new(),
        }
    }

    /// Create a client that only serves what is already cached
    pub fn offline() -> Self {
        Self {
            source: None,
            cache: IndexMap::new(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.source.is_none()
    }

    /// Put info into the cache, replacing any previous entry
    pub fn insert(&mut self, escaped_name: impl Into<String>, info: NpmInfo) {
        self.cache.insert(escaped_name.into(), info);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Fetch fresh info and store it in the cache.
    ///
    /// Returns `None` when the registry does not know the package; the cache
    /// is left untouched in that case.
    pub async fn fetch_and_cache(
        &mut self,
        escaped_name: &str,
    ) -> Result<Option<&NpmInfo>, RegistryError> {
        let source = self.source.as_ref().ok_or_else(|| RegistryError::Offline {
            package: escaped_name.to_string(),
        })?;

        debug!(
            "Fetching {} from {} registry",
            escaped_name,
            source.registry_name()
        );
        match source.fetch_info(escaped_name).await? {
            Some(info) => {
                self.cache.insert(escaped_name.to_string(), info);
                Ok(self.cache.get(escaped_name))
            }
            None => Ok(None),
        }
    }

    /// Merge entries from a cache file into memory.
    ///
    /// A missing file is not an error. Returns the number of entries read.
    pub async fn load_cache_file(&mut self, path: &Path) -> Result<usize, AppError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No registry cache at {}", path.display());
                return Ok(0);
            }
            Err(e) => return Err(DataError::read_error(path, e).into()),
        };

        let entries: IndexMap<String, NpmInfo> = serde_json::from_str(&content)
            .map_err(|e| DataError::json_error(path, e.to_string()))?;
        let count = entries.len();
        self.cache.extend(entries);

        info!("Loaded {} registry entries from {}", count, path.display());
        Ok(count)
    }

    /// Write every cached entry to `path` as JSON
    pub async fn save_cache_file(&self, path: &Path) -> Result<(), DataError> {
        let content = serde_json::to_string_pretty(&self.cache)
            .map_err(|e| DataError::json_error(path, e.to_string()))?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| DataError::write_error(path, e))?;

        debug!(
            "Saved {} registry entries to {}",
            self.cache.len(),
            path.display()
        );
        Ok(())
    }
}

impl RegistryInfoCache for CachedNpmInfoClient {
    fn get_info_from_cache(&self, escaped_name: &str) -> Option<&NpmInfo> {
        self.cache.get(escaped_name)
    }
}
