//! Registry access for package metadata
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - npm registry source
//! - In-memory registry-info cache with optional file persistence
//! - The registry-info model (dist-tags, time history, deprecation state)

mod cache;
mod client;
mod info;
mod npm;

pub use cache::{CachedNpmInfoClient, RegistryInfoCache};
pub use client::HttpClient;
pub use info::{is_time_sentinel, NpmInfo, NpmVersionInfo, TIME_SENTINEL_KEYS};
pub use npm::{NpmAdapter, NPM_REGISTRY_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Something that can fetch registry info for a package
#[async_trait]
pub trait NpmInfoSource: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch registry info for an escaped package name.
    ///
    /// Returns `Ok(None)` when the registry has never heard of the package.
    async fn fetch_info(&self, escaped_name: &str) -> Result<Option<NpmInfo>, RegistryError>;
}
