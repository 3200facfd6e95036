//! npm Registry source
//!
//! Fetches package metadata from the npm registry.
//! API endpoint: https://registry.npmjs.org/{escaped name}

use crate::error::RegistryError;
use crate::registry::{HttpClient, NpmInfo, NpmInfoSource};
use async_trait::async_trait;

/// npm registry base URL
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmAdapter {
    client: HttpClient,
    base_url: String,
}

impl NpmAdapter {
    /// Create an adapter for the public npm registry
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Create an adapter for a registry mirror
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for an already escaped package name
    fn build_url(&self, escaped_name: &str) -> String {
        format!("{}/{}", self.base_url, escaped_name)
    }
}

#[async_trait]
impl NpmInfoSource for NpmAdapter {
    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn fetch_info(&self, escaped_name: &str) -> Result<Option<NpmInfo>, RegistryError> {
        let url = self.build_url(escaped_name);
        match self
            .client
            .get_json::<NpmInfo>(&url, escaped_name, self.registry_name())
            .await
        {
            Ok(info) => Ok(Some(info)),
            Err(RegistryError::PackageNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
