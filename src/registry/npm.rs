//! npm Registry adapter
//!
//! Fetches the published version list of a package from the npm registry.
//! API endpoint: https://registry.npmjs.org/{package}

use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter, RegistryConfig, DEFAULT_USER_AGENT};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// npm registry base URL
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmAdapter {
    client: HttpClient,
    base_url: String,
}

/// npm package metadata response
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    /// Available versions
    #[serde(default)]
    versions: HashMap<String, serde_json::Value>,
}

impl NpmAdapter {
    /// Create a new npm adapter against a custom registry
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a new npm adapter from resolved configuration
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let client = HttpClient::with_config(config.timeout, DEFAULT_USER_AGENT)?;
        Ok(Self::with_base_url(client, &config.base_url))
    }

    /// Build the URL for a package (scoped names become `@scope%2Fname`)
    fn build_url(&self, package: &str) -> String {
        let encoded = if package.starts_with('@') {
            package.replace('/', "%2F")
        } else {
            package.to_string()
        };
        format!("{}/{}", self.base_url, encoded)
    }
}

#[async_trait]
impl RegistryAdapter for NpmAdapter {
    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn fetch_versions(&self, package: &str) -> Result<Vec<String>, RegistryError> {
        let url = self.build_url(package);
        debug!(package, url = %url, "fetching package metadata");

        let response: NpmPackageResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        let mut versions: Vec<String> = response.versions.into_keys().collect();
        versions.sort();

        debug!(package, count = versions.len(), "fetched versions");
        Ok(versions)
    }
}
