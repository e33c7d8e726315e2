//! Registry adapters for fetching package version information
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - npm Registry adapter

mod client;
mod npm;

pub use client::{HttpClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use npm::{NpmAdapter, NPM_REGISTRY_URL};

use crate::error::RegistryError;
use async_trait::async_trait;
use std::time::Duration;

/// Configuration for the npm registry client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Registry base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: NPM_REGISTRY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch every published version string for a package
    async fn fetch_versions(&self, package: &str) -> Result<Vec<String>, RegistryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_config_default() {
        let config = RegistryConfig::default();
        assert_eq!(config.base_url, "https://registry.npmjs.org");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
