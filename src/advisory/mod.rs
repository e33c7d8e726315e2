//! Security advisory sources
//!
//! This module provides:
//! - The `AdvisorySource` seam consumed by the corroborator
//! - A concrete advisory record shape with defensive parsing
//! - The GitHub global advisory database adapter

mod github;

pub use github::{GitHubAdvisorySource, GITHUB_API_URL};

use crate::error::RegistryError;
use crate::version::{parse_version, satisfies};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

/// Ecosystem identifier for npm packages
pub const NPM_ECOSYSTEM: &str = "npm";

/// Default per-call timeout for advisory lookups (5 seconds)
pub const DEFAULT_ADVISORY_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of advisories requested per lookup
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Configuration for an advisory source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryConfig {
    /// API base URL
    pub base_url: String,
    /// Per-call timeout
    pub timeout: Duration,
    /// Maximum advisories scanned per lookup
    pub page_size: usize,
    /// Optional API token
    pub token: Option<String>,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            base_url: GITHUB_API_URL.to_string(),
            timeout: DEFAULT_ADVISORY_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
            token: None,
        }
    }
}

impl AdvisoryConfig {
    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the API token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

/// A security advisory reduced to the fields corroboration needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryRecord {
    /// Advisory identifier (GHSA id or npm advisory number)
    pub id: String,
    /// Human summary
    pub summary: Option<String>,
    /// Publication timestamp
    pub published_at: Option<DateTime<Utc>>,
    /// Vulnerable-version range expressions
    pub vulnerable_ranges: Vec<String>,
}

impl AdvisoryRecord {
    /// Check whether any vulnerable range covers `version`
    pub fn affects(&self, version: &str) -> bool {
        let Some(version) = parse_version(version) else {
            return false;
        };
        self.vulnerable_ranges
            .iter()
            .filter(|range| !range.trim().is_empty())
            .any(|range| satisfies(&version, range))
    }
}

/// Advisory as returned by the wire, every field optional
///
/// Accepts both the npm advisory shape (`id`, `title`,
/// `vulnerable_versions`) and the GitHub shape (`ghsa_id`, `summary`,
/// `vulnerabilities[].vulnerable_version_range`).
#[derive(Debug, Deserialize)]
pub(crate) struct RawAdvisory {
    ghsa_id: Option<String>,
    id: Option<serde_json::Value>,
    summary: Option<String>,
    title: Option<String>,
    published_at: Option<String>,
    vulnerable_versions: Option<String>,
    vulnerabilities: Option<Vec<RawVulnerability>>,
}

#[derive(Debug, Deserialize)]
struct RawVulnerability {
    package: Option<RawPackage>,
    vulnerable_version_range: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPackage {
    name: Option<String>,
}

impl RawAdvisory {
    /// Convert into a record for `package`, dropping advisories without an id
    pub(crate) fn into_record(self, package: &str) -> Option<AdvisoryRecord> {
        let id = self.ghsa_id.filter(|s| !s.is_empty()).or_else(|| {
            self.id.and_then(|v| match v {
                serde_json::Value::String(s) if !s.is_empty() => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
        })?;

        let mut vulnerable_ranges: Vec<String> = self.vulnerable_versions.into_iter().collect();
        for vulnerability in self.vulnerabilities.unwrap_or_default() {
            let for_package = vulnerability
                .package
                .and_then(|p| p.name)
                .map_or(true, |name| name == package);
            if for_package {
                vulnerable_ranges.extend(vulnerability.vulnerable_version_range);
            }
        }

        let published_at = self
            .published_at
            .and_then(|s| s.parse::<DateTime<Utc>>().ok());

        Some(AdvisoryRecord {
            id,
            summary: self.summary.or(self.title),
            published_at,
            vulnerable_ranges,
        })
    }
}

/// Trait for advisory sources
#[async_trait]
pub trait AdvisorySource: Send + Sync {
    /// Get the source name used in logs and errors
    fn source_name(&self) -> &'static str;

    /// Fetch the advisories published for a package
    async fn fetch_advisories(
        &self,
        ecosystem: &str,
        package: &str,
    ) -> Result<Vec<AdvisoryRecord>, RegistryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ranges: &[&str]) -> AdvisoryRecord {
        AdvisoryRecord {
            id: "GHSA-test".to_string(),
            summary: None,
            published_at: None,
            vulnerable_ranges: ranges.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_advisory_config_default() {
        let config = AdvisoryConfig::default();
        assert_eq!(config.base_url, "https://api.github.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.page_size, 100);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_advisory_config_overrides() {
        let config = AdvisoryConfig::default()
            .with_base_url("http://127.0.0.1:9999")
            .with_timeout(Duration::from_secs(1))
            .with_token(Some("t".to_string()));
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert_eq!(config.token.as_deref(), Some("t"));
    }

    #[test]
    fn test_affects_matches_any_range() {
        let advisory = record(&["<1.0.0", ">=4.0.0 <4.3.4"]);
        assert!(advisory.affects("4.3.3"));
        assert!(advisory.affects("0.9.0"));
        assert!(!advisory.affects("4.3.4"));
    }

    #[test]
    fn test_affects_ignores_empty_ranges() {
        assert!(!record(&[""]).affects("1.0.0"));
        assert!(!record(&[]).affects("1.0.0"));
    }

    #[test]
    fn test_affects_invalid_version() {
        assert!(!record(&["*"]).affects("nope"));
    }

    #[test]
    fn test_raw_github_shape() {
        let raw: RawAdvisory = serde_json::from_str(
            r#"{
                "ghsa_id": "GHSA-w457-6q6x-cgp9",
                "summary": "Prototype Pollution in handlebars",
                "published_at": "2019-12-26T17:58:13Z",
                "vulnerabilities": [
                    {"package": {"ecosystem": "npm", "name": "handlebars"},
                     "vulnerable_version_range": ">= 4.0.0, < 4.3.4"},
                    {"package": {"ecosystem": "npm", "name": "other"},
                     "vulnerable_version_range": "< 9.9.9"}
                ]
            }"#,
        )
        .unwrap();

        let record = raw.into_record("handlebars").unwrap();
        assert_eq!(record.id, "GHSA-w457-6q6x-cgp9");
        assert_eq!(
            record.summary.as_deref(),
            Some("Prototype Pollution in handlebars")
        );
        assert!(record.published_at.is_some());
        assert_eq!(record.vulnerable_ranges, vec![">= 4.0.0, < 4.3.4"]);
    }

    #[test]
    fn test_raw_npm_shape() {
        let raw: RawAdvisory = serde_json::from_str(
            r#"{
                "id": 1316,
                "title": "Arbitrary Code Execution",
                "vulnerable_versions": "<4.3.0",
                "published_at": null
            }"#,
        )
        .unwrap();

        let record = raw.into_record("handlebars").unwrap();
        assert_eq!(record.id, "1316");
        assert_eq!(record.summary.as_deref(), Some("Arbitrary Code Execution"));
        assert!(record.published_at.is_none());
        assert_eq!(record.vulnerable_ranges, vec!["<4.3.0"]);
    }

    #[test]
    fn test_raw_without_id_is_dropped() {
        let raw: RawAdvisory = serde_json::from_str(r#"{"summary": "no id"}"#).unwrap();
        assert!(raw.into_record("pkg").is_none());
    }

    #[test]
    fn test_raw_bad_timestamp_is_none() {
        let raw: RawAdvisory =
            serde_json::from_str(r#"{"ghsa_id": "GHSA-1", "published_at": "yesterday"}"#)
                .unwrap();
        let record = raw.into_record("pkg").unwrap();
        assert!(record.published_at.is_none());
        assert!(record.vulnerable_ranges.is_empty());
    }
}
