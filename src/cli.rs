//! CLI argument parsing module for npm-sec-analyzer

use crate::advisory::{AdvisoryConfig, DEFAULT_PAGE_SIZE, GITHUB_API_URL};
use crate::error::ConfigError;
use crate::registry::{RegistryConfig, NPM_REGISTRY_URL};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Accepted bounds for the advisory timeout, in seconds
const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=300;

/// Parse an advisory timeout given in whole seconds (1-300)
fn parse_timeout(s: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidTimeout {
        value: s.to_string(),
    };

    let secs: u64 = s.trim().parse().map_err(|_| invalid())?;
    if !TIMEOUT_RANGE.contains(&secs) {
        return Err(invalid());
    }
    Ok(Duration::from_secs(secs))
}

/// Explicit version list given with `--versions`
///
/// Parsed from one comma separated argument, so clap sees a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionList(pub Vec<String>);

impl VersionList {
    /// Get the versions in the order given
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Parse a comma separated version list, e.g. `4.3.0,4.3.1,4.3.2`
fn parse_version_list(s: &str) -> Result<VersionList, ConfigError> {
    let versions: Vec<String> = s
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();

    if versions.is_empty() {
        return Err(ConfigError::EmptyVersionList);
    }
    Ok(VersionList(versions))
}

/// Detect npm versions that were likely withdrawn for security reasons
#[derive(Parser, Debug, Clone)]
#[command(
    name = "npm-sec-analyzer",
    version,
    about = "Detect suspicious gaps in npm version histories"
)]
pub struct CliArgs {
    /// npm package names to analyze
    #[arg(required = true, value_name = "PACKAGES")]
    pub packages: Vec<String>,

    /// Analyze this comma separated version list instead of querying the registry
    #[arg(long, value_name = "VERSIONS", value_parser = parse_version_list)]
    pub versions: Option<VersionList>,

    // Endpoints
    /// npm registry base URL
    #[arg(long, env = "NPM_REGISTRY_URL", default_value = NPM_REGISTRY_URL)]
    pub registry_url: String,

    /// Security advisory API base URL
    #[arg(long, env = "ADVISORY_API_URL", default_value = GITHUB_API_URL)]
    pub advisory_url: String,

    /// Token sent to the advisory API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Per-lookup advisory timeout in seconds (1-300)
    #[arg(long, value_name = "SECS", default_value = "5", value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Skip advisory lookups and rely on the version pattern alone
    #[arg(long)]
    pub no_advisories: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the advisory source configuration
    pub fn advisory_config(&self) -> AdvisoryConfig {
        AdvisoryConfig {
            base_url: self.advisory_url.clone(),
            timeout: self.timeout,
            page_size: DEFAULT_PAGE_SIZE,
            token: self.github_token.clone(),
        }
    }

    /// Resolve the npm registry configuration
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            base_url: self.registry_url.clone(),
            ..RegistryConfig::default()
        }
    }

    /// Whether spinners should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json && self.output.is_none()
    }
}
