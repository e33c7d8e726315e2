//! Analysis orchestrator for coordinating the withdrawn-version workflow
//!
//! This module provides:
//! - Workflow coordination: resolve versions → analyze → collect reports
//! - Registry lookups or an explicit version list
//! - Error handling with partial continuation across packages
//! - Exit status aggregation

use crate::cli::CliArgs;
use crate::domain::{PackageReport, VersionGapAnalysis};
use crate::error::{AppError, ConfigError, RegistryError};
use crate::gaps::WithdrawnVersionDetector;
use crate::progress::Progress;
use crate::registry::{NpmAdapter, RegistryAdapter};
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, warn};

/// Process exit status of an analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Nothing found, or only low/medium gaps
    Clean,
    /// Withdrawn versions were reported
    WithdrawnVersions,
    /// Invalid arguments
    Usage,
    /// A high-likelihood gap without any withdrawn entry
    HighLikelihoodGap,
    /// A package had no versions
    NoVersions,
    /// Registry or I/O failure
    Error,
}

impl ExitStatus {
    /// Numeric process exit code
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::WithdrawnVersions => 1,
            ExitStatus::Usage => 2,
            ExitStatus::HighLikelihoodGap => 3,
            ExitStatus::NoVersions => 5,
            ExitStatus::Error => 7,
        }
    }

    /// Status implied by a single analysis
    pub fn for_analysis(analysis: &VersionGapAnalysis) -> Self {
        if !analysis.withdrawn_versions.is_empty() {
            ExitStatus::WithdrawnVersions
        } else if analysis.has_high_likelihood_gap() {
            ExitStatus::HighLikelihoodGap
        } else {
            ExitStatus::Clean
        }
    }

    /// Rank used to keep the worst status across packages
    fn severity(self) -> u8 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::HighLikelihoodGap => 1,
            ExitStatus::WithdrawnVersions => 2,
            ExitStatus::NoVersions => 3,
            ExitStatus::Error => 4,
            ExitStatus::Usage => 5,
        }
    }

    /// Keep the more severe of two statuses
    pub fn worst(self, other: ExitStatus) -> ExitStatus {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

/// Errors that can occur while processing a single package
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Failed to fetch versions from the registry
    #[error("failed to fetch versions for {package}: {source}")]
    Registry {
        package: String,
        #[source]
        source: RegistryError,
    },

    /// The package has no published versions
    #[error("no versions found for package {package}")]
    NoVersions { package: String },
}

impl OrchestratorError {
    /// Exit status this error maps to
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            OrchestratorError::Registry { .. } => ExitStatus::Error,
            OrchestratorError::NoVersions { .. } => ExitStatus::NoVersions,
        }
    }
}

/// Result of running the orchestrator
#[derive(Debug, Default)]
pub struct OrchestratorResult {
    /// One report per successfully analyzed package, in argument order
    pub reports: Vec<PackageReport>,
    /// Errors encountered during processing
    pub errors: Vec<OrchestratorError>,
}

impl OrchestratorResult {
    /// Worst exit status across reports and errors
    pub fn exit_status(&self) -> ExitStatus {
        let from_reports = self
            .reports
            .iter()
            .map(|r| ExitStatus::for_analysis(&r.analysis));
        let from_errors = self.errors.iter().map(OrchestratorError::exit_status);

        from_reports
            .chain(from_errors)
            .fold(ExitStatus::Clean, ExitStatus::worst)
    }
}

/// Orchestrator for coordinating the analysis workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Source of published versions
    registry: Box<dyn RegistryAdapter>,
    /// Gap engine
    detector: WithdrawnVersionDetector,
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs) -> Result<Self, AppError> {
        validate_url(&args.registry_url)?;
        if !args.no_advisories {
            validate_url(&args.advisory_url)?;
        }
        if args.versions.is_some() && args.packages.len() > 1 {
            return Err(ConfigError::ConflictingOptions {
                message: "--versions can only be used with a single package".to_string(),
            }
            .into());
        }

        let registry = Box::new(NpmAdapter::from_config(&args.registry_config())?);
        let detector = if args.no_advisories {
            WithdrawnVersionDetector::heuristic_only()
        } else {
            WithdrawnVersionDetector::from_config(&args.advisory_config())?
        };

        Ok(Self::with_parts(args, registry, detector))
    }

    /// Create an orchestrator from prebuilt parts (for testing)
    pub fn with_parts(
        args: CliArgs,
        registry: Box<dyn RegistryAdapter>,
        detector: WithdrawnVersionDetector,
    ) -> Self {
        Self {
            args,
            registry,
            detector,
        }
    }

    /// Run the analysis workflow
    pub async fn run(&self) -> OrchestratorResult {
        self.run_with_progress(self.args.show_progress()).await
    }

    /// Run the analysis workflow with optional progress display
    pub async fn run_with_progress(&self, show_progress: bool) -> OrchestratorResult {
        let mut progress = Progress::new(show_progress);
        let mut result = OrchestratorResult::default();

        progress.start(self.args.packages.len() as u64, "Analyzing packages");

        for package in &self.args.packages {
            progress.set_message(&format!("Analyzing {}", package));

            match self.analyze_package(package).await {
                Ok(report) => result.reports.push(report),
                Err(e) => {
                    warn!(package = %package, error = %e, "package skipped");
                    result.errors.push(e);
                }
            }
            progress.inc();
        }
        progress.finish_and_clear();

        result
    }

    /// Resolve versions and run the gap engine for one package
    async fn analyze_package(&self, package: &str) -> Result<PackageReport, OrchestratorError> {
        let versions = self.resolve_versions(package).await?;
        if versions.is_empty() {
            return Err(OrchestratorError::NoVersions {
                package: package.to_string(),
            });
        }

        let analysis = self.detector.analyze_version_gaps(package, &versions).await;
        debug!(
            package,
            gaps = analysis.suspicious_gaps.len(),
            withdrawn = analysis.withdrawn_versions.len(),
            "analysis complete"
        );

        Ok(PackageReport::new(package, versions, analysis))
    }

    /// Use the explicit version list when given, the registry otherwise
    async fn resolve_versions(&self, package: &str) -> Result<Vec<String>, OrchestratorError> {
        if let Some(versions) = &self.args.versions {
            return Ok(versions.as_slice().to_vec());
        }

        self.registry
            .fetch_versions(package)
            .await
            .map_err(|source| OrchestratorError::Registry {
                package: package.to_string(),
                source,
            })
    }
}

fn validate_url(value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl {
            value: value.to_string(),
            message: e.to_string(),
        })
}
