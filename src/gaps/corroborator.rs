//! Withdrawal corroboration
//!
//! For every missing version of a high-likelihood gap, the corroborator
//! walks an ordered chain of evidence providers and stops at the first
//! finding. Provider errors count as "no evidence". When the chain runs
//! dry the heuristic fallback produces an `unknown` finding, so every
//! investigated version yields exactly one entry.

use crate::advisory::{AdvisorySource, NPM_ECOSYSTEM};
use crate::domain::{VersionGap, WithdrawnVersionInfo};
use crate::error::RegistryError;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Maximum number of versions investigated at once
const DEFAULT_CONCURRENCY: usize = 4;

/// One step of the corroboration chain
#[async_trait]
pub trait EvidenceProvider: Send + Sync {
    /// Get the provider name used in logs
    fn name(&self) -> &'static str;

    /// Look for evidence that `version` of `package` was withdrawn
    async fn find_evidence(
        &self,
        package: &str,
        version: &str,
    ) -> Result<Option<WithdrawnVersionInfo>, RegistryError>;
}

/// Evidence from security advisories whose vulnerable range covers the version
pub struct AdvisoryEvidence {
    source: Arc<dyn AdvisorySource>,
    timeout: Duration,
}

impl AdvisoryEvidence {
    /// Create a provider over `source`, bounding each lookup by `timeout`
    pub fn new(source: Arc<dyn AdvisorySource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }
}

#[async_trait]
impl EvidenceProvider for AdvisoryEvidence {
    fn name(&self) -> &'static str {
        "advisory"
    }

    async fn find_evidence(
        &self,
        package: &str,
        version: &str,
    ) -> Result<Option<WithdrawnVersionInfo>, RegistryError> {
        let lookup = self.source.fetch_advisories(NPM_ECOSYSTEM, package);
        let advisories = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| RegistryError::timeout(package, self.source.source_name()))??;

        Ok(advisories
            .into_iter()
            .find(|advisory| advisory.affects(version))
            .map(|advisory| {
                WithdrawnVersionInfo::security(
                    version,
                    advisory.id,
                    advisory.summary,
                    advisory.published_at,
                )
            }))
    }
}

/// Last link of the chain: a note derived from the version sequence alone
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicFallback;

impl HeuristicFallback {
    /// Produce the `unknown` finding for `version`
    pub fn note(&self, version: &str) -> WithdrawnVersionInfo {
        WithdrawnVersionInfo::unknown(
            version,
            format!(
                "Version {} appears to be missing from the registry despite sequential \
                 versioning patterns, which may indicate withdrawal due to security or \
                 policy issues.",
                version
            ),
        )
    }
}

/// Runs the evidence chain over the missing versions of high-likelihood gaps
pub struct Corroborator {
    providers: Vec<Box<dyn EvidenceProvider>>,
    fallback: HeuristicFallback,
    concurrency: usize,
}

impl Corroborator {
    /// Create a corroborator over an ordered provider chain
    pub fn new(providers: Vec<Box<dyn EvidenceProvider>>) -> Self {
        Self {
            providers,
            fallback: HeuristicFallback,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Corroborator that only produces heuristic findings
    pub fn heuristic_only() -> Self {
        Self::new(Vec::new())
    }

    /// Corroborator that consults `source` before falling back
    pub fn with_advisory_source(source: Arc<dyn AdvisorySource>, timeout: Duration) -> Self {
        let advisory: Box<dyn EvidenceProvider> = Box::new(AdvisoryEvidence::new(source, timeout));
        Self::new(vec![advisory])
    }

    /// Set how many versions may be investigated at once (minimum 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Investigate every missing version of every high-likelihood gap
    ///
    /// Results follow gap order, then missing-version order, regardless of
    /// which lookup finishes first.
    pub async fn check_withdrawn_versions(
        &self,
        package: &str,
        gaps: &[VersionGap],
    ) -> Vec<WithdrawnVersionInfo> {
        let targets: Vec<&str> = gaps
            .iter()
            .filter(|gap| gap.is_high())
            .flat_map(|gap| gap.missing_versions.iter().map(String::as_str))
            .collect();

        stream::iter(targets)
            .map(|version| self.check_version_history(package, version))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Walk the provider chain for one version, falling back to the heuristic
    pub async fn check_version_history(&self, package: &str, version: &str) -> WithdrawnVersionInfo {
        for provider in &self.providers {
            match provider.find_evidence(package, version).await {
                Ok(Some(info)) => {
                    debug!(package, version, provider = provider.name(), "evidence found");
                    return info;
                }
                Ok(None) => {}
                Err(e) => {
                    debug!(
                        package,
                        version,
                        provider = provider.name(),
                        error = %e,
                        "evidence lookup failed"
                    );
                }
            }
        }

        self.fallback.note(version)
    }
}
