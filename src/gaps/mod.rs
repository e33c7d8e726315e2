//! Withdrawn-version gap engine
//!
//! This module provides:
//! - Gap detection over a package's published version sequence
//! - Corroboration of high-likelihood gaps against advisory data
//! - Plain-text rendering of the analysis
//!
//! Flow: raw versions → valid, deduplicated, sorted → gaps → findings

pub mod corroborator;
pub mod detector;
pub mod report;

pub use corroborator::{AdvisoryEvidence, Corroborator, EvidenceProvider, HeuristicFallback};
pub use detector::detect_gaps;
pub use report::generate_withdrawn_version_report;

use crate::advisory::{AdvisoryConfig, GitHubAdvisorySource};
use crate::domain::VersionGapAnalysis;
use crate::error::RegistryError;
use crate::version::sorted_valid_versions;
use std::sync::Arc;
use tracing::debug;

/// Entry point of the gap engine
pub struct WithdrawnVersionDetector {
    corroborator: Corroborator,
}

impl WithdrawnVersionDetector {
    /// Create a detector with a custom corroborator
    pub fn new(corroborator: Corroborator) -> Self {
        Self { corroborator }
    }

    /// Create a detector that corroborates against the GitHub advisory database
    pub fn from_config(config: &AdvisoryConfig) -> Result<Self, RegistryError> {
        let source = Arc::new(GitHubAdvisorySource::new(config)?);
        Ok(Self::new(Corroborator::with_advisory_source(
            source,
            config.timeout,
        )))
    }

    /// Create a detector that never leaves the process
    pub fn heuristic_only() -> Self {
        Self::new(Corroborator::heuristic_only())
    }

    /// Analyze a package's published versions for suspicious gaps
    ///
    /// Invalid version strings are dropped silently and duplicates collapse.
    /// Lookup failures degrade into `unknown` findings, so this never fails.
    pub async fn analyze_version_gaps<S: AsRef<str>>(
        &self,
        package: &str,
        available_versions: &[S],
    ) -> VersionGapAnalysis {
        let sorted: Vec<String> = sorted_valid_versions(available_versions)
            .iter()
            .map(|v| v.to_string())
            .collect();
        debug!(
            package,
            given = available_versions.len(),
            valid = sorted.len(),
            "analyzing version gaps"
        );

        let suspicious_gaps = detect_gaps(&sorted);
        let withdrawn_versions = self
            .corroborator
            .check_withdrawn_versions(package, &suspicious_gaps)
            .await;

        VersionGapAnalysis::new(suspicious_gaps, withdrawn_versions)
    }

    /// Render the analysis as text
    pub fn generate_withdrawn_version_report(&self, analysis: &VersionGapAnalysis) -> String {
        generate_withdrawn_version_report(analysis)
    }
}

impl Default for WithdrawnVersionDetector {
    fn default() -> Self {
        Self::heuristic_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Likelihood, WithdrawalReason};

    const EXAMPLE: [&str; 9] = [
        "4.3.0", "4.3.1", "4.3.2", "4.3.4", "4.3.5", "4.3.6", "4.3.7", "4.4.0", "4.4.1",
    ];

    #[tokio::test]
    async fn test_example_sequence() {
        let detector = WithdrawnVersionDetector::heuristic_only();
        let analysis = detector.analyze_version_gaps("handlebars", &EXAMPLE).await;

        assert_eq!(analysis.suspicious_gaps.len(), 1);
        let gap = &analysis.suspicious_gaps[0];
        assert_eq!(gap.missing_versions, vec!["4.3.3"]);
        assert_eq!(gap.gap_size, 1);
        assert_eq!(gap.likelihood, Likelihood::High);

        assert_eq!(analysis.withdrawn_versions.len(), 1);
        assert_eq!(analysis.withdrawn_versions[0].version, "4.3.3");
        assert_eq!(
            analysis.withdrawn_versions[0].reason,
            WithdrawalReason::Unknown
        );
    }

    #[tokio::test]
    async fn test_unsorted_input_is_sorted_first() {
        let detector = WithdrawnVersionDetector::heuristic_only();
        let analysis = detector
            .analyze_version_gaps("pkg", &["1.0.2", "1.0.0", "1.0.1", "1.0.5"])
            .await;

        assert_eq!(analysis.suspicious_gaps.len(), 1);
        assert_eq!(analysis.suspicious_gaps[0].expected_version, "1.0.3");
        assert_eq!(analysis.suspicious_gaps[0].likelihood, Likelihood::Low);
        assert!(analysis.withdrawn_versions.is_empty());
    }

    #[tokio::test]
    async fn test_huge_patch_gap_stays_bounded() {
        let detector = WithdrawnVersionDetector::heuristic_only();
        let analysis = detector
            .analyze_version_gaps("evil", &["1.0.0", "1.0.99999999999"])
            .await;

        assert_eq!(analysis.suspicious_gaps.len(), 1);
        let gap = &analysis.suspicious_gaps[0];
        assert_eq!(gap.gap_size, 99_999_999_998);
        assert_eq!(gap.missing_versions.len(), crate::domain::MAX_LISTED_MISSING as usize);
        assert_eq!(gap.likelihood, Likelihood::Medium);
        assert!(analysis.withdrawn_versions.is_empty());
    }

    #[tokio::test]
    async fn test_unsafe_integer_versions_are_ignored() {
        let detector = WithdrawnVersionDetector::heuristic_only();
        let analysis = detector
            .analyze_version_gaps("evil", &["1.0.0", "1.0.9007199254740993"])
            .await;

        assert!(analysis.is_clean());
    }

    #[tokio::test]
    async fn test_invalid_versions_are_ignored() {
        let detector = WithdrawnVersionDetector::heuristic_only();
        let noisy = detector
            .analyze_version_gaps("pkg", &["1.0.0", "not-a-version", "1.0.2"])
            .await;
        let clean = detector
            .analyze_version_gaps("pkg", &["1.0.0", "1.0.2"])
            .await;

        assert_eq!(noisy, clean);
    }

    #[tokio::test]
    async fn test_duplicates_collapse() {
        let detector = WithdrawnVersionDetector::heuristic_only();
        let analysis = detector
            .analyze_version_gaps("pkg", &["1.0.0", "1.0.0", "v1.0.0", "1.0.2", "1.0.2"])
            .await;

        assert_eq!(analysis.suspicious_gaps.len(), 1);
        assert_eq!(analysis.withdrawn_versions.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_and_single_inputs() {
        let detector = WithdrawnVersionDetector::default();
        let empty: [&str; 0] = [];
        assert!(detector.analyze_version_gaps("pkg", &empty).await.is_clean());
        assert!(detector
            .analyze_version_gaps("pkg", &["1.0.0"])
            .await
            .is_clean());
    }

    #[tokio::test]
    async fn test_report_delegates_to_renderer() {
        let detector = WithdrawnVersionDetector::heuristic_only();
        let analysis = detector.analyze_version_gaps("pkg", &EXAMPLE).await;
        assert_eq!(
            detector.generate_withdrawn_version_report(&analysis),
            generate_withdrawn_version_report(&analysis)
        );
    }
}
