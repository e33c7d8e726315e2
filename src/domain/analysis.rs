//! Aggregate result of one gap analysis run

use crate::domain::{Likelihood, VersionGap, WithdrawnVersionInfo};
use serde::{Deserialize, Serialize};

/// Suspicious gaps plus the withdrawal evidence gathered for them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionGapAnalysis {
    /// Gaps in ascending version order
    pub suspicious_gaps: Vec<VersionGap>,
    /// Findings for the missing versions of high-likelihood gaps
    pub withdrawn_versions: Vec<WithdrawnVersionInfo>,
}

impl VersionGapAnalysis {
    /// Create a new analysis result
    pub fn new(
        suspicious_gaps: Vec<VersionGap>,
        withdrawn_versions: Vec<WithdrawnVersionInfo>,
    ) -> Self {
        Self {
            suspicious_gaps,
            withdrawn_versions,
        }
    }

    /// Check if nothing suspicious was found
    pub fn is_clean(&self) -> bool {
        self.suspicious_gaps.is_empty() && self.withdrawn_versions.is_empty()
    }

    /// Check if any gap is classified as high likelihood
    pub fn has_high_likelihood_gap(&self) -> bool {
        self.suspicious_gaps
            .iter()
            .any(|g| g.likelihood == Likelihood::High)
    }
}
