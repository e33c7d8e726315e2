//! Per-package analysis outcome

use crate::domain::VersionGapAnalysis;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Analysis of one package together with the inputs it was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageReport {
    /// npm package name
    pub package: String,
    /// Number of version strings handed to the engine
    pub total_versions: usize,
    /// When the analysis ran
    pub analysis_date: DateTime<Utc>,
    /// The version strings as received
    #[serde(skip)]
    pub versions: Vec<String>,
    /// Gap engine output
    pub analysis: VersionGapAnalysis,
}

impl PackageReport {
    /// Create a new package report stamped with the current time
    pub fn new(
        package: impl Into<String>,
        versions: Vec<String>,
        analysis: VersionGapAnalysis,
    ) -> Self {
        Self {
            package: package.into(),
            total_versions: versions.len(),
            analysis_date: Utc::now(),
            versions,
            analysis,
        }
    }

    /// Override the analysis timestamp
    pub fn with_analysis_date(mut self, analysis_date: DateTime<Utc>) -> Self {
        self.analysis_date = analysis_date;
        self
    }
}
