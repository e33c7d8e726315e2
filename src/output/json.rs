//! JSON output formatter for machine processing
//!
//! Emits an array with one `{package, totalVersions, analysisDate, analysis}`
//! object per analyzed package.

use crate::domain::PackageReport;
use crate::orchestrator::OrchestratorResult;
use crate::output::OutputFormatter;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&result.reports).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }

    fn format_report(
        &self,
        report: &PackageReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}
