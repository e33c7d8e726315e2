//! Text output formatter for human-readable display
//!
//! This module provides:
//! - A per-package header with version count and analysis date
//! - The gap engine's narrative report
//! - A detailed per-gap breakdown in verbose mode
//! - General security recommendations

use crate::domain::{Likelihood, PackageReport};
use crate::gaps::generate_withdrawn_version_report;
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

const HEADER_TITLE: &str = "📊 WITHDRAWN VERSION ANALYSIS REPORT";
const HEADER_RULE_WIDTH: usize = 50;

const SECURITY_RECOMMENDATIONS: [&str; 4] = [
    "Always verify version history before using packages with gaps",
    "Check security advisories for missing versions",
    "Consider using version ranges that avoid suspicious gaps",
    "Monitor package updates and security announcements",
];

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Render a section heading, bold when colors are on
    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Render a likelihood label
    fn likelihood_label(&self, likelihood: Likelihood) -> String {
        let label = likelihood.as_str().to_uppercase();
        if !self.color {
            return label;
        }
        match likelihood {
            Likelihood::High => label.red().bold().to_string(),
            Likelihood::Medium => label.yellow().to_string(),
            Likelihood::Low => label.dimmed().to_string(),
        }
    }

    fn format_header(&self, report: &PackageReport, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "{}", self.heading(HEADER_TITLE))?;
        writeln!(writer, "{}", "=".repeat(HEADER_RULE_WIDTH))?;
        writeln!(writer, "Package: {}", report.package)?;
        writeln!(writer, "Total versions analyzed: {}", report.total_versions)?;
        writeln!(
            writer,
            "Analysis date: {}",
            report.analysis_date.format("%Y-%m-%d")
        )?;
        writeln!(writer)
    }

    fn format_details(
        &self,
        report: &PackageReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{}", self.heading("📋 DETAILED ANALYSIS:"))?;
        let mut available: Vec<&str> = report.versions.iter().map(String::as_str).collect();
        available.sort_unstable();
        writeln!(writer, "Available versions: {}", available.join(", "))?;

        let gaps = &report.analysis.suspicious_gaps;
        if gaps.is_empty() {
            return Ok(());
        }

        writeln!(writer)?;
        writeln!(writer, "{}", self.heading("🔍 SUSPICIOUS GAPS DETECTED:"))?;
        for gap in gaps {
            writeln!(writer, "• Gap around version {}", gap.expected_version)?;
            let listed = gap.missing_versions.join(", ");
            if gap.missing_versions.len() < gap.gap_size {
                writeln!(
                    writer,
                    "  Missing: {}, ... ({} more)",
                    listed,
                    gap.gap_size - gap.missing_versions.len()
                )?;
            } else {
                writeln!(writer, "  Missing: {}", listed)?;
            }
            writeln!(writer, "  Likelihood: {}", self.likelihood_label(gap.likelihood))?;
            writeln!(writer, "  Gap size: {} version(s)", gap.gap_size)?;
            writeln!(writer)?;
        }
        Ok(())
    }

    fn format_recommendations(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{}", self.heading("💡 SECURITY RECOMMENDATIONS:"))?;
        for line in SECURITY_RECOMMENDATIONS {
            writeln!(writer, "• {}", line)?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        for (i, report) in result.reports.iter().enumerate() {
            if i > 0 {
                writeln!(writer)?;
            }
            self.format_report(report, writer)?;
        }
        Ok(())
    }

    fn format_report(
        &self,
        report: &PackageReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let body = generate_withdrawn_version_report(&report.analysis);

        if self.verbosity == Verbosity::Quiet {
            writeln!(writer, "{}:", report.package)?;
            return writeln!(writer, "{}", body);
        }

        self.format_header(report, writer)?;
        writeln!(writer, "{}", body)?;

        if self.verbosity == Verbosity::Verbose {
            self.format_details(report, writer)?;
        }

        self.format_recommendations(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{VersionGap, VersionGapAnalysis, WithdrawnVersionInfo};
    use chrono::{TimeZone, Utc};

    fn create_report(analysis: VersionGapAnalysis) -> PackageReport {
        PackageReport::new(
            "handlebars",
            vec!["4.3.2".to_string(), "4.3.4".to_string()],
            analysis,
        )
        .with_analysis_date(Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap())
    }

    fn flagged_analysis() -> VersionGapAnalysis {
        VersionGapAnalysis::new(
            vec![VersionGap::between(4, 3, 2, 4).unwrap()],
            vec![WithdrawnVersionInfo::unknown("4.3.3", "heuristic")],
        )
    }

    fn render(formatter: &TextFormatter, report: &PackageReport) -> String {
        let mut output = Vec::new();
        formatter.format_report(report, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_text_formatter_new() {
        let formatter = TextFormatter::new(Verbosity::Verbose);
        assert_eq!(formatter.verbosity, Verbosity::Verbose);
        assert!(formatter.color);
    }

    #[test]
    fn test_format_normal() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let output_str = render(&formatter, &create_report(flagged_analysis()));

        assert!(output_str.starts_with(
            "📊 WITHDRAWN VERSION ANALYSIS REPORT\n==================================================\n"
        ));
        assert!(output_str.contains("Package: handlebars\n"));
        assert!(output_str.contains("Total versions analyzed: 2\n"));
        assert!(output_str.contains("Analysis date: 2024-03-09\n"));
        assert!(output_str.contains("🚨 POTENTIALLY WITHDRAWN VERSIONS DETECTED:"));
        assert!(output_str.contains("💡 SECURITY RECOMMENDATIONS:"));
        assert!(!output_str.contains("DETAILED ANALYSIS"));
    }

    #[test]
    fn test_format_verbose() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let output_str = render(&formatter, &create_report(flagged_analysis()));

        assert!(output_str.contains("📋 DETAILED ANALYSIS:\nAvailable versions: 4.3.2, 4.3.4\n"));
        assert!(output_str.contains("• Gap around version 4.3.3\n"));
        assert!(output_str.contains("  Missing: 4.3.3\n"));
        assert!(output_str.contains("  Likelihood: HIGH\n"));
        assert!(output_str.contains("  Gap size: 1 version(s)\n"));
    }

    #[test]
    fn test_format_verbose_sorts_available_versions() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let report = PackageReport::new(
            "pkg",
            vec!["1.0.2".to_string(), "1.0.0".to_string(), "1.0.1".to_string()],
            VersionGapAnalysis::default(),
        );
        let output_str = render(&formatter, &report);

        assert!(output_str.contains("Available versions: 1.0.0, 1.0.1, 1.0.2\n"));
    }

    #[test]
    fn test_format_verbose_truncated_gap() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let analysis =
            VersionGapAnalysis::new(vec![VersionGap::between(1, 0, 0, 1_000).unwrap()], Vec::new());
        let output_str = render(&formatter, &create_report(analysis));

        assert!(output_str.contains("  Missing: 1.0.1, 1.0.2, "));
        assert!(output_str.contains("1.0.100, ... (899 more)\n"));
        assert!(output_str.contains("  Gap size: 999 version(s)\n"));
    }

    #[test]
    fn test_format_verbose_without_gaps() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let output_str = render(&formatter, &create_report(VersionGapAnalysis::default()));

        assert!(output_str.contains("✅ No suspicious version gaps detected."));
        assert!(output_str.contains("Available versions:"));
        assert!(!output_str.contains("SUSPICIOUS GAPS DETECTED"));
    }

    #[test]
    fn test_format_quiet() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false);
        let output_str = render(&formatter, &create_report(VersionGapAnalysis::default()));

        assert_eq!(
            output_str,
            "handlebars:\n✅ No suspicious version gaps detected.\n"
        );
    }

    #[test]
    fn test_format_multiple_reports() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false);
        let result = OrchestratorResult {
            reports: vec![
                create_report(VersionGapAnalysis::default()),
                create_report(flagged_analysis()),
            ],
            errors: Vec::new(),
        };

        let mut output = Vec::new();
        formatter.format(&result, &mut output).unwrap();
        let output_str = String::from_utf8(output).unwrap();

        assert_eq!(output_str.matches("handlebars:").count(), 2);
        assert!(output_str.contains("detected.\n\nhandlebars:\n"));
    }

    #[test]
    fn test_likelihood_label_plain() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        assert_eq!(formatter.likelihood_label(Likelihood::Medium), "MEDIUM");
        assert_eq!(formatter.likelihood_label(Likelihood::Low), "LOW");
    }
}
