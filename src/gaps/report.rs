//! Plain-text rendering of a gap analysis

use crate::domain::{Likelihood, VersionGapAnalysis};

/// Rendered when neither gaps nor withdrawn versions were found
pub const NO_GAPS_MESSAGE: &str = "✅ No suspicious version gaps detected.";

/// Closing line of every non-empty report
pub const RECOMMENDATION: &str = "💡 RECOMMENDATION: Verify these versions were not withdrawn due to vulnerabilities before using similar version ranges.";

/// Render a terminal-friendly narrative of the analysis
pub fn generate_withdrawn_version_report(analysis: &VersionGapAnalysis) -> String {
    if analysis.is_clean() {
        return NO_GAPS_MESSAGE.to_string();
    }

    let mut report = String::new();

    if !analysis.withdrawn_versions.is_empty() {
        report.push_str("🚨 POTENTIALLY WITHDRAWN VERSIONS DETECTED:\n");
        for withdrawn in &analysis.withdrawn_versions {
            report.push_str(&format!(
                "• Version {} - {}",
                withdrawn.version,
                withdrawn.reason.as_str().to_uppercase()
            ));
            if let Some(advisory) = &withdrawn.advisory {
                report.push_str(&format!(" (Advisory: {})", advisory));
            }
            if let Some(description) = &withdrawn.description {
                report.push_str(&format!("\n  {}", description));
            }
            report.push('\n');
        }
        report.push('\n');
    }

    if !analysis.suspicious_gaps.is_empty() {
        report.push_str("⚠️  SUSPICIOUS VERSION GAPS:\n");
        for gap in &analysis.suspicious_gaps {
            match gap.likelihood {
                Likelihood::High => {
                    report.push_str(&format!(
                        "• High likelihood: Missing versions {}\n",
                        gap.missing_versions.join(", ")
                    ));
                    report.push_str(
                        "  These versions may have been withdrawn due to security issues.\n",
                    );
                }
                Likelihood::Medium => {
                    report.push_str(&format!(
                        "• Medium likelihood: Gap of {} versions around {}\n",
                        gap.gap_size, gap.expected_version
                    ));
                }
                Likelihood::Low => {}
            }
        }
        report.push('\n');
    }

    report.push_str(RECOMMENDATION);
    report
}
