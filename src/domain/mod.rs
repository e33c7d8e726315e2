//! Core domain models for npm-sec-analyzer
//!
//! This module contains the value types produced by the gap engine:
//! - Version gaps and their likelihood classification
//! - Withdrawn-version findings and their reasons
//! - The aggregate analysis result
//! - The per-package report wrapping it

mod analysis;
mod gap;
mod package_report;
mod withdrawal;

pub use analysis::VersionGapAnalysis;
pub use gap::{Likelihood, VersionGap, MAX_LISTED_MISSING};
pub use package_report::PackageReport;
pub use withdrawal::{WithdrawalReason, WithdrawnVersionInfo};
