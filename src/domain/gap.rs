//! Version gap types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Most missing versions listed for a single gap
///
/// `gap_size` always carries the full count; wider gaps only list their
/// first `MAX_LISTED_MISSING` versions.
pub const MAX_LISTED_MISSING: u64 = 100;

/// How strongly a gap suggests a withdrawn release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Likelihood {
    Low,
    Medium,
    High,
}

impl Likelihood {
    /// Classify a patch-level gap between two consecutive known versions
    ///
    /// `patch_gap` is `next.patch - current.patch` and is expected to be
    /// greater than one. A lone missing patch is the strongest signal; a
    /// wide gap reads as batched releases; exactly two missing stays low.
    pub fn from_patch_gap(patch_gap: u64) -> Self {
        if patch_gap == 2 {
            Likelihood::High
        } else if patch_gap > 3 {
            Likelihood::Medium
        } else {
            Likelihood::Low
        }
    }

    /// Get the lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            Likelihood::Low => "low",
            Likelihood::Medium => "medium",
            Likelihood::High => "high",
        }
    }
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A suspicious discontinuity inside one major.minor line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionGap {
    /// The version right after the lower bound (`M.m.(p+1)`)
    pub expected_version: String,
    /// Versions strictly between the two known versions, ascending,
    /// capped at [`MAX_LISTED_MISSING`] entries
    pub missing_versions: Vec<String>,
    /// Number of missing versions
    pub gap_size: usize,
    /// Likelihood classification
    pub likelihood: Likelihood,
}

impl VersionGap {
    /// Build the gap between `major.minor.lower_patch` and `major.minor.upper_patch`
    ///
    /// Returns `None` when the two patches are adjacent or out of order.
    pub fn between(major: u64, minor: u64, lower_patch: u64, upper_patch: u64) -> Option<Self> {
        let patch_gap = upper_patch.checked_sub(lower_patch)?;
        if patch_gap <= 1 {
            return None;
        }

        let missing_count = patch_gap - 1;
        let missing_versions: Vec<String> = (1..=missing_count.min(MAX_LISTED_MISSING))
            .map(|offset| format!("{}.{}.{}", major, minor, lower_patch + offset))
            .collect();

        Some(Self {
            expected_version: format!("{}.{}.{}", major, minor, lower_patch + 1),
            gap_size: usize::try_from(missing_count).unwrap_or(usize::MAX),
            missing_versions,
            likelihood: Likelihood::from_patch_gap(patch_gap),
        })
    }

    /// Check if this gap is classified as high likelihood
    pub fn is_high(&self) -> bool {
        self.likelihood == Likelihood::High
    }
}
