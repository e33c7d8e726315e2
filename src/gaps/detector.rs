//! Patch-level gap detection
//!
//! Walks consecutive pairs of a sorted version list and reports every
//! discontinuity inside a single major.minor line. Minor and major bumps
//! are never gaps.

use crate::domain::VersionGap;
use crate::version::parse_version;

/// Find suspicious patch gaps in an ascending, deduplicated version list
///
/// Pairs where either side does not parse are skipped.
pub fn detect_gaps<S: AsRef<str>>(sorted_versions: &[S]) -> Vec<VersionGap> {
    sorted_versions
        .windows(2)
        .filter_map(|pair| {
            let current = parse_version(pair[0].as_ref())?;
            let next = parse_version(pair[1].as_ref())?;

            if current.major != next.major || current.minor != next.minor {
                return None;
            }

            VersionGap::between(current.major, current.minor, current.patch, next.patch)
        })
        .collect()
}
