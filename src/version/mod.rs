//! Semantic version utility
//!
//! Thin layer over the `semver` crate that follows npm's reading of
//! version strings:
//! - validity and parsing (a leading `v` is tolerated)
//! - precedence comparison that ignores build metadata
//! - range satisfaction for npm-style range expressions

mod range;

pub use range::satisfies;

use semver::{Prerelease, Version};
use std::cmp::Ordering;

/// Largest numeric component npm accepts (`Number.MAX_SAFE_INTEGER`)
pub const MAX_SAFE_COMPONENT: u64 = (1 << 53) - 1;

/// Parse a version string the way npm's strict `valid` does
///
/// Components above [`MAX_SAFE_COMPONENT`] are rejected.
pub fn parse_version(s: &str) -> Option<Version> {
    let s = s.trim();
    let s = s.strip_prefix('v').unwrap_or(s);
    let version = Version::parse(s).ok()?;

    [version.major, version.minor, version.patch]
        .iter()
        .all(|&n| n <= MAX_SAFE_COMPONENT)
        .then_some(version)
}

/// Check whether a string is a syntactically valid semantic version
pub fn is_valid(s: &str) -> bool {
    parse_version(s).is_some()
}

/// Compare two versions by semver precedence (build metadata is ignored)
pub fn compare(a: &Version, b: &Version) -> Ordering {
    precedence_key(a).cmp(&precedence_key(b))
}

fn precedence_key(v: &Version) -> (u64, u64, u64, &Prerelease) {
    (v.major, v.minor, v.patch, &v.pre)
}

/// Keep the valid versions of `raw`, deduplicated and sorted ascending
///
/// Two strings naming the same precedence (e.g. `1.0.0` and `v1.0.0`)
/// collapse to one entry.
pub fn sorted_valid_versions<S: AsRef<str>>(raw: &[S]) -> Vec<Version> {
    let mut versions: Vec<Version> = raw
        .iter()
        .filter_map(|s| parse_version(s.as_ref()))
        .collect();

    versions.sort_by(compare);
    versions.dedup_by(|a, b| compare(a, b) == Ordering::Equal);
    versions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_plain() {
        let v = parse_version("4.3.2").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (4, 3, 2));
    }

    #[test]
    fn test_parse_version_with_v_prefix_and_whitespace() {
        let v = parse_version("  v1.2.3 ").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_version_prerelease() {
        let v = parse_version("2.0.0-beta.1").unwrap();
        assert_eq!(v.pre.as_str(), "beta.1");
    }

    #[test]
    fn test_is_valid_rejects_garbage() {
        assert!(!is_valid("not-a-version"));
        assert!(!is_valid("1.2"));
        assert!(!is_valid(""));
        assert!(!is_valid("01.2.3"));
        assert!(is_valid("0.0.1"));
    }

    #[test]
    fn test_is_valid_rejects_unsafe_integers() {
        assert!(is_valid("1.0.9007199254740991"));
        assert!(!is_valid("1.0.9007199254740992"));
        assert!(!is_valid("9007199254740992.0.0"));
        assert!(!is_valid("1.18446744073709551615.0"));
    }

    #[test]
    fn test_compare_ignores_build_metadata() {
        let a = parse_version("1.0.0+build.1").unwrap();
        let b = parse_version("1.0.0+build.2").unwrap();
        assert_eq!(compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_compare_prerelease_before_release() {
        let a = parse_version("1.0.0-rc.1").unwrap();
        let b = parse_version("1.0.0").unwrap();
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_compare_multi_digit() {
        let a = parse_version("1.9.0").unwrap();
        let b = parse_version("1.10.0").unwrap();
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_sorted_valid_versions_filters_sorts_and_dedups() {
        let raw = ["1.0.2", "garbage", "1.0.0", "v1.0.0", "0.9.9", "1.0.2"];
        let sorted: Vec<String> = sorted_valid_versions(&raw)
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(sorted, vec!["0.9.9", "1.0.0", "1.0.2"]);
    }

    #[test]
    fn test_sorted_valid_versions_empty() {
        let raw: [&str; 0] = [];
        assert!(sorted_valid_versions(&raw).is_empty());
    }
}
