//! npm-style range satisfaction
//!
//! Advisory databases publish vulnerable ranges in two dialects:
//! - npm: `>=1.0.0 <1.2.3 || 2.x`, `1.0.0 - 1.4.0`
//! - GitHub: `>= 4.0.0, < 4.3.4`
//!
//! Matching is delegated to `node_semver`, which follows npm's own rules
//! (bare versions are exact, x-ranges and hyphen ranges expand the npm way).
//! The GitHub dialect only differs by its comma separators.

use semver::Version;

/// Check whether `version` falls inside the npm-style `range`
///
/// Unparseable ranges never match.
pub fn satisfies(version: &Version, range: &str) -> bool {
    let range = match node_semver::Range::parse(range.replace(',', " ")) {
        Ok(r) => r,
        Err(_) => return false,
    };

    let version = match node_semver::Version::parse(version.to_string()) {
        Ok(v) => v,
        Err(_) => return false,
    };

    range.satisfies(&version)
}
