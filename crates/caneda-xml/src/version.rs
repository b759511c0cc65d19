//! Format version token and the default compatibility rule.
//!
//! The rule is deliberately pluggable (the loader accepts any predicate),
//! but the default is what the application ships: a semver token is
//! compatible when it parses, shares the current major version, and does
//! not order after the current version.

use semver::Version;

/// Version token written into every saved document.
pub const FORMAT_VERSION: &str = "0.1.0";

/// Default compatibility check for a document's version token.
pub fn is_compatible(version: &str) -> bool {
    let Ok(found) = Version::parse(version) else {
        return false;
    };
    let current = Version::parse(FORMAT_VERSION).expect("FORMAT_VERSION is valid semver");
    found.major == current.major && found <= current
}
