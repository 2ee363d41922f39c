//! Normalization and ordering of node software versions.
//!
//! Nodes report free-form version strings (`1.4.0-trynet`, `v1.2`, `0.8.1-beta+build7`).
//! Everything here reduces them to a dotted numeric form and compares them
//! segment by segment. Nothing in this crate fails: malformed input degrades to
//! [`UNPARSEABLE`], which compares equal to every other malformed input.

use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

/// The cleaned form of an empty, absent or entirely non-numeric version.
pub const UNPARSEABLE: &str = "0.0.0";

/// Strips pre-release/build suffixes and every non-numeric character.
///
/// Takes everything before the first `-`, keeps only ASCII digits and `.`, and
/// returns [`UNPARSEABLE`] if nothing is left.
///
/// ```
/// use vitals_version::clean_version;
///
/// assert_eq!(clean_version("1.5.0-beta"), "1.5.0");
/// assert_eq!(clean_version("v1.2.3"), "1.2.3");
/// assert_eq!(clean_version(None), "0.0.0");
/// ```
pub fn clean_version<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let head = raw
        .into()
        .and_then(|v| v.split('-').next())
        .unwrap_or_default();

    let cleaned: String = head
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        UNPARSEABLE.to_owned()
    } else {
        cleaned
    }
}

/// Numeric segments of a version. Empty or oversized segments count as 0.
fn segments(cleaned: &str) -> Vec<u64> {
    cleaned
        .split('.')
        .map(|segment| segment.parse::<u64>().unwrap_or(0))
        .collect()
}

/// Compares two already-cleaned versions, padding the shorter with zeros.
fn compare_cleaned(a: &str, b: &str) -> Ordering {
    let (a, b) = (segments(a), segments(b));
    let len = a.len().max(b.len());

    (0..len)
        .map(|i| {
            let left = a.get(i).copied().unwrap_or(0);
            let right = b.get(i).copied().unwrap_or(0);
            left.cmp(&right)
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Cleans and compares two raw version strings.
pub fn compare_versions<'a, 'b>(
    v1: impl Into<Option<&'a str>>,
    v2: impl Into<Option<&'b str>>,
) -> Ordering {
    compare_cleaned(&clean_version(v1), &clean_version(v2))
}

/// [`compare_versions`] as `1`, `-1` or `0`.
pub fn compare_versions_i8<'a, 'b>(
    v1: impl Into<Option<&'a str>>,
    v2: impl Into<Option<&'b str>>,
) -> i8 {
    compare_versions(v1, v2) as i8
}

/// A version string that has already been through [`clean_version`].
///
/// Orders by numeric segments (so `1.10.0 > 1.9.0`), falling back to the
/// string itself when two spellings are numerically equal (`1.2` vs `1.2.0`),
/// which keeps the ordering total and consistent with equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CleanVersion(String);

impl CleanVersion {
    pub fn parse<'a>(raw: impl Into<Option<&'a str>>) -> Self {
        Self(clean_version(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_unparseable(&self) -> bool {
        compare_cleaned(&self.0, UNPARSEABLE).is_eq()
    }

    /// Numeric comparison only, ignoring spelling.
    pub fn compare_numeric(&self, other: &Self) -> Ordering {
        compare_cleaned(&self.0, &other.0)
    }
}

impl Default for CleanVersion {
    fn default() -> Self {
        Self(UNPARSEABLE.to_owned())
    }
}

impl Ord for CleanVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_numeric(other)
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for CleanVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AsRef<str> for CleanVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CleanVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
