//! Version identifiers and the comparator
//!
//! A version identifier is a non-empty tuple of non-negative integers. Tuples of
//! different lengths are compared as if the shorter one were padded with
//! trailing zeros, so `1`, `1.0` and `1.0.0` are the same version.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};

use crate::version::error::VersionError;

/// An ordered, non-empty tuple of version components (e.g. `1.2.3`)
#[derive(Debug, Clone, Serialize)]
#[serde(into = "Vec<u64>")]
pub struct VersionIdentifier {
    parts: Vec<u64>,
}

/// Accepted serialized forms: `3`, `[1, 2, 3]` or `"1.2.3"`
///
/// Unsigned variants come first so the full `u64` range is accepted; the
/// signed ones only exist to report negative components.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Number(u64),
    Parts(Vec<u64>),
    Signed(i64),
    SignedParts(Vec<i64>),
    Text(String),
}

impl VersionIdentifier {
    pub fn new(parts: Vec<u64>) -> Result<Self, VersionError> {
        if parts.is_empty() {
            return Err(VersionError::InvalidVersionValue("()".to_string()));
        }
        Ok(Self { parts })
    }

    /// The zero version `(0)`, the default lower bound of every interval
    pub fn zero() -> Self {
        Self { parts: vec![0] }
    }

    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    /// Components without trailing zeros, the canonical form used for hashing
    fn significant_parts(&self) -> &[u64] {
        let end = self
            .parts
            .iter()
            .rposition(|&part| part != 0)
            .map_or(0, |i| i + 1);
        &self.parts[..end]
    }
}

/// Compare two version identifiers, padding the shorter with trailing zeros.
///
/// This is the only place version tuples are ordered; intervals and the
/// registry go through it (or through `Ord`, which delegates here).
pub fn compare(a: &VersionIdentifier, b: &VersionIdentifier) -> Ordering {
    let len = a.parts.len().max(b.parts.len());
    (0..len)
        .map(|i| {
            let left = a.parts.get(i).copied().unwrap_or(0);
            let right = b.parts.get(i).copied().unwrap_or(0);
            left.cmp(&right)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Compare a finite version against an interval's upper bound.
///
/// `Unbounded` is greater than every finite version.
pub fn compare_to_bound(version: &VersionIdentifier, bound: &UpperBound) -> Ordering {
    match bound {
        UpperBound::Finite(max) => compare(version, max),
        UpperBound::Unbounded => Ordering::Less,
    }
}

impl PartialEq for VersionIdentifier {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for VersionIdentifier {}

impl PartialOrd for VersionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl Hash for VersionIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with padded equality: 1 and 1.0.0 hash the same
        self.significant_parts().hash(state);
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        f.write_str(&rendered.join("."))
    }
}

impl From<u64> for VersionIdentifier {
    fn from(major: u64) -> Self {
        Self { parts: vec![major] }
    }
}

impl From<&semver::Version> for VersionIdentifier {
    /// Uses `major.minor.patch`; pre-release and build metadata are dropped.
    fn from(version: &semver::Version) -> Self {
        Self {
            parts: vec![version.major, version.minor, version.patch],
        }
    }
}

impl From<VersionIdentifier> for Vec<u64> {
    fn from(version: VersionIdentifier) -> Self {
        version.parts
    }
}

impl TryFrom<Vec<u64>> for VersionIdentifier {
    type Error = VersionError;

    fn try_from(parts: Vec<u64>) -> Result<Self, Self::Error> {
        Self::new(parts)
    }
}

impl TryFrom<&[u64]> for VersionIdentifier {
    type Error = VersionError;

    fn try_from(parts: &[u64]) -> Result<Self, Self::Error> {
        Self::new(parts.to_vec())
    }
}

impl TryFrom<&[i64]> for VersionIdentifier {
    type Error = VersionError;

    fn try_from(parts: &[i64]) -> Result<Self, Self::Error> {
        let converted = parts
            .iter()
            .map(|&part| u64::try_from(part))
            .collect::<Result<Vec<u64>, _>>()
            .map_err(|_| VersionError::InvalidVersionValue(format!("{:?}", parts)))?;
        Self::new(converted)
    }
}

impl TryFrom<i64> for VersionIdentifier {
    type Error = VersionError;

    fn try_from(major: i64) -> Result<Self, Self::Error> {
        Self::try_from([major].as_slice())
    }
}

impl<'de> Deserialize<'de> for VersionIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match RawVersion::deserialize(deserializer)? {
            RawVersion::Number(major) => Ok(Self::from(major)),
            RawVersion::Parts(parts) => Self::new(parts),
            RawVersion::Signed(major) => Self::try_from(major),
            RawVersion::SignedParts(parts) => Self::try_from(parts.as_slice()),
            RawVersion::Text(text) => text.parse(),
        };
        parsed.map_err(de::Error::custom)
    }
}

impl FromStr for VersionIdentifier {
    type Err = VersionError;

    /// Parses dotted numerals such as `2`, `1.4` or `1.0.1`.
    ///
    /// Anything else (`v1`, `1.2-beta`, `^1.0`, empty components) is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionError::InvalidVersionValue(s.to_string());

        let parts = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                part.parse::<u64>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<u64>, _>>()?;

        Self::new(parts)
    }
}

/// Upper bound of a version interval
#[derive(Debug, Clone)]
pub enum UpperBound {
    Finite(VersionIdentifier),
    /// Greater than every finite version
    Unbounded,
}

impl UpperBound {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, UpperBound::Unbounded)
    }

    pub fn as_finite(&self) -> Option<&VersionIdentifier> {
        match self {
            UpperBound::Finite(version) => Some(version),
            UpperBound::Unbounded => None,
        }
    }
}

impl PartialEq for UpperBound {
    /// `Unbounded` is not equal to anything, itself included.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (UpperBound::Finite(a), UpperBound::Finite(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for UpperBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpperBound::Finite(version) => write!(f, "{}", version),
            UpperBound::Unbounded => f.write_str("inf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    fn v(parts: &[u64]) -> VersionIdentifier {
        VersionIdentifier::try_from(parts).unwrap()
    }

    #[rstest]
    #[case(&[1], &[1, 0, 0], Ordering::Equal)]
    #[case(&[1, 0, 1], &[1, 0, 0], Ordering::Greater)]
    #[case(&[1], &[1, 0, 1], Ordering::Less)]
    #[case(&[2], &[1, 9, 9], Ordering::Greater)]
    #[case(&[0], &[0, 0], Ordering::Equal)]
    #[case(&[1, 2], &[1, 10], Ordering::Less)]
    fn compare_pads_shorter_tuple_with_zeros(
        #[case] a: &[u64],
        #[case] b: &[u64],
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare(&v(a), &v(b)), expected);
        assert_eq!(compare(&v(b), &v(a)), expected.reverse());
    }

    #[test]
    fn unbounded_is_greater_than_any_finite_version() {
        assert_eq!(
            compare_to_bound(&v(&[u64::MAX, u64::MAX]), &UpperBound::Unbounded),
            Ordering::Less
        );
        assert_eq!(
            compare_to_bound(&v(&[1, 0]), &UpperBound::Finite(v(&[1]))),
            Ordering::Equal
        );
    }

    #[test]
    fn unbounded_never_equals_itself() {
        assert_ne!(UpperBound::Unbounded, UpperBound::Unbounded);
        assert_eq!(UpperBound::Finite(v(&[2])), UpperBound::Finite(v(&[2, 0])));
    }

    #[test]
    fn padded_equal_versions_hash_identically() {
        let set: HashSet<VersionIdentifier> = [v(&[1]), v(&[1, 0]), v(&[1, 0, 0])].into();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&v(&[1, 0, 0, 0])));
    }

    #[rstest]
    #[case("1", &[1])]
    #[case("1.2.3", &[1, 2, 3])]
    #[case("0.10", &[0, 10])]
    fn from_str_parses_dotted_numerals(#[case] input: &str, #[case] expected: &[u64]) {
        let parsed: VersionIdentifier = input.parse().unwrap();
        assert_eq!(parsed.parts(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("v1")]
    #[case("1..2")]
    #[case("1.2-beta")]
    #[case("+1")]
    #[case("-1")]
    #[case("^1.0")]
    fn from_str_rejects_malformed_values(#[case] input: &str) {
        assert_eq!(
            input.parse::<VersionIdentifier>().unwrap_err(),
            VersionError::InvalidVersionValue(input.to_string())
        );
    }

    #[test]
    fn empty_and_negative_tuples_are_invalid_values() {
        assert!(matches!(
            VersionIdentifier::new(vec![]),
            Err(VersionError::InvalidVersionValue(_))
        ));
        assert!(matches!(
            VersionIdentifier::try_from([1i64, -2].as_slice()),
            Err(VersionError::InvalidVersionValue(_))
        ));
        assert!(matches!(
            VersionIdentifier::try_from(-1i64),
            Err(VersionError::InvalidVersionValue(_))
        ));
    }

    #[test]
    fn semver_versions_use_major_minor_patch() {
        let version = semver::Version::parse("2.5.1-rc.1").unwrap();
        assert_eq!(VersionIdentifier::from(&version).parts(), &[2, 5, 1]);
    }

    #[rstest]
    #[case("3", &[3])]
    #[case("[1, 0, 1]", &[1, 0, 1])]
    #[case("\"4.2\"", &[4, 2])]
    #[case("18446744073709551615", &[u64::MAX])]
    #[case("[1, 9223372036854775808]", &[1, 9223372036854775808])]
    #[case("\"18446744073709551615\"", &[u64::MAX])]
    fn deserializes_integer_array_and_dotted_forms(#[case] json: &str, #[case] expected: &[u64]) {
        let parsed: VersionIdentifier = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.parts(), expected);
    }

    #[rstest]
    #[case("-3")]
    #[case("[]")]
    #[case("[1, -1]")]
    #[case("\"latest\"")]
    #[case("1.5")]
    fn deserialize_rejects_invalid_values(#[case] json: &str) {
        assert!(serde_json::from_str::<VersionIdentifier>(json).is_err());
    }

    #[test]
    fn display_renders_dotted_form() {
        assert_eq!(v(&[1, 0, 1]).to_string(), "1.0.1");
        assert_eq!(UpperBound::Unbounded.to_string(), "inf");
    }
}
