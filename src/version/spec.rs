//! Half-open version intervals

use std::cmp::Ordering;
use std::fmt;

use crate::version::error::VersionError;
use crate::version::identifier::{UpperBound, VersionIdentifier, compare, compare_to_bound};

/// The version interval `[min, max)` an implementation is valid for
///
/// `min` is inclusive and `max` exclusive. An unspecified `min` is `0`, an
/// unspecified `max` is unbounded. `min < max` holds for every value of this
/// type.
#[derive(Debug, Clone)]
pub struct VersionSpec {
    min: VersionIdentifier,
    max: UpperBound,
}

impl VersionSpec {
    /// Build an interval, rejecting empty or inverted ranges with
    /// [`VersionError::InvalidRange`]
    pub fn new(
        min: Option<VersionIdentifier>,
        max: Option<VersionIdentifier>,
    ) -> Result<Self, VersionError> {
        let min = min.unwrap_or_else(VersionIdentifier::zero);
        let max = max.map_or(UpperBound::Unbounded, UpperBound::Finite);

        if compare_to_bound(&min, &max) != Ordering::Less {
            return Err(VersionError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }

        Ok(Self { min, max })
    }

    /// `[0, inf)`, matching every version
    pub fn any() -> Self {
        Self {
            min: VersionIdentifier::zero(),
            max: UpperBound::Unbounded,
        }
    }

    /// `[min, inf)`
    pub fn at_least(min: impl Into<VersionIdentifier>) -> Self {
        Self {
            min: min.into(),
            max: UpperBound::Unbounded,
        }
    }

    /// `[0, max)`
    pub fn below(max: impl Into<VersionIdentifier>) -> Result<Self, VersionError> {
        Self::new(None, Some(max.into()))
    }

    /// `[min, max)`
    pub fn between(
        min: impl Into<VersionIdentifier>,
        max: impl Into<VersionIdentifier>,
    ) -> Result<Self, VersionError> {
        Self::new(Some(min.into()), Some(max.into()))
    }

    pub fn min(&self) -> &VersionIdentifier {
        &self.min
    }

    pub fn max(&self) -> &UpperBound {
        &self.max
    }

    /// Whether `version` lies in `[min, max)`
    pub fn contains(&self, version: &VersionIdentifier) -> bool {
        compare(&self.min, version) != Ordering::Greater
            && compare_to_bound(version, &self.max) == Ordering::Less
    }

    /// Parse `version` and test containment
    pub fn contains_value(&self, version: &str) -> Result<bool, VersionError> {
        let version: VersionIdentifier = version.parse()?;
        Ok(self.contains(&version))
    }

    /// Whether the two intervals share at least one version.
    ///
    /// Intervals that only touch at a boundary (`[1, 3)` and `[3, 4)`) do not
    /// overlap.
    pub fn overlaps(&self, other: &VersionSpec) -> bool {
        compare_to_bound(&self.min, &other.max) == Ordering::Less
            && compare_to_bound(&other.min, &self.max) == Ordering::Less
    }
}

impl Default for VersionSpec {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.max {
            UpperBound::Finite(max) => write!(f, ">= {}, < {}", self.min, max),
            UpperBound::Unbounded => write!(f, ">= {}", self.min),
        }
    }
}
