//! Range types
//!
//! Two unrelated kinds of range live here:
//! - [`Range`]: a closed `[min, max]` interval used as the request for a
//!   bounded random draw
//! - [`Bound`] / [`Interval`]: index-scan boundaries (`included`, `excluded`,
//!   `unbounded`), used by query code, never by the generator
//!
//! Reversed sampling ranges (`min > max`) are rejected, never swapped or
//! clamped.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Errors produced when building a sampling range
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Range minimum {min} is greater than maximum {max}")]
    Reversed { min: String, max: String },
}

/// Closed interval `[min, max]` with `min <= max`
///
/// # Example
/// ```
/// use module_rng::Range;
///
/// let dice = Range::new(1, 6).unwrap();
/// assert!(dice.contains(&6));
/// assert!(Range::new(6, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range<T> {
    min: T,
    max: T,
}

impl<T: PartialOrd + Display> Range<T> {
    /// Create a range, rejecting `min > max`
    pub fn new(min: T, max: T) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::Reversed {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }
}

impl<T: Copy> Range<T> {
    /// Caller guarantees `min <= max`
    pub(crate) const fn new_unchecked(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Range containing exactly one value
    pub fn single(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }
}

impl<T: PartialOrd> Range<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.min <= *value && *value <= self.max
    }
}

impl<T: PartialOrd + Display> TryFrom<RangeInclusive<T>> for Range<T> {
    type Error = RangeError;

    fn try_from(range: RangeInclusive<T>) -> Result<Self, Self::Error> {
        let (min, max) = range.into_inner();
        Self::new(min, max)
    }
}

/// One end of an index-scan interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound<T> {
    Included(T),
    Excluded(T),
    Unbounded,
}

impl<T> Bound<T> {
    pub fn as_ref(&self) -> Bound<&T> {
        match self {
            Bound::Included(v) => Bound::Included(v),
            Bound::Excluded(v) => Bound::Excluded(v),
            Bound::Unbounded => Bound::Unbounded,
        }
    }
}

impl<T> From<Bound<T>> for std::ops::Bound<T> {
    fn from(bound: Bound<T>) -> Self {
        match bound {
            Bound::Included(v) => std::ops::Bound::Included(v),
            Bound::Excluded(v) => std::ops::Bound::Excluded(v),
            Bound::Unbounded => std::ops::Bound::Unbounded,
        }
    }
}

impl<T> From<std::ops::Bound<T>> for Bound<T> {
    fn from(bound: std::ops::Bound<T>) -> Self {
        match bound {
            std::ops::Bound::Included(v) => Bound::Included(v),
            std::ops::Bound::Excluded(v) => Bound::Excluded(v),
            std::ops::Bound::Unbounded => Bound::Unbounded,
        }
    }
}

/// Index-scan interval between two bounds
///
/// Unlike [`Range`], an interval may be empty.
///
/// # Example
/// ```
/// use module_rng::{Bound, Interval};
///
/// let scan = Interval::new(Bound::Excluded(10), Bound::Unbounded);
/// assert!(!scan.contains(&10));
/// assert!(scan.contains(&11));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<T> {
    pub start: Bound<T>,
    pub end: Bound<T>,
}

impl<T> Interval<T> {
    pub fn new(start: Bound<T>, end: Bound<T>) -> Self {
        Self { start, end }
    }

    /// Interval covering every value
    pub fn full() -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
        }
    }
}

impl<T: PartialOrd> Interval<T> {
    pub fn contains(&self, value: &T) -> bool {
        let after_start = match &self.start {
            Bound::Included(s) => value >= s,
            Bound::Excluded(s) => value > s,
            Bound::Unbounded => true,
        };
        let before_end = match &self.end {
            Bound::Included(e) => value <= e,
            Bound::Excluded(e) => value < e,
            Bound::Unbounded => true,
        };
        after_start && before_end
    }
}

impl<T> From<RangeInclusive<T>> for Interval<T> {
    fn from(range: RangeInclusive<T>) -> Self {
        let (start, end) = range.into_inner();
        Self::new(Bound::Included(start), Bound::Included(end))
    }
}

impl<T> From<std::ops::Range<T>> for Interval<T> {
    fn from(range: std::ops::Range<T>) -> Self {
        Self::new(Bound::Included(range.start), Bound::Excluded(range.end))
    }
}
