use std::{
    fmt::{Debug, Formatter},
    ops::Sub,
};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shiftwise_quantities::Hours;

/// Plant wall-clock window, start inclusive and end exclusive.
pub type Interval = RangeExclusive<NaiveDateTime>;

#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RangeExclusive<T: Copy> {
    pub start: T,
    pub end: T,
}

impl<T: Copy + Debug> Debug for RangeExclusive<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl<T: Copy> RangeExclusive<T> {
    pub const fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    pub const fn with_end(mut self, end: T) -> Self {
        self.end = end;
        self
    }
}

impl<T: Copy + PartialOrd> RangeExclusive<T> {
    /// Build the range only when it is non-empty.
    pub fn try_new(start: T, end: T) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    #[must_use]
    pub fn contains(self, other: T) -> bool {
        (self.start <= other) && (other < self.end)
    }

    /// Whether the two ranges share at least one point. Touching ranges do not overlap.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        (self.start < other.end) && (other.start < self.end)
    }
}

impl<T: Copy + Sub> RangeExclusive<T> {
    #[must_use]
    pub fn len(self) -> <T as Sub>::Output {
        self.end - self.start
    }
}

impl Interval {
    pub fn hours(self) -> Hours {
        Hours::from(self.len())
    }
}

/// Calendar dates, both ends inclusive.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RangeInclusive<T: Copy> {
    pub min: T,
    pub max: T,
}

pub type DateRange = RangeInclusive<NaiveDate>;

impl<T: Copy> From<std::ops::RangeInclusive<T>> for RangeInclusive<T> {
    fn from(range: std::ops::RangeInclusive<T>) -> Self {
        Self { min: *range.start(), max: *range.end() }
    }
}

impl<T: Copy + PartialOrd> RangeInclusive<T> {
    #[must_use]
    pub fn contains(self, other: T) -> bool {
        (self.min <= other) && (other <= self.max)
    }
}

impl DateRange {
    /// Range that admits every date.
    pub const FULL: Self = Self { min: NaiveDate::MIN, max: NaiveDate::MAX };
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 4)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
    }

    #[test]
    fn test_try_new_rejects_empty() {
        assert!(Interval::try_new(at(9), at(9)).is_none());
        assert!(Interval::try_new(at(10), at(9)).is_none());
        assert!(Interval::try_new(at(8), at(9)).is_some());
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        let first = Interval::new(at(8), at(9));
        assert!(!first.overlaps(Interval::new(at(9), at(10))));
        assert!(first.overlaps(Interval::new(at(8), at(10))));
    }

    #[test]
    fn test_date_range_contains() {
        let date = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let range = DateRange::from(date(2)..=date(4));
        assert!(range.contains(date(2)));
        assert!(range.contains(date(4)));
        assert!(!range.contains(date(5)));
        assert!(DateRange::FULL.contains(date(5)));
    }
}
