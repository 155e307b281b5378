//! Union of process windows.

use itertools::Itertools;
use shiftwise_quantities::Hours;

use crate::ops::Interval;

/// Merge the intervals into their sorted, pairwise disjoint union.
///
/// Overlapping and touching intervals are merged into one.
pub fn merge(intervals: impl IntoIterator<Item = Interval>) -> Vec<Interval> {
    intervals
        .into_iter()
        .sorted_unstable_by_key(|interval| interval.start)
        .coalesce(|current, next| {
            if next.start <= current.end {
                Ok(current.with_end(current.end.max(next.end)))
            } else {
                Err((current, next))
            }
        })
        .collect()
}

/// Total wall-clock time covered by at least one of the intervals.
pub fn union_hours(intervals: impl IntoIterator<Item = Interval>) -> Hours {
    merge(intervals).into_iter().map(Interval::hours).sum()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 4).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn interval(from: u32, to: u32) -> Interval {
        Interval::new(at(from, 0), at(to, 0))
    }

    #[test]
    fn test_empty() {
        assert_eq!(union_hours([]), Hours::ZERO);
    }

    #[test]
    fn test_single_interval() {
        assert_abs_diff_eq!(union_hours([Interval::new(at(8, 0), at(9, 45))]).value(), 1.75);
    }

    #[test]
    fn test_overlapping() {
        assert_abs_diff_eq!(union_hours([interval(9, 11), interval(8, 10)]).value(), 3.0);
    }

    #[test]
    fn test_touching_merge() {
        let merged = merge([interval(9, 10), interval(8, 9)]);
        assert_eq!(merged, vec![interval(8, 10)]);
    }

    #[test]
    fn test_nested() {
        assert_abs_diff_eq!(union_hours([interval(8, 17), interval(10, 12)]).value(), 9.0);
    }

    #[test]
    fn test_disjoint_equals_sum() {
        let intervals = [interval(8, 9), interval(13, 15), interval(10, 11)];
        let sum: Hours = intervals.iter().copied().map(Interval::hours).sum();
        assert_eq!(union_hours(intervals), sum);
        assert_eq!(merge(intervals).len(), 3);
    }

    #[test]
    fn test_union_never_exceeds_sum() {
        let intervals = [interval(8, 12), interval(9, 10), interval(11, 14), interval(16, 18)];
        let sum: Hours = intervals.iter().copied().map(Interval::hours).sum();
        let union = union_hours(intervals);
        assert!(union < sum);
        assert_abs_diff_eq!(union.value(), 8.0, epsilon = 1e-9);
    }
}
