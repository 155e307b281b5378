use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar period the meter readings are bucketed into.
///
/// Each bucket is keyed by its first day.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationPeriod {
    #[default]
    Day,

    /// Week starting on Monday.
    Week,

    Month,
}

impl AggregationPeriod {
    /// First day of the period containing `date`.
    #[must_use]
    pub fn start_of(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Week => date
                .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
                .unwrap_or(date),
            Self::Month => date.with_day(1).unwrap_or(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    #[test]
    fn test_start_of() {
        // 2024-01-04 is a Thursday.
        assert_eq!(AggregationPeriod::Day.start_of(date(1, 4)), date(1, 4));
        assert_eq!(AggregationPeriod::Week.start_of(date(1, 4)), date(1, 1));
        assert_eq!(AggregationPeriod::Week.start_of(date(1, 7)), date(1, 1));
        assert_eq!(AggregationPeriod::Week.start_of(date(1, 8)), date(1, 8));
        assert_eq!(AggregationPeriod::Week.start_of(date(3, 1)), date(2, 26));
        assert_eq!(AggregationPeriod::Month.start_of(date(2, 29)), date(2, 1));
    }
}
