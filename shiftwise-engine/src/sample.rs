use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    issue::{Issue, IssueReason, RecordError, Validated},
    meter::MeterId,
    ops::DateRange,
    period::AggregationPeriod,
    timestamp,
};

/// Single timestamped row of cumulative meter readings.
///
/// A [`None`] reading is missing and takes no part in the daily deltas.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnergySample {
    pub timestamp: NaiveDateTime,
    pub readings: BTreeMap<MeterId, Option<f64>>,
}

impl EnergySample {
    pub const fn new(timestamp: NaiveDateTime, readings: BTreeMap<MeterId, Option<f64>>) -> Self {
        Self { timestamp, readings }
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Present (non-null) readings.
    pub fn present(&self) -> impl Iterator<Item = (&MeterId, f64)> {
        self.readings.iter().filter_map(|(id, reading)| reading.map(|reading| (id, reading)))
    }

    /// Build a sample from a tabular row of `(column, cell)` text pairs.
    ///
    /// Blank cells become missing readings. Cells that do not parse as numbers become missing
    /// readings too, and are reported.
    pub fn try_from_row<'a>(
        timestamp: &str,
        cells: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Validated<Self>, RecordError> {
        let timestamp = timestamp::parse_date_time(timestamp)
            .ok_or_else(|| RecordError::InvalidTimestamp(timestamp.to_owned()))?;
        let mut issues = Vec::new();
        let readings = cells
            .into_iter()
            .map(|(column, cell)| {
                let cell = cell.trim();
                let reading = if cell.is_empty() {
                    None
                } else if let Ok(reading) = cell.parse::<f64>()
                    && reading.is_finite()
                {
                    Some(reading)
                } else {
                    issues.push(Issue::new(column, cell, IssueReason::UnparsableReading));
                    None
                };
                (MeterId::from(column), reading)
            })
            .collect();
        Ok(Validated { value: Self { timestamp, readings }, issues })
    }
}

/// Energy time series snapshot.
#[must_use]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergySamples(Vec<EnergySample>);

impl EnergySamples {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnergySample> {
        self.0.iter()
    }

    /// Group the samples by the calendar date of their timestamps.
    #[must_use]
    pub fn by_date(&self) -> BTreeMap<NaiveDate, Vec<&EnergySample>> {
        self.by_period(AggregationPeriod::Day)
    }

    /// Group the samples by the first day of the period they fall into.
    #[must_use]
    pub fn by_period(&self, period: AggregationPeriod) -> BTreeMap<NaiveDate, Vec<&EnergySample>> {
        let mut buckets: BTreeMap<NaiveDate, Vec<&EnergySample>> = BTreeMap::new();
        for sample in &self.0 {
            buckets.entry(period.start_of(sample.date())).or_default().push(sample);
        }
        buckets
    }

    pub fn within(&self, range: DateRange) -> Self {
        self.0.iter().filter(|sample| range.contains(sample.date())).cloned().collect()
    }
}

impl FromIterator<EnergySample> for EnergySamples {
    fn from_iter<T: IntoIterator<Item = EnergySample>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EnergySamples {
    type Item = &'a EnergySample;
    type IntoIter = std::slice::Iter<'a, EnergySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
