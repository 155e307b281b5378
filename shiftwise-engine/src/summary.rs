use average::Mean;
use bon::Builder;
use chrono::NaiveDate;
use enumset::EnumSet;
use itertools::Itertools;
use tracing::{info, instrument};

use crate::{
    delta::MeterDeltas,
    meter::{EnergyClass, MeterId, MeterSet},
    ops::DateRange,
    period::AggregationPeriod,
    sample::EnergySamples,
};

/// Which part of the plant to include.
#[derive(Copy, Clone, Debug)]
pub enum SystemScope<'a> {
    /// Every meter.
    All,

    /// Shared utility system only.
    Utility(&'a MeterSet),

    /// Workshop process equipment only, which is electric.
    Workshop(&'a MeterSet),
}

impl SystemScope<'_> {
    #[must_use]
    pub fn admits(self, id: &MeterId) -> bool {
        match self {
            Self::All => true,
            Self::Utility(meters) | Self::Workshop(meters) => meters.contains(id),
        }
    }

    /// Narrow down the requested energy classes to those meaningful for the scope.
    #[must_use]
    pub fn restrict(self, classes: EnumSet<EnergyClass>) -> EnumSet<EnergyClass> {
        match self {
            Self::Workshop(_) => EnumSet::only(EnergyClass::Electricity),
            Self::All | Self::Utility(_) => classes,
        }
    }
}

/// Consumption over a date range, aggregated from per-period meter deltas.
///
/// Every period is keyed by its first day. Periods without samples are absent.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct ConsumptionSummary {
    pub period: AggregationPeriod,

    /// Per-meter consumption of every period, in ascending order.
    pub series: Vec<(NaiveDate, MeterDeltas)>,

    /// Total of every period, in ascending order.
    pub totals: Vec<(NaiveDate, f64)>,

    /// Top consumers by total over the range, descending, zero consumers excluded.
    pub ranking: Vec<(MeterId, f64)>,

    pub total: f64,

    /// Mean period total, [`None`] if there are no periods.
    pub average: Option<f64>,
}

#[derive(Builder)]
pub struct ConsumptionQuery<'a> {
    samples: &'a EnergySamples,

    #[builder(default = DateRange::FULL)]
    range: DateRange,

    #[builder(default)]
    period: AggregationPeriod,

    #[builder(default = EnumSet::only(EnergyClass::Electricity))]
    classes: EnumSet<EnergyClass>,

    #[builder(default = SystemScope::All)]
    scope: SystemScope<'a>,

    /// Only these meters, on top of the scope and the classes.
    meters: Option<&'a MeterSet>,

    /// Maximum ranking length.
    #[builder(default = 15)]
    top_n: usize,
}

impl ConsumptionQuery<'_> {
    #[instrument(skip_all, fields(period = ?self.period))]
    pub fn summarize(self) -> ConsumptionSummary {
        let classes = self.scope.restrict(self.classes);
        let admits = |id: &MeterId| {
            self.scope.admits(id)
                && self.meters.is_none_or(|meters| meters.contains(id))
                && id.class().is_some_and(|class| classes.contains(class))
        };

        // Consumption within a period is `max − min` over all of its samples.
        let series = self
            .samples
            .within(self.range)
            .by_period(self.period)
            .into_iter()
            .map(|(start, samples)| {
                (start, samples.into_iter().collect::<MeterDeltas>().retain(admits))
            })
            .collect_vec();

        let totals: Vec<(NaiveDate, f64)> = series
            .iter()
            .map(|(start, deltas)| (*start, deltas.iter().map(|(_, delta)| delta).sum()))
            .collect();
        let ranking = series
            .iter()
            .flat_map(|(_, deltas)| deltas.iter())
            .into_grouping_map_by(|(id, _)| (*id).clone())
            .fold(0.0, |sum, _, (_, delta)| sum + delta)
            .into_iter()
            .filter(|(_, total)| *total > 0.0)
            .sorted_by(|(lhs_id, lhs), (rhs_id, rhs)| {
                rhs.total_cmp(lhs).then_with(|| lhs_id.cmp(rhs_id))
            })
            .take(self.top_n)
            .collect_vec();

        let mean: Mean = totals.iter().map(|(_, total)| *total).collect();
        let average = if mean.is_empty() { None } else { Some(mean.mean()) };
        let total: f64 = totals.iter().map(|(_, total)| total).sum();
        info!(n_periods = totals.len(), total, ?average, "summarized");

        ConsumptionSummary { period: self.period, series, totals, ranking, total, average }
    }
}
