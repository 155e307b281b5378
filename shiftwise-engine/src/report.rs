use std::time::Instant;

use bon::Builder;
use chrono::NaiveDate;
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use shiftwise_quantities::{Hours, KilowattHours, Ratio};
use tracing::{debug, info, instrument, warn};

use crate::{
    analysis::{DayAnalysis, compression_ratio},
    book::ProcessBook,
    delta::MeterDeltas,
    meter::MeterSet,
    sample::EnergySamples,
};

/// Estimated utility savings of one day.
///
/// Values are full precision, rounding is left to the presentation.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavingsRow {
    pub date: NaiveDate,

    /// Union of the process windows.
    pub original: Hours,

    /// Bottleneck equipment busy time.
    pub optimized: Hours,

    /// Time compression.
    pub ratio: Ratio,

    /// Utility system consumption on the day.
    pub public_energy: KilowattHours,

    /// Plant-wide electricity consumption on the day.
    pub total_energy: KilowattHours,

    /// Share of the utility system in the plant total as a fraction, so `0.25` is 25 %.
    ///
    /// Zero if the total is not positive. Use [`Ratio::to_percent`] for the percentage.
    pub public_share: Ratio,

    /// Utility energy saved by compressing the schedule.
    pub saving: KilowattHours,

    /// Utility energy expected after the compression.
    pub optimized_energy: KilowattHours,
}

impl SavingsRow {
    pub fn new(
        analysis: &DayAnalysis,
        public_energy: KilowattHours,
        total_energy: KilowattHours,
    ) -> Self {
        let saving = public_energy * analysis.ratio;
        let public_share =
            if total_energy.is_positive() { public_energy / total_energy } else { Ratio::ZERO };
        Self {
            date: analysis.date,
            original: analysis.original,
            optimized: analysis.optimized,
            ratio: analysis.ratio,
            public_energy,
            total_energy,
            public_share,
            saving,
            optimized_energy: public_energy - saving,
        }
    }
}

/// Multi-day savings report.
///
/// A day is present only if it had usable processes and utility meter data. An absent day is
/// "insufficient data", which is not the same as a present day with zero savings.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct SavingsReport {
    /// One row per reported day, in ascending date order.
    pub rows: Vec<SavingsRow>,

    /// Schedule analysis behind each row, in the same order.
    pub analyses: Vec<DayAnalysis>,

    /// Sum of the daily savings.
    pub total_saving: KilowattHours,
}

impl SavingsReport {
    pub fn total_original(&self) -> Hours {
        self.rows.iter().map(|row| row.original).sum()
    }

    pub fn total_optimized(&self) -> Hours {
        self.rows.iter().map(|row| row.optimized).sum()
    }

    /// Time compression over all reported days together.
    pub fn overall_ratio(&self) -> Ratio {
        compression_ratio(self.total_original(), self.total_optimized())
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&SavingsRow> {
        self.rows.iter().find(|row| row.date == date)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Joins the daily schedule analyses with the daily utility consumption.
#[derive(Builder)]
pub struct Estimator<'a> {
    processes: &'a ProcessBook,
    samples: &'a EnergySamples,

    /// Shared utility system meters whose consumption scales with the schedule length.
    utility_meters: &'a MeterSet,
}

impl Estimator<'_> {
    #[instrument(skip_all)]
    pub fn estimate(self) -> SavingsReport {
        let start_instant = Instant::now();
        let samples_by_date = self.samples.by_date();
        let days = self.processes.by_date().into_iter().collect_vec();
        info!(
            n_days = days.len(),
            n_processes = self.processes.len(),
            n_samples = self.samples.len(),
            n_utility_meters = self.utility_meters.len(),
            "estimating…",
        );

        let (rows, analyses): (Vec<_>, Vec<_>) = days
            .into_par_iter()
            .filter_map(|(date, processes)| {
                let Some(analysis) = DayAnalysis::analyse(date, processes) else {
                    debug!(%date, "skipped: no usable processes");
                    return None;
                };
                let Some(samples) = samples_by_date.get(&date) else {
                    debug!(%date, "skipped: no energy samples");
                    return None;
                };
                let deltas: MeterDeltas = samples.iter().copied().collect();
                let Some(public_energy) = deltas.sum_over(self.utility_meters) else {
                    debug!(%date, "skipped: no utility meter data");
                    return None;
                };
                for conflict in &analysis.conflicts {
                    warn!(
                        %date,
                        equipment = %conflict.equipment,
                        first = ?conflict.first,
                        second = ?conflict.second,
                        "overlapping processes on the same equipment",
                    );
                }
                let row = SavingsRow::new(&analysis, public_energy, deltas.plant_total());
                debug!(%date, ratio = %row.ratio, saving = %row.saving, "analysed");
                Some((row, analysis))
            })
            .unzip();

        let total_saving: KilowattHours = rows.iter().map(|row| row.saving).sum();
        info!(n_rows = rows.len(), %total_saving, elapsed = ?start_instant.elapsed(), "estimated");
        SavingsReport { rows, analyses, total_saving }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use approx::assert_abs_diff_eq;
    use chrono::NaiveDateTime;

    use super::*;
    use crate::{
        equipment::EquipmentList,
        meter::MeterId,
        ops::Interval,
        process::ProcessRecord,
        sample::EnergySample,
    };

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        date(day).and_hms_opt(hour, 0, 0).unwrap()
    }

    fn process(day: u32, from: u32, to: u32, equipment: &str) -> ProcessRecord {
        ProcessRecord::builder()
            .date(date(day))
            .start(at(day, from))
            .end(at(day, to))
            .equipment(EquipmentList::parse(equipment))
            .build()
    }

    fn sample(day: u32, hour: u32, readings: &[(&str, f64)]) -> EnergySample {
        let readings: BTreeMap<MeterId, Option<f64>> =
            readings.iter().map(|(id, reading)| (MeterId::from(*id), Some(*reading))).collect();
        EnergySample::new(at(day, hour), readings)
    }

    /// Day 4: utility meter `A` consumes 100, another meter 300, plant total 400.
    fn day_samples(day: u32) -> [EnergySample; 2] {
        [
            sample(day, 0, &[("elecA", 1000.0), ("elecB", 0.0)]),
            sample(day, 23, &[("elecA", 1100.0), ("elecB", 300.0)]),
        ]
    }

    fn utility() -> MeterSet {
        ["elecA"].into_iter().collect()
    }

    fn estimate(processes: &ProcessBook, samples: &EnergySamples) -> SavingsReport {
        Estimator::builder()
            .processes(processes)
            .samples(samples)
            .utility_meters(&utility())
            .build()
            .estimate()
    }

    #[test]
    fn test_savings_arithmetic() {
        // Union 8:00–12:00 is 4 h, bottleneck `X` is 3 h, ratio is 0.25:
        let processes: ProcessBook =
            [process(4, 8, 10, "X"), process(4, 9, 10, "X"), process(4, 10, 12, "Y")]
                .into_iter()
                .collect();
        let samples: EnergySamples = day_samples(4).into_iter().collect();
        let report = estimate(&processes, &samples);

        assert_eq!(report.rows.len(), 1);
        let row = report.rows[0];
        assert_abs_diff_eq!(row.ratio.value(), 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(row.public_energy.value(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(row.total_energy.value(), 400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(row.saving.value(), 25.0, epsilon = 1e-9);
        assert_abs_diff_eq!(row.optimized_energy.value(), 75.0, epsilon = 1e-9);
        assert_abs_diff_eq!(row.public_share.value(), 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(row.public_share.to_percent(), 25.0, epsilon = 1e-9);
        assert_eq!(report.total_saving, row.saving);
    }

    #[test]
    fn test_day_without_utility_data_is_absent() {
        let processes: ProcessBook =
            [process(4, 8, 10, "X"), process(5, 8, 10, "X"), process(5, 9, 11, "Y")]
                .into_iter()
                .collect();
        let mut rows = vec![sample(4, 0, &[("elecB", 0.0)]), sample(4, 9, &[("elecB", 9.0)])];
        rows.extend(day_samples(5));
        let samples: EnergySamples = rows.into_iter().collect();

        let report = estimate(&processes, &samples);
        assert!(report.get(date(4)).is_none());
        assert!(report.get(date(5)).is_some());
        assert_eq!(report.total_saving, report.get(date(5)).unwrap().saving);
    }

    #[test]
    fn test_day_without_samples_is_absent() {
        let processes: ProcessBook = [process(4, 8, 10, "X")].into_iter().collect();
        let report = estimate(&processes, &EnergySamples::default());
        assert!(report.is_empty());
        assert_eq!(report.total_saving, KilowattHours::ZERO);
    }

    #[test]
    fn test_zero_saving_day_is_present() {
        let processes: ProcessBook =
            [process(4, 8, 9, "X"), process(4, 9, 10, "X")].into_iter().collect();
        let samples: EnergySamples = day_samples(4).into_iter().collect();
        let report = estimate(&processes, &samples);
        let row = report.get(date(4)).unwrap();
        assert_eq!(row.saving, KilowattHours::ZERO);
        assert_eq!(row.optimized_energy, row.public_energy);
    }

    #[test]
    fn test_grouping_uses_declared_date() {
        // Declared on the 5th, but the window lies on the 4th:
        let stray = ProcessRecord::builder()
            .date(date(5))
            .start(at(4, 8))
            .end(at(4, 10))
            .equipment(EquipmentList::parse("X"))
            .build();
        let processes: ProcessBook = [stray].into_iter().collect();
        let samples: EnergySamples = day_samples(4).into_iter().chain(day_samples(5)).collect();
        let report = estimate(&processes, &samples);
        assert_eq!(report.rows.iter().map(|row| row.date).collect_vec(), vec![date(5)]);
    }

    #[test]
    fn test_rows_ascending_and_totals() {
        let processes: ProcessBook = [
            process(6, 8, 10, "X"),
            process(6, 9, 11, "Y"),
            process(4, 8, 12, "X"),
            process(4, 8, 10, "Y"),
        ]
        .into_iter()
        .collect();
        let samples: EnergySamples = day_samples(6).into_iter().chain(day_samples(4)).collect();
        let report = estimate(&processes, &samples);

        assert_eq!(report.rows.iter().map(|row| row.date).collect_vec(), vec![date(4), date(6)]);
        let analysed = report.analyses.iter().map(|day| day.date).collect_vec();
        assert_eq!(analysed, vec![date(4), date(6)]);
        assert_abs_diff_eq!(report.total_original().value(), 7.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.total_optimized().value(), 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(report.overall_ratio().value(), 1.0 / 7.0, epsilon = 1e-9);
        let sum: KilowattHours = report.rows.iter().map(|row| row.saving).sum();
        assert_eq!(report.total_saving, sum);
        for row in &report.rows {
            assert!(row.saving <= row.public_energy);
        }
    }

    #[test]
    fn test_idempotent() {
        let processes: ProcessBook =
            [process(4, 8, 10, "X, Y"), process(4, 9, 11, "Y")].into_iter().collect();
        let samples: EnergySamples = day_samples(4).into_iter().collect();
        let first = estimate(&processes, &samples);
        let second = estimate(&processes, &samples);
        assert_eq!(first.rows, second.rows);
        assert_eq!(format!("{:?}", first.rows), format!("{:?}", second.rows));
    }

    #[test]
    fn test_public_share_with_zero_total() {
        let processes: ProcessBook = [process(4, 8, 10, "X")].into_iter().collect();
        let samples: EnergySamples = [sample(4, 0, &[("elecA", 5.0)]), sample(4, 1, &[("elecA", 5.0)])]
            .into_iter()
            .collect();
        let row = *estimate(&processes, &samples).get(date(4)).unwrap();
        assert_eq!(row.total_energy, KilowattHours::ZERO);
        assert_eq!(row.public_share, Ratio::ZERO);
    }

    #[test]
    fn test_optimized_window_is_ignored() {
        let plain = [process(4, 8, 10, "X"), process(4, 9, 11, "Y")];
        let annotated = plain.clone().map(|process| ProcessRecord {
            optimized_window: Some(Interval::new(at(4, 8), at(4, 9))),
            ..process
        });
        let samples: EnergySamples = day_samples(4).into_iter().collect();
        let plain: ProcessBook = plain.into_iter().collect();
        let annotated: ProcessBook = annotated.into_iter().collect();
        assert_eq!(estimate(&plain, &samples).rows, estimate(&annotated, &samples).rows);
    }
}
