use chrono::NaiveDate;
use itertools::Itertools;
use shiftwise_quantities::{Hours, Ratio};

use crate::{
    conflict::{OverlapConflict, find_conflicts},
    load::EquipmentLoad,
    merge,
    ops::Interval,
    process::ProcessRecord,
};

/// Schedule compression analysis of a single business day.
#[must_use]
#[derive(Clone, Debug)]
pub struct DayAnalysis {
    pub date: NaiveDate,

    /// Union of the process windows as originally scheduled.
    pub original: Hours,

    /// Busy time of the most loaded equipment.
    pub optimized: Hours,

    /// Achievable time compression, `max(0, 1 − optimized / original)`.
    pub ratio: Ratio,

    pub loads: EquipmentLoad,

    pub conflicts: Vec<OverlapConflict>,

    /// Number of processes with a usable window.
    pub n_processes: usize,
}

impl DayAnalysis {
    /// Analyse the processes declared on `date`.
    ///
    /// Processes without a usable window are dropped. Returns [`None`] when none is left.
    pub fn analyse<'a>(
        date: NaiveDate,
        processes: impl IntoIterator<Item = &'a ProcessRecord>,
    ) -> Option<Self> {
        let usable: Vec<(&ProcessRecord, Interval)> = processes
            .into_iter()
            .filter_map(|process| process.window().map(|window| (process, window)))
            .collect_vec();
        if usable.is_empty() {
            return None;
        }

        let original = merge::union_hours(usable.iter().map(|(_, window)| *window));
        let loads: EquipmentLoad =
            usable.iter().map(|(process, window)| (&process.equipment, window.hours())).collect();
        let optimized = loads.bottleneck_hours();
        let ratio = compression_ratio(original, optimized);
        let conflicts = find_conflicts(usable.iter().map(|(process, _)| *process));

        Some(Self { date, original, optimized, ratio, loads, conflicts, n_processes: usable.len() })
    }
}

/// Time compression of `original` down to `optimized`, floored at zero.
pub fn compression_ratio(original: Hours, optimized: Hours) -> Ratio {
    if original.is_positive() {
        (Ratio::ONE - optimized / original).max(Ratio::ZERO)
    } else {
        Ratio::ZERO
    }
}
