use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{equipment::EquipmentId, ops::Interval, process::ProcessRecord};

/// Two processes declared on the same equipment with overlapping windows.
///
/// Loads are still summed for such pairs, so the bottleneck may understate the real one.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OverlapConflict {
    pub equipment: EquipmentId,
    pub first: Interval,
    pub second: Interval,
}

/// Find all same-equipment overlaps among the usable processes.
///
/// Windows that merely touch are not conflicts. Results are ordered by equipment, then by start.
pub fn find_conflicts<'a>(
    processes: impl IntoIterator<Item = &'a ProcessRecord>,
) -> Vec<OverlapConflict> {
    let mut windows: BTreeMap<&EquipmentId, Vec<Interval>> = BTreeMap::new();
    for process in processes {
        let Some(window) = process.window() else { continue };
        for id in &process.equipment {
            windows.entry(id).or_default().push(window);
        }
    }

    windows
        .into_iter()
        .flat_map(|(equipment, mut windows)| {
            windows.sort_unstable_by_key(|window| (window.start, window.end));
            windows
                .into_iter()
                .tuple_combinations()
                .filter(|(first, second)| first.overlaps(*second))
                .map(|(first, second)| OverlapConflict {
                    equipment: equipment.clone(),
                    first,
                    second,
                })
                .collect_vec()
        })
        .collect()
}
