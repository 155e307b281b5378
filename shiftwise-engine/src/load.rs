use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shiftwise_quantities::Hours;

use crate::equipment::{EquipmentId, EquipmentList};

/// Busy time per piece of equipment over one day.
///
/// A process holding several pieces of equipment at once adds its full duration to each of them.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentLoad(BTreeMap<EquipmentId, Hours>);

impl EquipmentLoad {
    pub fn add(&mut self, equipment: &EquipmentList, duration: Hours) {
        for id in equipment {
            *self.0.entry(id.clone()).or_default() += duration;
        }
    }

    /// The most loaded equipment, ties resolved in favour of the lexicographically first id.
    #[must_use]
    pub fn bottleneck(&self) -> Option<(&EquipmentId, Hours)> {
        self.0
            .iter()
            .map(|(id, hours)| (id, *hours))
            .reduce(|max, next| if next.1 > max.1 { next } else { max })
    }

    /// Lower bound on the wall-clock time when no equipment runs two processes at once.
    pub fn bottleneck_hours(&self) -> Hours {
        self.bottleneck().map_or(Hours::ZERO, |(_, hours)| hours)
    }

    #[must_use]
    pub fn get(&self, id: &EquipmentId) -> Option<Hours> {
        self.0.get(id).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Loads from the busiest equipment down.
    pub fn descending(&self) -> impl Iterator<Item = (&EquipmentId, Hours)> {
        let mut loads: Vec<_> = self.0.iter().map(|(id, hours)| (id, *hours)).collect();
        loads.sort_by(|lhs, rhs| rhs.1.cmp(&lhs.1).then_with(|| lhs.0.cmp(rhs.0)));
        loads.into_iter()
    }
}

impl<'a> Extend<(&'a EquipmentList, Hours)> for EquipmentLoad {
    fn extend<T: IntoIterator<Item = (&'a EquipmentList, Hours)>>(&mut self, iter: T) {
        for (equipment, duration) in iter {
            self.add(equipment, duration);
        }
    }
}

impl<'a> FromIterator<(&'a EquipmentList, Hours)> for EquipmentLoad {
    fn from_iter<T: IntoIterator<Item = (&'a EquipmentList, Hours)>>(iter: T) -> Self {
        let mut load = Self::default();
        load.extend(iter);
        load
    }
}
