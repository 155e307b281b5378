use std::collections::BTreeMap;

use enumset::EnumSet;
use shiftwise_quantities::KilowattHours;

use crate::{
    meter::{EnergyClass, MeterId, MeterSet},
    sample::EnergySample,
};

/// Consumption per meter inferred from cumulative counters as `max − min` within one window.
///
/// Values are in the meter's own unit. Meters without a single present reading are absent.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeterDeltas(BTreeMap<MeterId, f64>);

impl<'a> FromIterator<&'a EnergySample> for MeterDeltas {
    fn from_iter<T: IntoIterator<Item = &'a EnergySample>>(samples: T) -> Self {
        let mut bounds: BTreeMap<&MeterId, (f64, f64)> = BTreeMap::new();
        for sample in samples {
            for (id, reading) in sample.present() {
                bounds
                    .entry(id)
                    .and_modify(|(min, max)| {
                        *min = min.min(reading);
                        *max = max.max(reading);
                    })
                    .or_insert((reading, reading));
            }
        }
        Self(bounds.into_iter().map(|(id, (min, max))| (id.clone(), max - min)).collect())
    }
}

impl MeterDeltas {
    #[must_use]
    pub fn get(&self, id: &MeterId) -> Option<f64> {
        self.0.get(id).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MeterId, f64)> {
        self.0.iter().map(|(id, delta)| (id, *delta))
    }

    /// Total over the meter subset, or [`None`] if none of the meters has data.
    ///
    /// Configured meters missing from the data contribute nothing.
    #[must_use]
    pub fn sum_over(&self, meters: &MeterSet) -> Option<KilowattHours> {
        let mut deltas = self.iter().filter(|(id, _)| meters.contains(id)).peekable();
        deltas.peek()?;
        Some(deltas.map(|(_, delta)| KilowattHours::new(delta)).sum())
    }

    /// Total over the meters of the given classes, zero if there are none.
    #[must_use]
    pub fn sum_of_classes(&self, classes: EnumSet<EnergyClass>) -> f64 {
        self.iter()
            .filter(|(id, _)| id.class().is_some_and(|class| classes.contains(class)))
            .map(|(_, delta)| delta)
            .sum()
    }

    /// Plant-wide electricity consumption.
    pub fn plant_total(&self) -> KilowattHours {
        KilowattHours::new(self.sum_of_classes(EnergyClass::Electricity.into()))
    }

    /// Keep only the meters satisfying the predicate.
    pub fn retain(mut self, mut predicate: impl FnMut(&MeterId) -> bool) -> Self {
        self.0.retain(|id, _| predicate(id));
        self
    }
}
