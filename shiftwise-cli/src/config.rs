use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use shiftwise_engine::{EquipmentRegistry, MeterId, MeterSet};

use crate::prelude::*;

/// Plant configuration file.
#[must_use]
#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantConfig {
    /// Shared utility system meters (compressors, chillers, lighting…).
    pub utility_meters: MeterSet,

    /// Meters of the workshop process equipment.
    pub workshop_meters: MeterSet,

    /// Known equipment. Empty means that any equipment name is accepted.
    pub equipment: EquipmentRegistry,

    /// Human-readable meter descriptions.
    pub meters: BTreeMap<MeterId, String>,
}

impl PlantConfig {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| {
            format!("failed to read the configuration from `{}`", path.display())
        })?;
        let config = Self::parse(&text)
            .with_context(|| format!("invalid configuration in `{}`", path.display()))?;
        info!(
            n_utility_meters = config.utility_meters.len(),
            n_workshop_meters = config.workshop_meters.len(),
            "loaded the configuration",
        );
        if config.utility_meters.is_empty() {
            warn!("no utility meters configured, the savings report is going to be empty");
        }
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Meter description, falling back to the identifier itself.
    #[must_use]
    pub fn describe<'a>(&'a self, id: &'a MeterId) -> &'a str {
        self.meters.get(id).map_or_else(|| id.as_str(), String::as_str)
    }
}
