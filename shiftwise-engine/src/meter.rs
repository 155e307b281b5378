use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
    str::FromStr,
};

use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

/// Identifier of a cumulative meter, conventionally prefixed with its energy class (`elec44`).
#[derive(
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct MeterId(String);

impl From<&str> for MeterId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl MeterId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Energy class inferred from the identifier prefix.
    #[must_use]
    pub fn class(&self) -> Option<EnergyClass> {
        EnumSet::<EnergyClass>::all().iter().find(|class| self.0.starts_with(class.prefix()))
    }
}

#[derive(Debug, Hash, Ord, PartialOrd, EnumSetType, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyClass {
    Electricity,
    Water,
    Steam,
    Gas,
}

impl EnergyClass {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Electricity => "elec",
            Self::Water => "water",
            Self::Steam => "steam",
            Self::Gas => "gas",
        }
    }

    /// Unit the counters of this class are kept in.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Electricity => "kWh",
            Self::Water | Self::Gas | Self::Steam => "m³",
        }
    }
}

impl Display for EnergyClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown energy class `{0}`, expected one of: elec, water, steam, gas")]
pub struct UnknownEnergyClass(String);

impl FromStr for EnergyClass {
    type Err = UnknownEnergyClass;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        EnumSet::<Self>::all()
            .iter()
            .find(|class| class.prefix().eq_ignore_ascii_case(text.trim()))
            .ok_or_else(|| UnknownEnergyClass(text.to_owned()))
    }
}

/// Fixed set of meters, for example the shared utility system.
#[must_use]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeterSet(BTreeSet<MeterId>);

impl<T: Into<MeterId>> FromIterator<T> for MeterSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl MeterSet {
    #[must_use]
    pub fn contains(&self, id: &MeterId) -> bool {
        self.0.contains(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_by_prefix() {
        assert_eq!(MeterId::from("elec44").class(), Some(EnergyClass::Electricity));
        assert_eq!(MeterId::from("water110").class(), Some(EnergyClass::Water));
        assert_eq!(MeterId::from("steam143").class(), Some(EnergyClass::Steam));
        assert_eq!(MeterId::from("gas2").class(), Some(EnergyClass::Gas));
        assert_eq!(MeterId::from("A").class(), None);
    }

    #[test]
    fn test_parse_class() {
        assert_eq!("ELEC".parse::<EnergyClass>().unwrap(), EnergyClass::Electricity);
        assert!("oil".parse::<EnergyClass>().is_err());
    }
}
