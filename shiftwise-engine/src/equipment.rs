use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::issue::{Issue, IssueReason};

/// Name of a single piece of equipment that runs at most one process at a time.
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
pub struct EquipmentId(String);

impl EquipmentId {
    /// Stands in for a blank equipment field so that the process still contributes load.
    pub const UNNAMED: &'static str = "<unnamed>";

    pub fn unnamed() -> Self {
        Self(Self::UNNAMED.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_unnamed(&self) -> bool {
        self.0 == Self::UNNAMED
    }
}

impl AsRef<str> for EquipmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EquipmentId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// Equipment occupied by one process for its entire duration.
///
/// Never empty: a blank field parses into the single [`EquipmentId::UNNAMED`] placeholder.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EquipmentList(Vec<EquipmentId>);

impl EquipmentList {
    /// Separators accepted between equipment names.
    pub const SEPARATORS: [char; 3] = [',', '，', '、'];

    /// Split the free-text field, trimming names and dropping duplicates while keeping the order.
    pub fn parse(text: &str) -> Self {
        let ids = text
            .split(Self::SEPARATORS)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unique()
            .map(EquipmentId::from)
            .collect_vec();
        if ids.is_empty() { Self(vec![EquipmentId::unnamed()]) } else { Self(ids) }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquipmentId> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a EquipmentList {
    type Item = &'a EquipmentId;
    type IntoIter = std::slice::Iter<'a, EquipmentId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Known equipment of the plant.
///
/// An empty registry accepts anything.
#[must_use]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentRegistry(BTreeSet<EquipmentId>);

impl<T: Into<EquipmentId>> FromIterator<T> for EquipmentRegistry {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl EquipmentRegistry {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn knows(&self, id: &EquipmentId) -> bool {
        self.0.is_empty() || id.is_unnamed() || self.0.contains(id)
    }

    /// Flag the ids that are not registered. The ids themselves are left in place.
    pub fn check(&self, equipment: &EquipmentList) -> Vec<Issue> {
        equipment
            .iter()
            .filter(|id| !self.knows(id))
            .map(|id| Issue::new("equipment", id.as_str(), IssueReason::UnknownEquipment))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &EquipmentList) -> Vec<&str> {
        list.iter().map(EquipmentId::as_str).collect()
    }

    #[test]
    fn test_parse_mixed_separators() {
        let list = EquipmentList::parse(" elec52 ,elec53，elec54、 elec55");
        assert_eq!(names(&list), ["elec52", "elec53", "elec54", "elec55"]);
    }

    #[test]
    fn test_parse_blank_yields_placeholder() {
        for text in ["", "   ", ", ,，"] {
            let list = EquipmentList::parse(text);
            assert_eq!(names(&list), [EquipmentId::UNNAMED]);
        }
    }

    #[test]
    fn test_parse_drops_duplicates() {
        let list = EquipmentList::parse("X, Y, X");
        assert_eq!(names(&list), ["X", "Y"]);
    }

    #[test]
    fn test_registry_flags_unknown() {
        let registry: EquipmentRegistry = ["X", "Y"].into_iter().collect();
        let issues = registry.check(&EquipmentList::parse("X, Z"));
        assert_eq!(issues, vec![Issue::new("equipment", "Z", IssueReason::UnknownEquipment)]);
    }

    #[test]
    fn test_empty_registry_accepts_anything() {
        let registry = EquipmentRegistry::default();
        assert!(registry.check(&EquipmentList::parse("whatever")).is_empty());
    }
}
