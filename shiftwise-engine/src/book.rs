use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ops::DateRange, process::ProcessRecord};

/// Collection of process records the estimator reads as an immutable snapshot.
#[must_use]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessBook(Vec<ProcessRecord>);

impl ProcessBook {
    pub fn push(&mut self, record: ProcessRecord) {
        self.0.push(record);
    }

    /// Remove the record at `index`, returning it if the index was in range.
    pub fn remove(&mut self, index: usize) -> Option<ProcessRecord> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.0.iter()
    }

    /// Group the records by their declared business date, in ascending date order.
    #[must_use]
    pub fn by_date(&self) -> BTreeMap<NaiveDate, Vec<&ProcessRecord>> {
        let mut days: BTreeMap<NaiveDate, Vec<&ProcessRecord>> = BTreeMap::new();
        for record in &self.0 {
            days.entry(record.date).or_default().push(record);
        }
        days
    }

    /// Records whose business date falls within the range.
    pub fn within(&self, range: DateRange) -> Self {
        self.0.iter().filter(|record| range.contains(record.date)).cloned().collect()
    }
}

impl FromIterator<ProcessRecord> for ProcessBook {
    fn from_iter<T: IntoIterator<Item = ProcessRecord>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ProcessBook {
    type Item = &'a ProcessRecord;
    type IntoIter = std::slice::Iter<'a, ProcessRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate};

    use super::*;
    use crate::equipment::EquipmentList;

    fn record(day: u32) -> ProcessRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        ProcessRecord::builder().date(date).equipment(EquipmentList::parse("X")).build()
    }

    #[test]
    fn test_by_date_is_ascending() {
        let book: ProcessBook = [record(5), record(3), record(5)].into_iter().collect();
        let days = book.by_date();
        let summary: Vec<_> = days.iter().map(|(date, records)| (date.day0(), records.len())).collect();
        assert_eq!(summary, vec![(2, 1), (4, 2)]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut book: ProcessBook = [record(3)].into_iter().collect();
        assert!(book.remove(1).is_none());
        assert!(book.remove(0).is_some());
        assert!(book.is_empty());
    }

    #[test]
    fn test_within() {
        let book: ProcessBook = [record(3), record(4), record(5)].into_iter().collect();
        let date = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        assert_eq!(book.within(DateRange::from(date(4)..=date(9))).len(), 2);
    }
}
