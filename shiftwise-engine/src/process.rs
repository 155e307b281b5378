use bon::Builder;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    equipment::{EquipmentList, EquipmentRegistry},
    issue::{Issue, IssueReason, RecordError, Validated},
    ops::Interval,
    timestamp,
};

/// One scheduled manufacturing operation.
///
/// The record is attributed to [`ProcessRecord::date`], which is the declared business date and
/// is not derived from the timestamps. A process whose window lies on another calendar day is
/// still grouped under its declared date.
#[must_use]
#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub date: NaiveDate,

    pub start: Option<NaiveDateTime>,

    pub end: Option<NaiveDateTime>,

    /// Equipment occupied for the entire window.
    pub equipment: EquipmentList,

    #[builder(default)]
    #[serde(default)]
    pub details: ProcessDetails,

    /// Window assigned by a downstream scheduler.
    ///
    /// Carried along for the callers only: the estimator neither reads nor writes it.
    pub optimized_window: Option<Interval>,
}

impl ProcessRecord {
    /// Usable window, or [`None`] when a timestamp is missing or the window is empty.
    #[must_use]
    pub fn window(&self) -> Option<Interval> {
        Interval::try_new(self.start?, self.end?)
    }
}

/// Descriptive attributes carried along for display, never used in the arithmetic.
#[must_use]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProcessDetails {
    pub product: Option<String>,
    pub name: Option<String>,
    pub specification: Option<String>,
    pub batch_number: Option<u32>,
    pub input_quantity: Option<f64>,
    pub worker_count: Option<u32>,
    pub output_quantity: Option<f64>,
}

/// Process as it arrives from a form or a file, with every field in text form.
#[derive(Clone, Debug, Deserialize)]
pub struct RawProcess {
    pub date: String,

    /// Full timestamp, or a time of day on [`RawProcess::date`].
    pub start: Option<String>,

    /// Full timestamp, or a time of day on [`RawProcess::date`].
    pub end: Option<String>,

    #[serde(default)]
    pub equipment: String,

    #[serde(flatten)]
    pub details: ProcessDetails,
}

impl RawProcess {
    /// Build the typed record.
    ///
    /// Only an unparsable date is fatal, since the record could not be attributed to any day.
    /// Unparsable timestamps are dropped and unregistered equipment is kept; both are reported.
    pub fn validate(
        self,
        registry: &EquipmentRegistry,
    ) -> Result<Validated<ProcessRecord>, RecordError> {
        let date = timestamp::parse_date(&self.date)
            .ok_or_else(|| RecordError::InvalidProcessDate(self.date.clone()))?;

        let mut issues = Vec::new();
        let mut parse_timestamp = |field: &str, text: Option<String>| {
            let text = text?;
            let parsed = timestamp::parse_on_date(&text, date);
            if parsed.is_none() {
                issues.push(Issue::new(field, text, IssueReason::UnparsableTimestamp));
            }
            parsed
        };
        let start = parse_timestamp("start", self.start);
        let end = parse_timestamp("end", self.end);

        let equipment = EquipmentList::parse(&self.equipment);
        issues.extend(registry.check(&equipment));

        let record = ProcessRecord {
            date,
            start,
            end,
            equipment,
            details: self.details,
            optimized_window: None,
        };
        Ok(Validated { value: record, issues })
    }
}
