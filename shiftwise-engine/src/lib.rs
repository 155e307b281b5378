//! Estimate how much utility energy a plant could save by compressing its daily process
//! schedule down to the equipment bottleneck.
//!
//! The crate is a pure batch computation over in-memory records:
//!
//! 1. [`ProcessBook`] records are grouped by their declared business date.
//! 2. For each day, the union of the process windows gives the original duration, and the busiest
//!    equipment gives the optimized duration ([`DayAnalysis`]).
//! 3. The resulting compression ratio is applied to the day's utility meter consumption
//!    ([`MeterDeltas`]), producing a [`SavingsRow`].
//!
//! Days lacking usable processes or utility meter data are left out of the [`SavingsReport`].

pub mod analysis;
pub mod book;
pub mod conflict;
pub mod delta;
pub mod equipment;
pub mod issue;
pub mod load;
pub mod merge;
pub mod meter;
pub mod ops;
pub mod period;
pub mod process;
pub mod report;
pub mod sample;
pub mod summary;
pub mod timestamp;

pub use self::{
    analysis::DayAnalysis,
    book::ProcessBook,
    conflict::OverlapConflict,
    delta::MeterDeltas,
    equipment::{EquipmentId, EquipmentList, EquipmentRegistry},
    issue::{Issue, IssueReason, RecordError, Validated},
    load::EquipmentLoad,
    meter::{EnergyClass, MeterId, MeterSet},
    ops::{DateRange, Interval},
    period::AggregationPeriod,
    process::{ProcessDetails, ProcessRecord, RawProcess},
    report::{Estimator, SavingsReport, SavingsRow},
    sample::{EnergySample, EnergySamples},
    summary::{ConsumptionQuery, ConsumptionSummary, SystemScope},
};
