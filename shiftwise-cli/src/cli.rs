mod consumption;
mod estimate;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use shiftwise_engine::DateRange;

pub use self::{
    consumption::{ConsumptionArgs, consumption},
    estimate::{EstimateArgs, estimate},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Plant configuration: utility meters, workshop meters, equipment registry.
    #[clap(long, env = "SHIFTWISE_CONFIG", default_value = "shiftwise.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: estimate the utility energy saved by compressing the daily schedules.
    #[clap(name = "estimate")]
    Estimate(Box<EstimateArgs>),

    /// Summarize the meter consumption over a period.
    #[clap(name = "consumption")]
    Consumption(Box<ConsumptionArgs>),
}

#[derive(Parser)]
pub struct EnergyArgs {
    /// CSV with the cumulative meter readings: timestamp first, then one column per meter.
    #[clap(long = "energy", env = "SHIFTWISE_ENERGY_PATH")]
    pub path: PathBuf,
}

#[derive(Copy, Clone, Parser)]
pub struct DateRangeArgs {
    /// First date to include.
    #[clap(long)]
    pub since: Option<NaiveDate>,

    /// Last date to include.
    #[clap(long)]
    pub until: Option<NaiveDate>,
}

impl DateRangeArgs {
    pub fn range(self) -> DateRange {
        DateRange {
            min: self.since.unwrap_or(DateRange::FULL.min),
            max: self.until.unwrap_or(DateRange::FULL.max),
        }
    }
}
