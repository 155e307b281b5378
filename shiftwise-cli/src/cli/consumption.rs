use clap::{Parser, ValueEnum};
use enumset::EnumSet;
use shiftwise_engine::{
    AggregationPeriod, ConsumptionQuery, EnergyClass, MeterId, MeterSet, SystemScope,
};

use crate::{
    cli::{DateRangeArgs, EnergyArgs},
    config::PlantConfig,
    input::read_energy,
    prelude::*,
    tables::{build_consumption_table, build_ranking_table, build_series_table},
};

#[derive(Parser)]
pub struct ConsumptionArgs {
    #[clap(flatten)]
    pub energy: EnergyArgs,

    #[clap(flatten)]
    pub dates: DateRangeArgs,

    /// Energy classes to include.
    #[clap(long, value_delimiter = ',', num_args = 1.., default_value = "elec")]
    pub classes: Vec<EnergyClass>,

    #[clap(long, value_enum, default_value = "all")]
    pub system: System,

    #[clap(long, value_enum, default_value = "day")]
    pub period: Period,

    /// Restrict to these meters and print their consumption in every period.
    #[clap(long, value_delimiter = ',', num_args = 1..)]
    pub meters: Vec<MeterId>,

    /// Number of meters in the ranking.
    #[clap(long, default_value = "15")]
    pub top: usize,
}

impl ConsumptionArgs {
    #[must_use]
    pub fn classes(&self) -> EnumSet<EnergyClass> {
        self.classes.iter().copied().collect()
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub enum System {
    /// Every meter.
    All,

    /// Shared utility system meters from the configuration.
    Utility,

    /// Workshop equipment meters from the configuration, electricity only.
    Workshop,
}

#[derive(Copy, Clone, ValueEnum)]
pub enum Period {
    Day,

    /// Weeks starting on Monday.
    Week,

    Month,
}

impl From<Period> for AggregationPeriod {
    fn from(period: Period) -> Self {
        match period {
            Period::Day => Self::Day,
            Period::Week => Self::Week,
            Period::Month => Self::Month,
        }
    }
}

#[instrument(skip_all)]
pub fn consumption(config: &PlantConfig, args: &ConsumptionArgs) -> Result {
    let samples = read_energy(&args.energy.path)?;
    let scope = match args.system {
        System::All => SystemScope::All,
        System::Utility => SystemScope::Utility(&config.utility_meters),
        System::Workshop => SystemScope::Workshop(&config.workshop_meters),
    };
    let selected: MeterSet = args.meters.iter().cloned().collect();
    let summary = ConsumptionQuery::builder()
        .samples(&samples)
        .range(args.dates.range())
        .period(args.period.into())
        .classes(args.classes())
        .scope(scope)
        .maybe_meters((!selected.is_empty()).then_some(&selected))
        .top_n(args.top)
        .build()
        .summarize();

    let Some(average) = summary.average else {
        warn!("no energy samples within the period");
        return Ok(());
    };
    println!("{}", build_consumption_table(summary.period, &summary.totals));
    if !selected.is_empty() {
        println!("{}", build_series_table(summary.period, &summary.series, config));
    }
    println!("{}", build_ranking_table(&summary.ranking, config));
    info!(total = summary.total, average, "consumption");
    Ok(())
}
