use std::path::PathBuf;

use clap::Parser;
use shiftwise_engine::Estimator;

use crate::{
    cli::{DateRangeArgs, EnergyArgs},
    config::PlantConfig,
    input::{read_energy, read_processes},
    prelude::*,
    tables::{build_loads_table, build_savings_table, build_totals_table},
};

#[derive(Parser)]
pub struct EstimateArgs {
    /// TOML file with the `[[process]]` records.
    #[clap(long = "processes", env = "SHIFTWISE_PROCESSES_PATH")]
    pub processes_path: PathBuf,

    #[clap(flatten)]
    pub energy: EnergyArgs,

    #[clap(flatten)]
    pub dates: DateRangeArgs,

    /// Also print the per-equipment busy time of every reported day.
    #[clap(long)]
    pub loads: bool,
}

#[instrument(skip_all)]
pub fn estimate(config: &PlantConfig, args: &EstimateArgs) -> Result {
    let range = args.dates.range();
    let processes = read_processes(&args.processes_path, &config.equipment)?.within(range);
    let samples = read_energy(&args.energy.path)?.within(range);

    let report = Estimator::builder()
        .processes(&processes)
        .samples(&samples)
        .utility_meters(&config.utility_meters)
        .build()
        .estimate();

    if report.is_empty() {
        warn!("no day has both usable processes and utility meter data");
        return Ok(());
    }

    println!("{}", build_savings_table(&report.rows));
    println!("{}", build_totals_table(&report));
    if args.loads {
        for analysis in &report.analyses {
            println!("{}", analysis.date);
            println!("{}", build_loads_table(analysis));
        }
    }
    Ok(())
}
