#![allow(clippy::doc_markdown)]

mod cli;
mod config;
mod input;
mod prelude;
mod tables;

use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, Command, consumption, estimate},
    config::PlantConfig,
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let config = PlantConfig::read(&args.config)?;

    match args.command {
        Command::Estimate(args) => estimate(&config, &args)?,
        Command::Consumption(args) => consumption(&config, &args)?,
    }

    info!("done!");
    Ok(())
}
