//! Reading the input files into engine records.
//!
//! Malformed individual records are reported and skipped; only unreadable files are errors.

use std::{fs, io::Read, path::Path};

use serde::Deserialize;
use shiftwise_engine::{EnergySample, EnergySamples, EquipmentRegistry, ProcessBook, RawProcess};

use crate::prelude::*;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProcessFile {
    #[serde(default, rename = "process")]
    processes: Vec<RawProcess>,
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_processes(path: &Path, registry: &EquipmentRegistry) -> Result<ProcessBook> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read the processes from `{}`", path.display()))?;
    parse_processes(&text, registry)
        .with_context(|| format!("invalid process file `{}`", path.display()))
}

pub fn parse_processes(text: &str, registry: &EquipmentRegistry) -> Result<ProcessBook> {
    let file: ProcessFile = toml::from_str(text)?;
    let mut book = ProcessBook::default();
    for (index, raw) in file.processes.into_iter().enumerate() {
        let number = index + 1;
        match raw.validate(registry) {
            Ok(validated) => {
                for issue in &validated.issues {
                    warn!(process = number, %issue, "questionable process field");
                }
                book.push(validated.value);
            }
            Err(error) => {
                warn!(process = number, %error, "skipping the process");
            }
        }
    }
    info!(n_processes = book.len(), "loaded the processes");
    Ok(book)
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_energy(path: &Path) -> Result<EnergySamples> {
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open the energy data `{}`", path.display()))?;
    parse_energy(file).with_context(|| format!("invalid energy data in `{}`", path.display()))
}

/// Parse the CSV whose first column is the timestamp and the others are meter readings.
pub fn parse_energy(reader: impl Read) -> Result<EnergySamples> {
    let mut reader =
        csv::ReaderBuilder::new().flexible(true).trim(csv::Trim::All).from_reader(reader);
    let meters = reader.headers()?.iter().skip(1).map(str::to_owned).collect::<Vec<_>>();
    ensure!(!meters.is_empty(), "the energy data has no meter columns");

    let mut samples = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2;
        let record = record.with_context(|| format!("malformed CSV at line {line}"))?;
        let mut cells = record.iter();
        let timestamp = cells.next().unwrap_or_default();
        let row = meters.iter().map(String::as_str).zip(cells);
        match EnergySample::try_from_row(timestamp, row) {
            Ok(validated) => {
                for issue in &validated.issues {
                    warn!(line, %issue, "questionable reading");
                }
                samples.push(validated.value);
            }
            Err(error) => {
                warn!(line, %error, "skipping the row");
            }
        }
    }
    info!(n_samples = samples.len(), n_meters = meters.len(), "loaded the energy data");
    Ok(samples.into_iter().collect())
}
