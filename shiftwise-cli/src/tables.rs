use std::{collections::BTreeSet, iter};

use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;
use shiftwise_engine::{
    AggregationPeriod, DayAnalysis, EnergyClass, MeterDeltas, MeterId, SavingsReport, SavingsRow,
};
use shiftwise_quantities::{energy::KilowattHours, time::Hours};

use crate::config::PlantConfig;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn right(header: &str) -> Cell {
    Cell::new(header).set_alignment(CellAlignment::Right)
}

#[must_use]
pub fn build_savings_table(rows: &[SavingsRow]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Date"),
        right("Original"),
        right("Optimized"),
        right("Ratio"),
        right("Public\nenergy"),
        right("Total\nenergy"),
        right("Public\nshare"),
        right("Saving").add_attribute(Attribute::Bold),
        right("Optimized\nenergy"),
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.date),
            Cell::new(row.original).set_alignment(CellAlignment::Right),
            Cell::new(row.optimized).set_alignment(CellAlignment::Right),
            Cell::new(row.ratio).set_alignment(CellAlignment::Right),
            Cell::new(row.public_energy).set_alignment(CellAlignment::Right),
            Cell::new(row.total_energy).set_alignment(CellAlignment::Right),
            Cell::new(row.public_share).set_alignment(CellAlignment::Right),
            Cell::new(row.saving)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold)
                .fg(if row.saving > KilowattHours::ZERO { Color::Green } else { Color::Reset }),
            Cell::new(row.optimized_energy).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_totals_table(report: &SavingsReport) -> Table {
    let mut table = new_table();
    table
        .set_header(vec![
            Cell::new("Days"),
            right("Original"),
            right("Optimized"),
            right("Ratio"),
            right("Saving").add_attribute(Attribute::Bold),
        ])
        .add_row(vec![
            Cell::new(report.rows.len()),
            Cell::new(report.total_original()).set_alignment(CellAlignment::Right),
            Cell::new(report.total_optimized()).set_alignment(CellAlignment::Right),
            Cell::new(report.overall_ratio()).set_alignment(CellAlignment::Right),
            Cell::new(report.total_saving)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
        ]);
    table
}

/// Equipment busy time of a single day, the bottleneck first.
#[must_use]
pub fn build_loads_table(analysis: &DayAnalysis) -> Table {
    let mut table = new_table();
    table.set_header(vec![Cell::new("Equipment"), right("Busy")]);
    let bottleneck = analysis.loads.bottleneck_hours();
    for (equipment, busy) in analysis.loads.descending() {
        table.add_row(vec![
            Cell::new(equipment),
            Cell::new(busy)
                .set_alignment(CellAlignment::Right)
                .fg(if busy == bottleneck && busy > Hours::ZERO {
                    Color::Red
                } else {
                    Color::Reset
                }),
        ]);
    }
    for conflict in &analysis.conflicts {
        table.add_row(vec![
            Cell::new(format!("{} (overlap)", conflict.equipment)).fg(Color::Yellow),
            Cell::new(format!(
                "{} – {} / {} – {}",
                conflict.first.start.time(),
                conflict.first.end.time(),
                conflict.second.start.time(),
                conflict.second.end.time(),
            ))
            .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

const fn period_header(period: AggregationPeriod) -> &'static str {
    match period {
        AggregationPeriod::Day => "Date",
        AggregationPeriod::Week => "Week",
        AggregationPeriod::Month => "Month",
    }
}

#[must_use]
pub fn build_consumption_table(period: AggregationPeriod, totals: &[(NaiveDate, f64)]) -> Table {
    let mut table = new_table();
    table.set_header(vec![Cell::new(period_header(period)), right("Consumption")]);
    for (start, consumption) in totals {
        table.add_row(vec![
            Cell::new(start),
            Cell::new(format!("{consumption:.2}")).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// One row per period, one column per meter.
#[must_use]
pub fn build_series_table(
    period: AggregationPeriod,
    series: &[(NaiveDate, MeterDeltas)],
    config: &PlantConfig,
) -> Table {
    let meters: BTreeSet<&MeterId> =
        series.iter().flat_map(|(_, deltas)| deltas.iter().map(|(id, _)| id)).collect();
    let mut table = new_table();
    table.set_header(
        iter::once(Cell::new(period_header(period)))
            .chain(meters.iter().map(|id| right(config.describe(id))))
            .collect_vec(),
    );
    for (start, deltas) in series {
        table.add_row(
            iter::once(Cell::new(start))
                .chain(meters.iter().map(|id| {
                    deltas
                        .get(id)
                        .map_or_else(|| Cell::new("n/a"), |delta| Cell::new(format!("{delta:.2}")))
                        .set_alignment(CellAlignment::Right)
                }))
                .collect_vec(),
        );
    }
    table
}

#[must_use]
pub fn build_ranking_table(ranking: &[(MeterId, f64)], config: &PlantConfig) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        right("#"),
        Cell::new("Meter"),
        Cell::new("Description"),
        right("Unit"),
        right("Consumption"),
    ]);
    for (rank, (meter, consumption)) in ranking.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(meter),
            Cell::new(config.describe(meter)),
            Cell::new(meter.class().map_or("", EnergyClass::unit))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{consumption:.2}")).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
