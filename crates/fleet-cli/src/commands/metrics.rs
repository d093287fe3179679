//! Metrics command: per-vehicle day totals.

use std::fmt::Write;

use anyhow::Result;
use fleet_core::{TimelineMetrics, VehicleReport, compute_fleet};
use serde::Serialize;

use super::util::{filter_plate, load_input, resolve_now};
use crate::{Config, ReportArgs};

/// JSON row: plate plus the flattened metrics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsRow<'a> {
    plate: &'a str,
    #[serde(flatten)]
    metrics: &'a TimelineMetrics,
}

pub fn run(args: &ReportArgs, config: &Config) -> Result<()> {
    let input = load_input(args.input.as_deref())?;
    let now = resolve_now(args.now.as_deref(), config)?;
    let reports = filter_plate(
        compute_fleet(&input, now, &config.engine),
        args.plate.as_deref(),
    );

    if args.json {
        println!("{}", format_json(&reports)?);
    } else {
        print!("{}", format_table(&reports));
    }
    Ok(())
}

/// Formats reports as a JSON array of metric rows.
pub fn format_json(reports: &[VehicleReport]) -> Result<String> {
    let rows: Vec<_> = reports
        .iter()
        .map(|r| MetricsRow {
            plate: &r.plate,
            metrics: &r.metrics,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Formats reports as a fixed-width table.
pub fn format_table(reports: &[VehicleReport]) -> String {
    let mut output = String::new();
    if reports.is_empty() {
        writeln!(output, "No vehicles found.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<10}{:>10}{:>10}{:>10}{:>10}{:>10}",
        "PLATE", "LIFE", "RENTED", "MAINT", "IDLE", "SINISTRO"
    )
    .unwrap();
    for report in reports {
        writeln!(output, "{}", format_row(&report.plate, &report.metrics)).unwrap();
    }
    output
}

fn format_row(plate: &str, m: &TimelineMetrics) -> String {
    format!(
        "{plate:<10}{:>10.1}{:>10.1}{:>10.1}{:>10.1}{:>10.1}",
        m.total_life_days, m.rented_days, m.maintenance_days, m.idle_days, m.sinistro_days
    )
}
