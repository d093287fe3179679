//! Intervals command: merged rental periods per vehicle.

use std::fmt::Write;

use anyhow::Result;
use fleet_core::{RentalSummary, VehicleReport, compute_fleet};
use serde::Serialize;

use super::util::{filter_plate, format_days, format_timestamp, load_input, resolve_now};
use crate::{Config, ReportArgs};

#[derive(Debug, Serialize)]
struct IntervalsRow<'a> {
    plate: &'a str,
    #[serde(flatten)]
    rental: &'a RentalSummary,
}

pub fn run(args: &ReportArgs, config: &Config) -> Result<()> {
    let input = load_input(args.input.as_deref())?;
    let now = resolve_now(args.now.as_deref(), config)?;
    let reports = filter_plate(
        compute_fleet(&input, now, &config.engine),
        args.plate.as_deref(),
    );

    if args.json {
        let rows: Vec<_> = reports
            .iter()
            .map(|r| IntervalsRow {
                plate: &r.plate,
                rental: &r.rental,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", format_intervals(&reports));
    }
    Ok(())
}

/// Lists each vehicle's merged rental intervals.
pub fn format_intervals(reports: &[VehicleReport]) -> String {
    let mut output = String::new();
    for report in reports {
        let rental = &report.rental;
        writeln!(
            output,
            "{}  {} interval(s), {} rented ({} contract(s) used, {} dropped)",
            report.plate,
            rental.intervals.len(),
            format_days(rental.rented_days),
            rental.contracts_used,
            rental.contracts_dropped
        )
        .unwrap();
        for interval in &rental.intervals {
            writeln!(
                output,
                "  {} -> {}  {}",
                format_timestamp(interval.start),
                format_timestamp(interval.end),
                format_days(interval.days())
            )
            .unwrap();
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::util::parse_input;

    #[test]
    fn test_format_intervals() {
        let input = parse_input(
            r#"{
                "vehicles": [{"Placa": "SGW-0E99"}],
                "contracts": [
                    {"Placa": "SGW-0E99", "DataInicio": "2023-10-09", "DataFim": "2024-11-18"},
                    {"Placa": "SGW-0E99", "DataInicio": "2025-01-15"}
                ]
            }"#,
        )
        .unwrap();
        let now = fleet_core::resolve_date("2026-01-12").unwrap();
        let reports = compute_fleet(&input, now, &fleet_core::EngineConfig::default());

        let expected = "\
SGW0E99  2 interval(s), 768.0d rented (2 contract(s) used, 0 dropped)
  2023-10-09T00:00:00Z -> 2024-11-18T00:00:00Z  406.0d
  2025-01-15T00:00:00Z -> 2026-01-12T00:00:00Z  362.0d
";
        assert_eq!(format_intervals(&reports), expected);
    }
}
