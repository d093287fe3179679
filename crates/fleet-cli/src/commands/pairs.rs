//! Pairs command: maintenance arrival/departure pairs per vehicle.

use std::fmt::Write;

use anyhow::Result;
use fleet_core::{MaintenanceSummary, VehicleReport, compute_fleet};
use serde::Serialize;

use super::util::{filter_plate, format_days, format_timestamp, load_input, resolve_now};
use crate::{Config, ReportArgs};

#[derive(Debug, Serialize)]
struct PairsRow<'a> {
    plate: &'a str,
    #[serde(flatten)]
    maintenance: &'a MaintenanceSummary,
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
            .map(|r| PairsRow {
                plate: &r.plate,
                maintenance: &r.maintenance,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", format_pairs(&reports));
    }
    Ok(())
}

/// Lists each vehicle's maintenance pairs; open pairs are marked.
pub fn format_pairs(reports: &[VehicleReport]) -> String {
    let mut output = String::new();
    for report in reports {
        let maintenance = &report.maintenance;
        writeln!(
            output,
            "{}  {} pair(s) over {} occurrence(s), {} in maintenance",
            report.plate,
            maintenance.pairs.len(),
            maintenance.occurrences,
            format_days(maintenance.maintenance_days)
        )
        .unwrap();
        for pair in &maintenance.pairs {
            let departure = pair
                .departure
                .map_or_else(|| "(open)".to_string(), format_timestamp);
            writeln!(
                output,
                "  [{}] {} -> {}  {}",
                pair.occurrence,
                format_timestamp(pair.arrival),
                departure,
                format_days(pair.days)
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
    fn test_format_pairs_marks_open_pairs() {
        let input = parse_input(
            r#"{
                "vehicles": [{"Placa": "SGW0E99"}],
                "maintenance": [
                    {"Placa": "SGW0E99", "Ocorrencia": "OC-1", "Etapa": "Aguardando Chegada", "DataEtapa": "2025-12-03T10:18:00"},
                    {"Placa": "SGW0E99", "Ocorrencia": "OC-1", "Etapa": "Aguardando Retirada do Veículo", "DataEtapa": "2025-12-04T10:33:00"},
                    {"Placa": "SGW0E99", "Etapa": "Recebido", "DataEtapa": "2026-01-10"}
                ]
            }"#,
        )
        .unwrap();
        let now = fleet_core::resolve_date("2026-01-12").unwrap();
        let reports = compute_fleet(&input, now, &fleet_core::EngineConfig::default());

        let expected = "\
SGW0E99  2 pair(s) over 2 occurrence(s), 3.0d in maintenance
  [OC-1] 2025-12-03T10:18:00Z -> 2025-12-04T10:33:00Z  1.0d
  [SGW0E99#2] 2026-01-10T00:00:00Z -> (open)  2.0d
";
        assert_eq!(format_pairs(&reports), expected);
    }
}
