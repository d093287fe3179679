//! Shared utilities for CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use fleet_core::{FleetInput, Timestamp, VehicleReport, normalize_plate, resolve_date};

use crate::Config;

/// Reads a fleet input document from `path`, or stdin when `None`.
pub fn load_input(path: Option<&Path>) -> Result<FleetInput> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    parse_input(&text)
}

/// Parses a fleet input document.
pub fn parse_input(text: &str) -> Result<FleetInput> {
    let value: serde_json::Value = serde_json::from_str(text).context("input is not valid JSON")?;
    let input = FleetInput::from_value(&value).context("invalid fleet input")?;
    tracing::debug!(
        vehicles = input.vehicles.len(),
        contracts = input.contracts.len(),
        maintenance = input.maintenance.len(),
        events = input.events.len(),
        "loaded fleet input"
    );
    Ok(input)
}

/// Picks the reference instant: `--now`, then config, then the clock.
pub fn resolve_now(arg: Option<&str>, config: &Config) -> Result<Timestamp> {
    match arg.or(config.now.as_deref()) {
        Some(raw) => resolve_date(raw).with_context(|| format!("invalid reference time: {raw}")),
        None => Ok(Utc::now()),
    }
}

/// Keeps only the report for `plate`, compared by normalized key.
pub fn filter_plate(reports: Vec<VehicleReport>, plate: Option<&str>) -> Vec<VehicleReport> {
    match plate.map(normalize_plate) {
        Some(wanted) => reports.into_iter().filter(|r| r.plate == wanted).collect(),
        None => reports,
    }
}

/// Formats a timestamp as RFC 3339 with second precision.
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Formats fractional days with one decimal.
pub fn format_days(days: f64) -> String {
    format!("{days:.1}d")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_input_reports_shape_errors() {
        let err = parse_input(r#"{"contracts": {}}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid fleet input");
        assert_eq!(
            err.root_cause().to_string(),
            "contracts must be an array of records, got object"
        );
    }

    #[test]
    fn parse_input_rejects_invalid_json() {
        let err = parse_input("{not json").unwrap_err();
        assert_eq!(err.to_string(), "input is not valid JSON");
    }

    #[test]
    fn resolve_now_prefers_argument() {
        let config = Config {
            now: Some("2025-01-01".to_string()),
            ..Config::default()
        };
        let now = resolve_now(Some("12/01/2026"), &config).unwrap();
        assert_eq!(now, Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap());

        let now = resolve_now(None, &config).unwrap();
        assert_eq!(now, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn resolve_now_rejects_garbage() {
        let err = resolve_now(Some("tomorrow-ish"), &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "invalid reference time: tomorrow-ish");
    }

    #[test]
    fn formatting() {
        let ts = Utc.with_ymd_and_hms(2025, 12, 3, 10, 18, 0).unwrap();
        assert_eq!(format_timestamp(ts), "2025-12-03T10:18:00Z");
        assert_eq!(format_days(1.010_416), "1.0d");
        assert_eq!(format_days(406.0), "406.0d");
    }
}
