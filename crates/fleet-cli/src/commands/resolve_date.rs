//! Resolve-date command: shows how raw date values are interpreted.

use fleet_core::resolve_date;
use serde_json::Value;

use super::util::format_timestamp;

pub fn run(values: &[String]) {
    for value in values {
        println!("{}", describe(value));
    }
}

/// One line per value: the raw text and its resolved instant.
///
/// Bare numbers are read as epoch milliseconds, like numeric source fields.
pub fn describe(raw: &str) -> String {
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(number @ Value::Number(_)) => number,
        _ => Value::String(raw.to_string()),
    };
    let resolved = resolve_date(&value).map_or_else(|| "(unreadable)".to_string(), format_timestamp);
    format!("{raw:?} -> {resolved}")
}
