//! Date resolution for heterogeneous source values.
//!
//! Every raw date field goes through [`resolve_date`]. Sources mix day-first
//! Brazilian dates (`03/12/2025 10:18`), ISO-like dates (`2025-12-03T10:18:00`),
//! epoch milliseconds and assorted other layouts; the resolver settles the
//! ambiguity in a fixed order and returns `None` for anything it cannot read.
//!
//! Textual dates carry no usable zone in the source systems, so the wall-clock
//! value is taken as UTC. Trailing zone designators on ISO strings are ignored.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::{Captures, Regex};
use serde_json::Value;

/// Canonical instant used throughout the engine.
pub type Timestamp = DateTime<Utc>;

const MS_PER_DAY: f64 = 86_400_000.0;

/// `DD/MM/YYYY[ HH:MM[:SS]]`, tried first.
static DAY_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})(?:[ T]+(\d{1,2}):(\d{2})(?::(\d{2}))?)?(?:$|\D)")
        .unwrap()
});

/// `YYYY-MM-DD[( |T)HH:MM[:SS[.fff]]]`, tried second.
static DASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T]+(\d{1,2}):(\d{2})(?::(\d{2})(?:[.,](\d{1,9}))?)?)?(?:$|\D)",
    )
    .unwrap()
});

/// Date-time layouts accepted by the generic fallback.
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
];

/// Date-only layouts accepted by the generic fallback.
const FALLBACK_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y"];

/// A value that may describe an instant.
pub trait ToTimestamp {
    /// Resolves the value, or `None` if it is empty or unreadable.
    fn to_timestamp(&self) -> Option<Timestamp>;
}

impl ToTimestamp for str {
    fn to_timestamp(&self) -> Option<Timestamp> {
        parse_date_text(self)
    }
}

impl ToTimestamp for String {
    fn to_timestamp(&self) -> Option<Timestamp> {
        parse_date_text(self)
    }
}

impl ToTimestamp for Value {
    fn to_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::String(s) => parse_date_text(s),
            Self::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(float_millis))
                .and_then(DateTime::from_timestamp_millis),
            Self::Null | Self::Bool(_) | Self::Array(_) | Self::Object(_) => None,
        }
    }
}

impl ToTimestamp for Timestamp {
    fn to_timestamp(&self) -> Option<Timestamp> {
        Some(*self)
    }
}

impl ToTimestamp for NaiveDateTime {
    fn to_timestamp(&self) -> Option<Timestamp> {
        Some(self.and_utc())
    }
}

impl ToTimestamp for NaiveDate {
    fn to_timestamp(&self) -> Option<Timestamp> {
        Some(self.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl<T: ToTimestamp + ?Sized> ToTimestamp for &T {
    fn to_timestamp(&self) -> Option<Timestamp> {
        (**self).to_timestamp()
    }
}

impl<T: ToTimestamp> ToTimestamp for Option<T> {
    fn to_timestamp(&self) -> Option<Timestamp> {
        self.as_ref().and_then(ToTimestamp::to_timestamp)
    }
}

/// Resolves any supported date representation to a [`Timestamp`].
///
/// Resolution order for text:
/// 1. day-first `DD/MM/YYYY[ HH:MM[:SS]]`
/// 2. dash `YYYY-MM-DD[ HH:MM[:SS]]` or `YYYY-MM-DDTHH:MM[:SS]`
/// 3. a generic parse (RFC 3339, RFC 2822, a few common layouts)
///
/// Missing time parts default to midnight. A pattern that matches but names
/// an impossible date (e.g. `31/02/2024`) resolves to `None`. Numbers are
/// epoch milliseconds. Already-resolved timestamps are returned unchanged.
pub fn resolve_date<T: ToTimestamp + ?Sized>(value: &T) -> Option<Timestamp> {
    value.to_timestamp()
}

/// Length of `[start, end)` in fractional days. Negative if `end < start`.
#[expect(
    clippy::cast_precision_loss,
    reason = "millisecond spans of vehicle lifetimes fit well within f64 precision"
)]
pub fn days_between(start: Timestamp, end: Timestamp) -> f64 {
    (end - start).num_milliseconds() as f64 / MS_PER_DAY
}

fn parse_date_text(raw: &str) -> Option<Timestamp> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = DAY_FIRST_RE.captures(text) {
        return from_groups(&caps, [3, 2, 1], None);
    }

    if let Some(caps) = DASH_RE.captures(text) {
        return from_groups(&caps, [1, 2, 3], Some(7));
    }

    parse_generic(text)
}

/// Builds a timestamp from captured groups.
///
/// `ymd` gives the group indices of year, month and day; the time groups
/// always follow the date at indices 4 to 6.
fn from_groups(caps: &Captures<'_>, ymd: [usize; 3], fraction: Option<usize>) -> Option<Timestamp> {
    let number = |idx: usize| -> Option<u32> {
        caps.get(idx).map_or(Some(0), |m| m.as_str().parse().ok())
    };

    let year: i32 = caps.get(ymd[0])?.as_str().parse().ok()?;
    let month = number(ymd[1])?;
    let day = number(ymd[2])?;
    let hour = number(4)?;
    let minute = number(5)?;
    let second = number(6)?;
    let nanos = fraction
        .and_then(|idx| caps.get(idx))
        .map_or(Some(0), |m| fraction_nanos(m.as_str()))?;

    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_nano_opt(hour, minute, second, nanos)
        .map(|dt| dt.and_utc())
}

/// Converts a fractional-second digit string to nanoseconds.
fn fraction_nanos(digits: &str) -> Option<u32> {
    let padded = format!("{digits:0<9}");
    padded.get(..9)?.parse().ok()
}

fn parse_generic(text: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            FALLBACK_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
        .map(|dt| dt.and_utc())
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "bounded by the finite and range checks"
)]
fn float_millis(value: f64) -> Option<i64> {
    let rounded = value.round();
    (rounded.is_finite() && rounded.abs() < 9.0e18).then_some(rounded as i64)
}
