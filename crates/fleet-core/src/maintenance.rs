//! Maintenance-days computation from stage-change events.
//!
//! # Algorithm Summary
//!
//! 1. Group events by occurrence id; events without an id get a synthetic
//!    per-row key built from plate and position
//! 2. Within a group, drop unreadable timestamps and sort by time
//! 3. Pair every arrival with the first later departure in its group, or
//!    with `now` when none follows
//! 4. Sum pair lengths across groups

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::date::{Timestamp, days_between, resolve_date};
use crate::fields::{OCCURRENCE_ID, PLATE, STAGE_LABEL, STAGE_TIMESTAMP, text_of};
use crate::key::normalize_key;
use crate::record::RawRecord;
use crate::stage::{MAINTENANCE_STAGES, StageRole};

/// Identity of a maintenance occurrence.
///
/// Synthetic keys depend on the record's position in the input, so callers
/// must pass rows in a stable order. Being a separate variant, a synthetic
/// key never equals an explicit id with the same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OccurrenceKey {
    Explicit { id: String },
    Synthetic { plate: String, index: usize },
}

impl OccurrenceKey {
    fn for_record(record: &RawRecord, index: usize) -> Self {
        match record.lookup(&OCCURRENCE_ID).and_then(text_of) {
            Some(id) => Self::Explicit { id },
            None => Self::Synthetic {
                plate: normalize_key(record.lookup(&PLATE)),
                index,
            },
        }
    }
}

impl fmt::Display for OccurrenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit { id } => write!(f, "{id}"),
            Self::Synthetic { plate, index } => write!(f, "{plate}#{index}"),
        }
    }
}

/// One arrival matched with its departure, or left open.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePair {
    pub occurrence: OccurrenceKey,
    pub arrival: Timestamp,
    /// `None` for an open pair measured against `now`.
    pub departure: Option<Timestamp>,
    pub days: f64,
}

impl StagePair {
    pub const fn is_open(&self) -> bool {
        self.departure.is_none()
    }
}

/// Result of maintenance pairing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSummary {
    pub maintenance_days: f64,
    /// Pairs ordered by occurrence, then arrival time.
    pub pairs: Vec<StagePair>,
    /// Number of distinct occurrence groups seen.
    pub occurrences: usize,
    /// Events dropped for an unreadable timestamp.
    pub events_dropped: usize,
}

#[derive(Debug, Clone, Copy)]
struct StageEvent {
    at: Timestamp,
    role: StageRole,
}

/// Sort rank used to break timestamp ties deterministically.
const fn role_rank(role: StageRole) -> u8 {
    match role {
        StageRole::Arrival => 0,
        StageRole::Departure => 1,
        StageRole::Neither => 2,
    }
}

/// Computes maintenance days from stage-change records.
///
/// Each arrival is paired independently: two arrivals followed by a single
/// departure both close at that departure. A group holding only departures
/// contributes nothing. Open pairs whose arrival lies after `now` count as
/// zero.
pub fn pair_maintenance(events: &[RawRecord], now: Timestamp) -> MaintenanceSummary {
    let mut groups: BTreeMap<OccurrenceKey, Vec<StageEvent>> = BTreeMap::new();
    let mut dropped = 0;

    for (index, record) in events.iter().enumerate() {
        let key = OccurrenceKey::for_record(record, index);
        let group = groups.entry(key).or_default();

        let Some(at) = record.lookup(&STAGE_TIMESTAMP).and_then(resolve_date) else {
            tracing::trace!(index, "stage event dropped: no readable timestamp");
            dropped += 1;
            continue;
        };
        let label = record
            .lookup(&STAGE_LABEL)
            .and_then(text_of)
            .unwrap_or_default();
        group.push(StageEvent {
            at,
            role: MAINTENANCE_STAGES.classify(&label),
        });
    }

    let occurrences = groups.len();
    let mut pairs = Vec::new();
    for (key, mut group) in groups {
        group.sort_by_key(|e| (e.at, role_rank(e.role)));
        pairs.extend(pair_group(&key, &group, now));
    }

    let maintenance_days = pairs.iter().fold(0.0, |acc, p| acc + p.days);

    tracing::debug!(
        occurrences,
        pairs = pairs.len(),
        open_pairs = pairs.iter().filter(|p| p.is_open()).count(),
        events_dropped = dropped,
        maintenance_days,
        "paired maintenance stages"
    );

    MaintenanceSummary {
        maintenance_days,
        pairs,
        occurrences,
        events_dropped: dropped,
    }
}

/// Pairs arrivals with departures inside one time-sorted group.
fn pair_group(key: &OccurrenceKey, group: &[StageEvent], now: Timestamp) -> Vec<StagePair> {
    group
        .iter()
        .enumerate()
        .filter(|(_, event)| event.role == StageRole::Arrival)
        .map(|(i, arrival)| {
            let departure = group[i + 1..]
                .iter()
                .find(|e| e.role == StageRole::Departure)
                .map(|e| e.at);
            let end = departure.unwrap_or(now);
            StagePair {
                occurrence: key.clone(),
                arrival: arrival.at,
                departure,
                days: days_between(arrival.at, end).max(0.0),
            }
        })
        .collect()
}
