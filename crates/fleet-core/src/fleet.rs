//! Whole-fleet batch computation.
//!
//! Splits each record collection by normalized plate and runs the
//! per-vehicle pipeline on every vehicle in parallel. Vehicles share no
//! state, so results do not depend on scheduling; reports come back sorted
//! by plate.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::date::Timestamp;
use crate::error::{Error, json_type_name};
use crate::fields::PLATE;
use crate::key::normalize_key;
use crate::lifecycle::{Ownership, TimelineMetrics, aggregate};
use crate::maintenance::{MaintenanceSummary, pair_maintenance};
use crate::record::{RawRecord, records_from_value};
use crate::rental::{RentalSummary, merge_rentals};
use crate::timeline::{StateTimeline, reconstruct_timeline};

/// All record collections for a fleet, as supplied by upstream sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetInput {
    pub vehicles: Vec<RawRecord>,
    pub contracts: Vec<RawRecord>,
    pub maintenance: Vec<RawRecord>,
    pub events: Vec<RawRecord>,
}

impl FleetInput {
    /// Reads a `{"vehicles": [...], "contracts": [...], ...}` document.
    ///
    /// Missing collections are empty; present ones must be arrays of objects.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let Value::Object(doc) = value else {
            return Err(Error::NotADocument {
                found: json_type_name(value),
            });
        };
        let collection = |what: &'static str| {
            doc.get(what)
                .map_or_else(|| Ok(Vec::new()), |v| records_from_value(v, what))
        };
        Ok(Self {
            vehicles: collection("vehicles")?,
            contracts: collection("contracts")?,
            maintenance: collection("maintenance")?,
            events: collection("events")?,
        })
    }
}

/// Records belonging to a single vehicle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleInput {
    /// Normalized plate.
    pub plate: String,
    pub ownership: Ownership,
    pub contracts: Vec<RawRecord>,
    pub maintenance: Vec<RawRecord>,
    pub events: Vec<RawRecord>,
}

/// Everything computed for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleReport {
    pub plate: String,
    pub ownership: Ownership,
    pub metrics: TimelineMetrics,
    pub rental: RentalSummary,
    pub maintenance: MaintenanceSummary,
    /// `None` when the vehicle has no lifecycle events.
    pub timeline: Option<StateTimeline>,
}

/// Runs rental, maintenance and lifecycle reconstruction for one vehicle.
pub fn compute_vehicle(
    vehicle: &VehicleInput,
    now: Timestamp,
    config: &EngineConfig,
) -> VehicleReport {
    let window = vehicle.ownership.window(now);
    let rental = merge_rentals(&vehicle.contracts, now, Some(&window));
    let maintenance = pair_maintenance(&vehicle.maintenance, now);
    let timeline = (!vehicle.events.is_empty())
        .then(|| reconstruct_timeline(&vehicle.events, now, &config.timeline));
    let metrics = aggregate(
        &vehicle.ownership,
        now,
        &rental,
        &maintenance,
        timeline.as_ref(),
    );

    tracing::debug!(
        plate = %vehicle.plate,
        total_life_days = metrics.total_life_days,
        rented_days = metrics.rented_days,
        maintenance_days = metrics.maintenance_days,
        idle_days = metrics.idle_days,
        "computed vehicle metrics"
    );

    VehicleReport {
        plate: vehicle.plate.clone(),
        ownership: vehicle.ownership,
        metrics,
        rental,
        maintenance,
        timeline,
    }
}

/// Groups every collection by vehicle plate.
///
/// Vehicles are keyed by their normalized plate; the first row wins when a
/// plate repeats. Records without a plate, or for a plate missing from
/// `vehicles`, are skipped. Record order within a vehicle follows input
/// order.
pub fn partition(input: &FleetInput) -> Vec<VehicleInput> {
    let mut vehicles: BTreeMap<String, VehicleInput> = BTreeMap::new();

    for (index, record) in input.vehicles.iter().enumerate() {
        let plate = normalize_key(record.lookup(&PLATE));
        if plate.is_empty() {
            tracing::debug!(index, "vehicle skipped: no plate");
            continue;
        }
        if vehicles.contains_key(&plate) {
            tracing::warn!(%plate, index, "duplicate vehicle row ignored");
            continue;
        }
        vehicles.insert(
            plate.clone(),
            VehicleInput {
                plate,
                ownership: Ownership::from_record(record),
                ..VehicleInput::default()
            },
        );
    }

    assign(&mut vehicles, &input.contracts, "contracts", |v| {
        &mut v.contracts
    });
    assign(&mut vehicles, &input.maintenance, "maintenance", |v| {
        &mut v.maintenance
    });
    assign(&mut vehicles, &input.events, "events", |v| &mut v.events);

    vehicles.into_values().collect()
}

fn assign(
    vehicles: &mut BTreeMap<String, VehicleInput>,
    records: &[RawRecord],
    what: &'static str,
    target: impl Fn(&mut VehicleInput) -> &mut Vec<RawRecord>,
) {
    let mut without_plate = 0_usize;
    let mut unknown_plate = 0_usize;

    for record in records {
        let plate = normalize_key(record.lookup(&PLATE));
        if plate.is_empty() {
            without_plate += 1;
            continue;
        }
        match vehicles.get_mut(&plate) {
            Some(vehicle) => target(vehicle).push(record.clone()),
            None => unknown_plate += 1,
        }
    }

    if without_plate > 0 {
        tracing::debug!(collection = what, count = without_plate, "records without plate skipped");
    }
    if unknown_plate > 0 {
        tracing::warn!(collection = what, count = unknown_plate, "records for unknown vehicles skipped");
    }
}

/// Computes reports for every vehicle in the fleet, sorted by plate.
pub fn compute_fleet(input: &FleetInput, now: Timestamp, config: &EngineConfig) -> Vec<VehicleReport> {
    let vehicles = partition(input);
    tracing::debug!(vehicles = vehicles.len(), "computing fleet");
    vehicles
        .par_iter()
        .map(|vehicle| compute_vehicle(vehicle, now, config))
        .collect()
}
