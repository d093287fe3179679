//! Fleet lifecycle state reconstruction.
//!
//! Rebuilds how many days each vehicle spent rented, in maintenance, idle or
//! in an incident, from loosely-typed records exported by several upstream
//! systems:
//! - Dates: resolving day-first, ISO-like and epoch representations
//! - Rentals: merging contract periods into a disjoint cover
//! - Maintenance: pairing shop arrival and departure stages per occurrence
//! - Timeline: walking generic lifecycle events as a small state machine
//! - Lifecycle: rolling everything up per vehicle
//!
//! Every computation is pure: callers pass the records and a reference
//! `now`, and identical inputs give identical results.

pub mod config;
pub mod date;
mod error;
pub mod fields;
pub mod fleet;
pub mod key;
pub mod lifecycle;
pub mod maintenance;
pub mod record;
pub mod rental;
pub mod stage;
pub mod timeline;

pub use config::{EngineConfig, OtherEventPolicy, TimelineConfig};
pub use date::{Timestamp, ToTimestamp, days_between, resolve_date};
pub use error::Error;
pub use fleet::{FleetInput, VehicleInput, VehicleReport, compute_fleet, compute_vehicle, partition};
pub use key::{normalize_key, normalize_plate};
pub use lifecycle::{Ownership, TimelineMetrics, aggregate};
pub use maintenance::{MaintenanceSummary, OccurrenceKey, StagePair, pair_maintenance};
pub use record::{RawRecord, records_from_value};
pub use rental::{Interval, LifetimeWindow, RentalSummary, merge_rentals};
pub use stage::{LifecycleState, StageRole};
pub use timeline::{StateDays, StateSegment, StateTimeline, reconstruct_timeline};
