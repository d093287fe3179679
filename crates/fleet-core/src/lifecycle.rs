//! Per-vehicle roll-up of rental, maintenance and lifecycle results.

use serde::Serialize;

use crate::date::{Timestamp, days_between, resolve_date};
use crate::fields::{PURCHASE_DATE, SALE_DATE};
use crate::maintenance::MaintenanceSummary;
use crate::record::RawRecord;
use crate::rental::{LifetimeWindow, RentalSummary};
use crate::timeline::StateTimeline;

/// Ownership dates of a vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ownership {
    pub purchased_at: Option<Timestamp>,
    pub sold_at: Option<Timestamp>,
}

impl Ownership {
    /// Reads purchase and sale dates from a vehicle record.
    pub fn from_record(record: &RawRecord) -> Self {
        Self {
            purchased_at: record.lookup(&PURCHASE_DATE).and_then(resolve_date),
            sold_at: record.lookup(&SALE_DATE).and_then(resolve_date),
        }
    }

    /// Purchase to sale, or to `now` while the vehicle is still owned.
    pub fn window(&self, now: Timestamp) -> LifetimeWindow {
        LifetimeWindow::new(self.purchased_at, Some(self.sold_at.unwrap_or(now)))
    }

    /// Days owned; zero without a purchase date.
    pub fn life_days(&self, now: Timestamp) -> f64 {
        self.purchased_at.map_or(0.0, |purchased| {
            days_between(purchased, self.sold_at.unwrap_or(now)).max(0.0)
        })
    }
}

/// Final per-vehicle day totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMetrics {
    pub total_life_days: f64,
    pub rented_days: f64,
    pub maintenance_days: f64,
    pub idle_days: f64,
    pub sinistro_days: f64,
}

/// Combines already-computed results into [`TimelineMetrics`].
///
/// `idle_days` is the part of the vehicle's life not covered by rentals and
/// is never negative. `sinistro_days` is zero without a lifecycle stream.
pub fn aggregate(
    ownership: &Ownership,
    now: Timestamp,
    rental: &RentalSummary,
    maintenance: &MaintenanceSummary,
    timeline: Option<&StateTimeline>,
) -> TimelineMetrics {
    let total_life_days = ownership.life_days(now);
    TimelineMetrics {
        total_life_days,
        rented_days: rental.rented_days,
        maintenance_days: maintenance.maintenance_days,
        idle_days: (total_life_days - rental.rented_days).max(0.0),
        sinistro_days: timeline.map_or(0.0, |t| t.days.sinistro),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::StateDays;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .expect("valid test timestamp")
    }

    fn assert_days(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected} days, got {actual}"
        );
    }

    fn rental(days: f64) -> RentalSummary {
        RentalSummary {
            rented_days: days,
            ..RentalSummary::default()
        }
    }

    #[test]
    fn idle_is_life_minus_rented() {
        let ownership = Ownership {
            purchased_at: Some(day(2024, 1, 1)),
            sold_at: None,
        };
        let metrics = aggregate(
            &ownership,
            day(2024, 4, 10),
            &rental(70.0),
            &MaintenanceSummary::default(),
            None,
        );
        assert_days(metrics.total_life_days, 100.0);
        assert_days(metrics.idle_days, 30.0);
        assert_days(metrics.sinistro_days, 0.0);
    }

    #[test]
    fn sale_date_ends_life() {
        let ownership = Ownership {
            purchased_at: Some(day(2024, 1, 1)),
            sold_at: Some(day(2024, 1, 31)),
        };
        let metrics = aggregate(
            &ownership,
            day(2025, 1, 1),
            &rental(0.0),
            &MaintenanceSummary::default(),
            None,
        );
        assert_days(metrics.total_life_days, 30.0);
        assert_days(metrics.idle_days, 30.0);
    }

    #[test]
    fn idle_never_negative() {
        let metrics = aggregate(
            &Ownership::default(),
            day(2025, 1, 1),
            &rental(45.0),
            &MaintenanceSummary::default(),
            None,
        );
        assert_days(metrics.total_life_days, 0.0);
        assert_days(metrics.idle_days, 0.0);

        for rented in [0.0, 10.0, 99.9, 100.0, 250.0] {
            let ownership = Ownership {
                purchased_at: Some(day(2024, 1, 1)),
                sold_at: None,
            };
            let m = aggregate(
                &ownership,
                day(2024, 4, 10),
                &rental(rented),
                &MaintenanceSummary::default(),
                None,
            );
            assert!(m.idle_days >= 0.0, "negative idle for rented={rented}");
        }
    }

    #[test]
    fn passes_through_maintenance_and_sinistro() {
        let maintenance = MaintenanceSummary {
            maintenance_days: 3.5,
            ..MaintenanceSummary::default()
        };
        let timeline = StateTimeline {
            days: StateDays {
                sinistro: 4.0,
                ..StateDays::default()
            },
            segments: Vec::new(),
        };
        let metrics = aggregate(
            &Ownership::default(),
            day(2025, 1, 1),
            &rental(0.0),
            &maintenance,
            Some(&timeline),
        );
        assert_days(metrics.maintenance_days, 3.5);
        assert_days(metrics.sinistro_days, 4.0);
    }

    #[test]
    fn ownership_from_record() {
        let record: RawRecord = serde_json::from_value(json!({
            "Placa": "ABC1234",
            "DataAquisicao": "15/03/2022",
            "DataVenda": ""
        }))
        .unwrap();
        let ownership = Ownership::from_record(&record);
        assert_eq!(ownership.purchased_at, Some(day(2022, 3, 15)));
        assert_eq!(ownership.sold_at, None);

        let window = ownership.window(day(2025, 1, 1));
        assert_eq!(window.start, Some(day(2022, 3, 15)));
        assert_eq!(window.end, Some(day(2025, 1, 1)));
    }
}
