//! Rental-days computation.
//!
//! # Algorithm Summary
//!
//! 1. Resolve each contract's start and end through the field chains
//! 2. Open-ended contracts run until `now`
//! 3. Clip to the vehicle's lifetime window and drop empty intervals
//! 4. Sort by start and merge touching or overlapping intervals
//! 5. Sum the merged lengths, so overlapping contracts are counted once

use serde::Serialize;

use crate::date::{Timestamp, days_between, resolve_date};
use crate::fields::{CONTRACT_END, CONTRACT_START};
use crate::record::RawRecord;

/// A half-open `[start, end)` span with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Interval {
    /// Builds an interval, or `None` when it would be empty or inverted.
    pub fn new(start: Timestamp, end: Timestamp) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    /// Length in fractional days.
    pub fn days(&self) -> f64 {
        days_between(self.start, self.end)
    }
}

/// The span during which a vehicle belonged to the fleet.
///
/// Missing bounds do not clip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeWindow {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl LifetimeWindow {
    pub const fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        Self { start, end }
    }

    /// Clips `[start, end)` to the window. `None` if nothing remains.
    pub fn clip(&self, start: Timestamp, end: Timestamp) -> Option<Interval> {
        let start = self.start.map_or(start, |bound| start.max(bound));
        let end = self.end.map_or(end, |bound| end.min(bound));
        Interval::new(start, end)
    }
}

/// Result of the rental merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalSummary {
    /// Length of the union of all rental intervals, in days.
    pub rented_days: f64,

    /// Merged, sorted, pairwise disjoint intervals.
    pub intervals: Vec<Interval>,

    /// Contracts that contributed an interval.
    pub contracts_used: usize,

    /// Contracts without a readable start, or empty after clipping.
    pub contracts_dropped: usize,
}

/// Computes rented days from contract records.
///
/// Contracts with no resolvable end are treated as ongoing until `now`.
pub fn merge_rentals(
    contracts: &[RawRecord],
    now: Timestamp,
    window: Option<&LifetimeWindow>,
) -> RentalSummary {
    let window = window.copied().unwrap_or_default();
    let mut raw_intervals = Vec::with_capacity(contracts.len());
    let mut dropped = 0;

    for (index, contract) in contracts.iter().enumerate() {
        let Some(start) = contract.lookup(&CONTRACT_START).and_then(resolve_date) else {
            tracing::trace!(index, "contract dropped: no readable start date");
            dropped += 1;
            continue;
        };
        let end = contract
            .lookup(&CONTRACT_END)
            .and_then(resolve_date)
            .unwrap_or(now);

        match window.clip(start, end) {
            Some(interval) => raw_intervals.push(interval),
            None => {
                tracing::trace!(index, %start, %end, "contract dropped: empty after clipping");
                dropped += 1;
            }
        }
    }

    let contracts_used = raw_intervals.len();
    let intervals = merge_intervals(raw_intervals);
    let rented_days = total_days(&intervals);

    tracing::debug!(
        contracts_used,
        contracts_dropped = dropped,
        merged = intervals.len(),
        rented_days,
        "merged rental intervals"
    );

    RentalSummary {
        rented_days,
        intervals,
        contracts_used,
        contracts_dropped: dropped,
    }
}

/// Sorts and merges intervals into a disjoint cover.
///
/// An interval starting exactly where the previous one ends continues it.
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.retain(|i| i.end > i.start);
    intervals.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }
    merged
}

/// Sum of interval lengths in days.
pub fn total_days(intervals: &[Interval]) -> f64 {
    intervals.iter().fold(0.0, |acc, i| acc + i.days())
}
