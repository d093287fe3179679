//! Generic lifecycle stream reconstruction.
//!
//! Walks a vehicle's lifecycle events in time order. Each event may move the
//! vehicle into a new [`LifecycleState`]; the interval up to the next event
//! (or `now`, after the last one) accrues to the state in force after that
//! event's transition.

use serde::Serialize;

use crate::config::{OtherEventPolicy, TimelineConfig};
use crate::date::{Timestamp, days_between, resolve_date};
use crate::fields::{EVENT_DATE, EVENT_TYPE, text_of};
use crate::record::RawRecord;
use crate::stage::{LIFECYCLE_EVENTS, LifecycleState};

/// A lifecycle event with its date already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub at: Timestamp,
    /// Raw event type label. `None` when the source row has none.
    pub label: Option<String>,
}

impl LifecycleEvent {
    /// Reads an event from a raw record; `None` if its date is unreadable.
    pub fn from_record(record: &RawRecord) -> Option<Self> {
        let at = record.lookup(&EVENT_DATE).and_then(resolve_date)?;
        let label = record.lookup(&EVENT_TYPE).and_then(text_of);
        Some(Self { at, label })
    }
}

/// Next state after `event`, given the state in force before it.
///
/// Events without a label never change state. Under
/// [`OtherEventPolicy::KeepPrevious`], events classified as `OUTRO` don't
/// either.
pub fn transition(
    current: LifecycleState,
    event: &LifecycleEvent,
    policy: OtherEventPolicy,
) -> LifecycleState {
    let Some(label) = event.label.as_deref() else {
        return current;
    };
    match (LIFECYCLE_EVENTS.classify(label), policy) {
        (LifecycleState::Outro, OtherEventPolicy::KeepPrevious) => current,
        (next, _) => next,
    }
}

/// Days spent per state, plus the timeline length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDays {
    pub total_days: f64,
    pub locacao: f64,
    pub manutencao: f64,
    pub sinistro: f64,
    pub multa: f64,
    pub outro: f64,
}

impl StateDays {
    pub const fn get(&self, state: LifecycleState) -> f64 {
        match state {
            LifecycleState::Locacao => self.locacao,
            LifecycleState::Manutencao => self.manutencao,
            LifecycleState::Sinistro => self.sinistro,
            LifecycleState::Multa => self.multa,
            LifecycleState::Outro => self.outro,
        }
    }

    fn accrue(&mut self, state: LifecycleState, days: f64) {
        let bucket = match state {
            LifecycleState::Locacao => &mut self.locacao,
            LifecycleState::Manutencao => &mut self.manutencao,
            LifecycleState::Sinistro => &mut self.sinistro,
            LifecycleState::Multa => &mut self.multa,
            LifecycleState::Outro => &mut self.outro,
        };
        *bucket += days;
    }
}

/// A stretch of time spent in one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSegment {
    pub state: LifecycleState,
    pub start: Timestamp,
    pub end: Timestamp,
    pub days: f64,
}

/// Reconstructed lifecycle timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTimeline {
    pub days: StateDays,
    /// One segment per resolved event, in time order.
    pub segments: Vec<StateSegment>,
}

/// Reconstructs per-state days from raw lifecycle event records.
///
/// Records with unreadable dates are ignored. With no readable events the
/// result is all zeros.
pub fn reconstruct_timeline(
    records: &[RawRecord],
    now: Timestamp,
    config: &TimelineConfig,
) -> StateTimeline {
    let events: Vec<LifecycleEvent> = records
        .iter()
        .filter_map(LifecycleEvent::from_record)
        .collect();
    let dropped = records.len() - events.len();
    if dropped > 0 {
        tracing::debug!(dropped, "lifecycle events dropped: no readable date");
    }
    walk_events(events, now, config)
}

/// Runs the state walk over already-resolved events.
pub fn walk_events(
    mut events: Vec<LifecycleEvent>,
    now: Timestamp,
    config: &TimelineConfig,
) -> StateTimeline {
    events.sort_by_key(|e| e.at);
    let Some(first) = events.first() else {
        return StateTimeline::default();
    };

    let mut days = StateDays {
        total_days: days_between(first.at, now).max(config.min_timeline_days),
        ..StateDays::default()
    };
    let mut state = first
        .label
        .as_deref()
        .map_or(LifecycleState::Outro, |label| LIFECYCLE_EVENTS.classify(label));
    let mut segments = Vec::with_capacity(events.len());

    for (i, event) in events.iter().enumerate() {
        state = transition(state, event, config.other_event_policy);
        let end = events.get(i + 1).map_or(now, |next| next.at);
        let span = days_between(event.at, end).max(0.0);
        days.accrue(state, span);
        segments.push(StateSegment {
            state,
            start: event.at,
            end,
            days: span,
        });
    }

    tracing::debug!(
        events = events.len(),
        total_days = days.total_days,
        final_state = %state,
        "reconstructed lifecycle timeline"
    );

    StateTimeline { days, segments }
}
