//! Engine tunables.

use serde::{Deserialize, Serialize};

/// How the lifecycle walk treats events that classify as `OUTRO`
/// (returns, sales, purchases and other administrative markers).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherEventPolicy {
    /// The event switches the running state to `OUTRO`, so the following
    /// interval accrues `OUTRO` time.
    #[default]
    FoldIntoOther,
    /// The event leaves the running state untouched.
    KeepPrevious,
}

/// Configuration for the lifecycle state walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub other_event_policy: OtherEventPolicy,

    /// Floor applied to the timeline length, in days.
    /// Default: 1.0.
    pub min_timeline_days: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            other_event_policy: OtherEventPolicy::default(),
            min_timeline_days: 1.0,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub timeline: TimelineConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(
            config.timeline.other_event_policy,
            OtherEventPolicy::FoldIntoOther
        );
        assert!((config.timeline.min_timeline_days - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_value(json!({"timeline": {"other_event_policy": "keep_previous"}}))
                .unwrap();
        assert_eq!(
            config.timeline.other_event_policy,
            OtherEventPolicy::KeepPrevious
        );
        assert!((config.timeline.min_timeline_days - 1.0).abs() < f64::EPSILON);
    }
}
