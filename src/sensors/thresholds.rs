//! Metric name → danger threshold lookup.
//!
//! The table is supplied from outside (config or backend).  `co2` and `co`
//! always have a usable limit: if the table has no entry for them the
//! built-in fallbacks apply.  Any other metric without an entry never
//! raises danger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fallback CO₂ danger level (ppm).
pub const DEFAULT_CO2_DANGER: f64 = 3000.0;
/// Fallback CO danger level (ppm).
pub const DEFAULT_CO_DANGER: f64 = 500.0;

pub const METRIC_CO2: &str = "co2";
pub const METRIC_CO: &str = "co";

/// One threshold as it travels in config files and API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    #[serde(rename = "name")]
    pub metric_name: String,
    #[serde(rename = "dangerValue", alias = "threshold")]
    pub danger_value: f64,
}

impl ThresholdEntry {
    pub fn new(metric_name: impl Into<String>, danger_value: f64) -> Self {
        Self {
            metric_name: metric_name.into(),
            danger_value,
        }
    }
}

/// Threshold lookup keyed by metric name (one entry per name).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThresholdTable {
    limits: BTreeMap<String, f64>,
}

impl ThresholdTable {
    /// An empty table; only the co2/co fallbacks apply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries.  A later entry for the same name wins.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ThresholdEntry>) -> Self {
        let limits = entries
            .into_iter()
            .map(|e| (e.metric_name.clone(), e.danger_value))
            .collect();
        Self { limits }
    }

    /// Insert or replace a single threshold.
    pub fn set(&mut self, metric_name: impl Into<String>, danger_value: f64) {
        self.limits.insert(metric_name.into(), danger_value);
    }

    /// Danger threshold for `metric`, if one applies.
    pub fn limit(&self, metric: &str) -> Option<f64> {
        self.limits.get(metric).copied().or(match metric {
            METRIC_CO2 => Some(DEFAULT_CO2_DANGER),
            METRIC_CO => Some(DEFAULT_CO_DANGER),
            _ => None,
        })
    }

    /// `value >= limit(metric)`.  Metrics without a limit never trip.
    pub fn is_exceeded(&self, metric: &str, value: f64) -> bool {
        self.limit(metric).is_some_and(|limit| value >= limit)
    }
}
