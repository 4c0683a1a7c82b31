//! Dashboard configuration parameters
//!
//! All tunable parameters for the alarm core.  Values may be loaded from a
//! JSON file or replaced at runtime with `AppCommand::UpdateThresholds`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::audio::beeper::Tone;
use crate::error::{Error, Result};
use crate::sensors::thresholds::{
    DEFAULT_CO_DANGER, DEFAULT_CO2_DANGER, METRIC_CO, METRIC_CO2, ThresholdEntry, ThresholdTable,
};

/// Audio alarm parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Looping alarm sound
    pub alarm_asset: String,
    /// Fallback beep period (milliseconds)
    pub fallback_period_ms: u32,
    /// Fallback beep shape
    pub fallback_tone: Tone,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            alarm_asset: "/sounds/emergency_bell.mp3".to_string(),
            fallback_period_ms: 1000,
            fallback_tone: Tone::default(),
        }
    }
}

/// Core dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    // --- Thresholds ---
    /// Metric danger levels
    pub thresholds: Vec<ThresholdEntry>,

    // --- Timing ---
    /// Delay between the end of one poll and the start of the next (ms)
    pub poll_interval_ms: u32,
    /// Viewer alert cadence (ms)
    pub notify_interval_ms: u32,

    // --- Outputs ---
    /// Forward per-sensor alerts to the viewer
    pub notifications_enabled: bool,
    pub audio: AudioConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![
                ThresholdEntry::new(METRIC_CO2, DEFAULT_CO2_DANGER),
                ThresholdEntry::new(METRIC_CO, DEFAULT_CO_DANGER),
            ],
            poll_interval_ms: 3000,
            notify_interval_ms: 1000, // 1 Hz
            notifications_enabled: true,
            audio: AudioConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Lookup table built from `thresholds`.
    pub fn threshold_table(&self) -> ThresholdTable {
        ThresholdTable::from_entries(&self.thresholds)
    }

    /// Reject values that would disable or destabilise alarming.
    pub fn validate(&self) -> Result<()> {
        validate_thresholds(&self.thresholds)?;
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll_interval_ms must be > 0"));
        }
        if self.notify_interval_ms == 0 {
            return Err(Error::Config("notify_interval_ms must be > 0"));
        }
        if self.audio.fallback_period_ms == 0 {
            return Err(Error::Config("fallback_period_ms must be > 0"));
        }
        let gain = self.audio.fallback_tone.gain;
        if !(0.0..=1.0).contains(&gain) {
            return Err(Error::Config("fallback tone gain must be within 0.0..=1.0"));
        }
        if self.audio.alarm_asset.trim().is_empty() {
            return Err(Error::Config("alarm_asset must not be empty"));
        }
        Ok(())
    }
}

/// Threshold names must be unique and values finite.
pub fn validate_thresholds(entries: &[ThresholdEntry]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for e in entries {
        if e.metric_name.trim().is_empty() {
            return Err(Error::Config("threshold name must not be empty"));
        }
        if !e.danger_value.is_finite() {
            return Err(Error::Config("threshold value must be finite"));
        }
        if !seen.insert(e.metric_name.as_str()) {
            return Err(Error::Config("duplicate threshold name"));
        }
    }
    Ok(())
}
