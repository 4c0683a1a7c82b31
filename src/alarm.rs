//! Alarm state tracker.
//!
//! Owns the operator's acknowledgements and derives the set of sensors
//! that should currently be alarming.
//!
//! ## Episode lifecycle
//!
//! 1. A batch classifies sensor S as dangerous; S enters `active`.
//! 2. The operator acknowledges S; it leaves `active` and is remembered
//!    in `acknowledged`.
//! 3. While S stays dangerous, later batches keep it suppressed.
//! 4. The first batch that shows S safe prunes the acknowledgement.
//! 5. If S turns dangerous again it re-enters `active` on its own.
//!
//! Acknowledgements of sensors missing from a batch (including an empty
//! batch) are kept: there is nothing to base pruning on.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};

use crate::safety::{DangerVerdict, classify};
use crate::sensors::SensorSnapshot;
use crate::sensors::thresholds::ThresholdTable;

/// Decision state exposed to rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlarmTrackerState {
    /// Sensors the operator has dismissed for their current episode.
    pub acknowledged_ids: BTreeSet<String>,
    /// Dangerous sensors that are not acknowledged.
    pub active_alarm_ids: BTreeSet<String>,
    /// `!active_alarm_ids.is_empty()`.
    pub alarm_active: bool,
}

impl AlarmTrackerState {
    pub fn is_active(&self, sensor_id: &str) -> bool {
        self.active_alarm_ids.contains(sensor_id)
    }

    pub fn is_acknowledged(&self, sensor_id: &str) -> bool {
        self.acknowledged_ids.contains(sensor_id)
    }
}

/// Stateful tracker.  Created empty; lives as long as the dashboard.
#[derive(Debug, Default)]
pub struct AlarmTracker {
    state: AlarmTrackerState,
    /// Verdicts of the latest batch, keyed by sensor id.
    verdicts: BTreeMap<String, DangerVerdict>,
    /// Malformed records skipped in the latest batch.
    dropped: usize,
}

impl AlarmTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derive the alarm state from a fresh batch.
    pub fn on_snapshot_batch(
        &mut self,
        snapshots: &[SensorSnapshot],
        thresholds: &ThresholdTable,
    ) -> &AlarmTrackerState {
        self.dropped = 0;
        self.verdicts.clear();

        for snap in snapshots {
            if snap.is_malformed() {
                warn!("Alarm: dropping snapshot without sensor id");
                self.dropped += 1;
                continue;
            }
            // A repeated id replaces the earlier record of the same batch.
            self.verdicts.insert(snap.id.clone(), classify(snap, thresholds));
        }

        let danger: BTreeSet<String> = self
            .verdicts
            .values()
            .filter(|v| v.is_danger)
            .map(|v| v.sensor_id.clone())
            .collect();

        self.state.active_alarm_ids = danger
            .difference(&self.state.acknowledged_ids)
            .cloned()
            .collect();

        // Present-but-safe sensors end their episode.
        let verdicts = &self.verdicts;
        self.state.acknowledged_ids.retain(|id| match verdicts.get(id) {
            Some(v) if !v.is_danger => {
                info!("Alarm: '{id}' cleared, acknowledgement released");
                false
            }
            _ => true,
        });

        self.refresh_flag();
        &self.state
    }

    /// Dismiss the current episode of `sensor_id`.
    ///
    /// The id is always recorded, even when the sensor is quiet or absent
    /// from the latest batch; the next batch that reports it safe releases
    /// it again.  Returns whether the sensor was actively alarming.
    pub fn acknowledge(&mut self, sensor_id: &str) -> bool {
        self.state.acknowledged_ids.insert(sensor_id.to_string());
        let was_active = self.state.active_alarm_ids.remove(sensor_id);
        self.refresh_flag();
        if was_active {
            info!(
                "Alarm: '{sensor_id}' acknowledged, {} still active",
                self.state.active_alarm_ids.len()
            );
        } else {
            debug!("Alarm: '{sensor_id}' acknowledged while not alarming");
        }
        was_active
    }

    pub fn state(&self) -> &AlarmTrackerState {
        &self.state
    }

    pub fn alarm_active(&self) -> bool {
        self.state.alarm_active
    }

    /// Verdict for `sensor_id` from the latest batch.
    pub fn verdict(&self, sensor_id: &str) -> Option<&DangerVerdict> {
        self.verdicts.get(sensor_id)
    }

    /// Verdicts of the latest batch in sensor-id order.
    pub fn verdicts(&self) -> impl Iterator<Item = &DangerVerdict> {
        self.verdicts.values()
    }

    /// Malformed records skipped by the latest batch.
    pub fn dropped_in_last_batch(&self) -> usize {
        self.dropped
    }

    fn refresh_flag(&mut self) {
        self.state.alarm_active = !self.state.active_alarm_ids.is_empty();
    }
}
