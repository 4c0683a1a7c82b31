//! Per-batch sensor summary for the dashboard side panel.

use serde::Serialize;

use crate::safety::{classify, fire_alert, gas_alert, light_alert, motion_alert};
use crate::sensors::{SensorSnapshot, SensorStatus};
use crate::sensors::thresholds::ThresholdTable;

/// Counts over the well-formed snapshots of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SensorSummary {
    pub total: usize,
    /// Classified dangerous (any reason).
    pub danger: usize,
    /// Self-reported `warning`.
    pub warning: usize,
    /// Self-reported `warmup`.
    pub warmup: usize,
    pub fire: usize,
    pub gas: usize,
    pub light_fault: usize,
    pub motion: usize,
}

impl SensorSummary {
    pub fn from_snapshots(snapshots: &[SensorSnapshot], thresholds: &ThresholdTable) -> Self {
        let mut s = Self::default();
        for snap in snapshots.iter().filter(|s| !s.is_malformed()) {
            s.total += 1;
            s.danger += usize::from(classify(snap, thresholds).is_danger);
            s.warning += usize::from(snap.status == SensorStatus::Warning);
            s.warmup += usize::from(snap.status == SensorStatus::Warmup);
            s.fire += usize::from(fire_alert(snap));
            s.gas += usize::from(gas_alert(snap, thresholds));
            s.light_fault += usize::from(light_alert(snap));
            s.motion += usize::from(motion_alert(snap));
        }
        s
    }

    /// Sensors with nothing to report.
    pub fn quiet(&self) -> usize {
        self.total.saturating_sub(self.danger)
    }
}
