//! Viewer notification emitter.
//!
//! Projects each snapshot onto four alert booleans and forwards one
//! message per sensor to an [`AlertSink`]:
//!
//! ```json
//! { "type": "SENSOR_ALERTS",
//!   "data": { "sensorId": "A",
//!             "alerts": { "fire":   { "isActive": false },
//!                         "gas":    { "isActive": true  },
//!                         "light":  { "isActive": false },
//!                         "motion": { "isActive": false } } } }
//! ```
//!
//! The projection reuses the classifier's clause predicates and never
//! looks at acknowledgement state.

use log::debug;
use serde::Serialize;

use crate::app::ports::AlertSink;
use crate::safety::{fire_alert, gas_alert, light_alert, motion_alert};
use crate::sensors::SensorSnapshot;
use crate::sensors::thresholds::ThresholdTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertFlag {
    pub is_active: bool,
}

impl From<bool> for AlertFlag {
    fn from(is_active: bool) -> Self {
        Self { is_active }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SensorAlertFlags {
    pub fire: AlertFlag,
    pub gas: AlertFlag,
    pub light: AlertFlag,
    pub motion: AlertFlag,
}

impl SensorAlertFlags {
    pub fn any(&self) -> bool {
        self.fire.is_active || self.gas.is_active || self.light.is_active || self.motion.is_active
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorAlerts {
    pub sensor_id: String,
    pub alerts: SensorAlertFlags,
}

/// Messages understood by the embedded viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ViewerMessage {
    #[serde(rename = "SENSOR_ALERTS")]
    SensorAlerts(SensorAlerts),
}

impl ViewerMessage {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Alert booleans for one snapshot.
pub fn alert_flags(snapshot: &SensorSnapshot, thresholds: &ThresholdTable) -> SensorAlertFlags {
    SensorAlertFlags {
        fire: fire_alert(snapshot).into(),
        gas: gas_alert(snapshot, thresholds).into(),
        light: light_alert(snapshot).into(),
        motion: motion_alert(snapshot).into(),
    }
}

/// Stateless apart from a running message count.
#[derive(Debug, Default)]
pub struct NotificationEmitter {
    sent: u64,
}

impl NotificationEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send one `SENSOR_ALERTS` message per well-formed snapshot.
    /// Returns the number of messages sent.
    pub fn emit_alerts(
        &mut self,
        snapshots: &[SensorSnapshot],
        thresholds: &ThresholdTable,
        sink: &mut impl AlertSink,
    ) -> usize {
        let mut count = 0;
        for snap in snapshots.iter().filter(|s| !s.is_malformed()) {
            let message = ViewerMessage::SensorAlerts(SensorAlerts {
                sensor_id: snap.id.clone(),
                alerts: alert_flags(snap, thresholds),
            });
            sink.send(&message);
            count += 1;
        }
        self.sent += count as u64;
        debug!("Notify: forwarded alerts for {count} sensors");
        count
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }
}
