//! Canonical sensor data model.
//!
//! Every snapshot entering the alarm core has this one shape.  The REST
//! payload is mapped onto it in [`wire`]; nothing downstream ever sees the
//! transport's field names.

pub mod thresholds;
pub mod wire;

use serde::{Deserialize, Serialize};

/// Self-reported aggregate status of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    #[default]
    Normal,
    Warmup,
    Warning,
    Danger,
}

impl SensorStatus {
    /// Parse a status string; unknown values read as `Normal`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "warmup" => Self::Warmup,
            "warning" => Self::Warning,
            "danger" => Self::Danger,
            _ => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FireDetectorState {
    #[default]
    Normal,
    Detection,
}

/// Light status.  `Shutdown` is the legacy spelling of a light fault and is
/// treated exactly like `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightState {
    #[default]
    On,
    Off,
    Error,
    Shutdown,
}

impl LightState {
    /// Unknown values map to `On`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "off" => Self::Off,
            "error" => Self::Error,
            "shutdown" => Self::Shutdown,
            _ => Self::On,
        }
    }

    pub fn is_fault(self) -> bool {
        matches!(self, Self::Error | Self::Shutdown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionState {
    #[default]
    Normal,
    Detection,
}

/// Anything other than `"detection"` is a quiet detector.
fn parse_detection(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("detection")
}

impl FireDetectorState {
    pub fn parse(raw: &str) -> Self {
        if parse_detection(raw) { Self::Detection } else { Self::Normal }
    }
}

impl MotionState {
    pub fn parse(raw: &str) -> Self {
        if parse_detection(raw) { Self::Detection } else { Self::Normal }
    }
}

/// One named reading, e.g. `co2 = 450.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A point-in-time reading of one physical sensor.
///
/// `id` is stable across snapshots of the same sensor.  Snapshots are
/// replaced wholesale by the next batch, never patched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    pub id: String,
    #[serde(default)]
    pub status: SensorStatus,
    #[serde(default)]
    pub fire_detector_state: FireDetectorState,
    #[serde(default)]
    pub light_state: LightState,
    #[serde(default)]
    pub motion_state: MotionState,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl SensorSnapshot {
    /// A quiet sensor with no readings.
    pub fn normal(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: SensorStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_fire(mut self, state: FireDetectorState) -> Self {
        self.fire_detector_state = state;
        self
    }

    #[must_use]
    pub fn with_light(mut self, state: LightState) -> Self {
        self.light_state = state;
        self
    }

    #[must_use]
    pub fn with_motion(mut self, state: MotionState) -> Self {
        self.motion_state = state;
        self
    }

    #[must_use]
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.push(Metric::new(name, value));
        self
    }

    /// True when the record cannot be attributed to a sensor.
    pub fn is_malformed(&self) -> bool {
        self.id.trim().is_empty()
    }
}

/// A batch of snapshots as delivered by one poll.
///
/// `sequence`, when the source provides one, increases monotonically per
/// request so that a late response can be recognised and discarded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapshotBatch {
    pub sequence: Option<u64>,
    pub snapshots: Vec<SensorSnapshot>,
}

impl SnapshotBatch {
    pub fn new(snapshots: Vec<SensorSnapshot>) -> Self {
        Self {
            sequence: None,
            snapshots,
        }
    }

    #[must_use]
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = Some(sequence);
        self
    }
}
