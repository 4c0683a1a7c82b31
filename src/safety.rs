//! Danger classifier.
//!
//! A sensor is in danger when **any** of these holds:
//!
//! | Clause                       | Reason          |
//! |------------------------------|-----------------|
//! | `status == danger`           | `StatusDanger`  |
//! | fire detector in detection   | `Fire`          |
//! | light `error` / `shutdown`   | `LightFault`    |
//! | `co2 >= limit`               | `GasCo2`        |
//! | `co >= limit`                | `GasCo`         |
//! | other metric `>= limit`      | `GasOther`      |
//!
//! Every applicable reason is collected into a bitmask; `is_danger` is the
//! logical OR.  Classification is a pure function of the snapshot and the
//! threshold table.  Motion is reported to viewers but never raises danger.

use core::fmt;

use crate::sensors::thresholds::{METRIC_CO, METRIC_CO2, ThresholdTable};
use crate::sensors::{FireDetectorState, MotionState, SensorSnapshot, SensorStatus};

/// Why a sensor is considered dangerous.  Accumulated in a [`DangerReasons`]
/// bitmask so several can be reported at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DangerReason {
    Fire = 0b0000_0001,
    GasCo2 = 0b0000_0010,
    GasCo = 0b0000_0100,
    GasOther = 0b0000_1000,
    LightFault = 0b0001_0000,
    StatusDanger = 0b0010_0000,
}

impl DangerReason {
    pub const ALL: [DangerReason; 6] = [
        Self::Fire,
        Self::GasCo2,
        Self::GasCo,
        Self::GasOther,
        Self::LightFault,
        Self::StatusDanger,
    ];

    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for DangerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fire => write!(f, "fire detected"),
            Self::GasCo2 => write!(f, "CO2 over limit"),
            Self::GasCo => write!(f, "CO over limit"),
            Self::GasOther => write!(f, "gas over limit"),
            Self::LightFault => write!(f, "light fault"),
            Self::StatusDanger => write!(f, "sensor reports danger"),
        }
    }
}

/// Set of [`DangerReason`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DangerReasons(u8);

impl DangerReasons {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, reason: DangerReason) {
        self.0 |= reason.mask();
    }

    pub fn contains(self, reason: DangerReason) -> bool {
        self.0 & reason.mask() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn iter(self) -> impl Iterator<Item = DangerReason> {
        DangerReason::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl FromIterator<DangerReason> for DangerReasons {
    fn from_iter<I: IntoIterator<Item = DangerReason>>(iter: I) -> Self {
        let mut set = Self::empty();
        for r in iter {
            set.insert(r);
        }
        set
    }
}

impl fmt::Display for DangerReasons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for r in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{r}")?;
            first = false;
        }
        Ok(())
    }
}

/// Classification of one snapshot.  Derived on demand, never stored
/// across batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DangerVerdict {
    pub sensor_id: String,
    pub is_danger: bool,
    pub reasons: DangerReasons,
}

/// Classify one snapshot against the threshold table.
pub fn classify(snapshot: &SensorSnapshot, thresholds: &ThresholdTable) -> DangerVerdict {
    let mut reasons = DangerReasons::empty();

    if snapshot.status == SensorStatus::Danger {
        reasons.insert(DangerReason::StatusDanger);
    }
    if fire_alert(snapshot) {
        reasons.insert(DangerReason::Fire);
    }
    if light_alert(snapshot) {
        reasons.insert(DangerReason::LightFault);
    }
    for metric in &snapshot.metrics {
        if thresholds.is_exceeded(&metric.name, metric.value) {
            reasons.insert(gas_reason(&metric.name));
        }
    }

    DangerVerdict {
        sensor_id: snapshot.id.clone(),
        is_danger: !reasons.is_empty(),
        reasons,
    }
}

fn gas_reason(metric: &str) -> DangerReason {
    match metric {
        METRIC_CO2 => DangerReason::GasCo2,
        METRIC_CO => DangerReason::GasCo,
        _ => DangerReason::GasOther,
    }
}

// ── Individual clauses (shared with the notification emitter) ─────

pub fn fire_alert(snapshot: &SensorSnapshot) -> bool {
    snapshot.fire_detector_state == FireDetectorState::Detection
}

pub fn gas_alert(snapshot: &SensorSnapshot, thresholds: &ThresholdTable) -> bool {
    snapshot
        .metrics
        .iter()
        .any(|m| thresholds.is_exceeded(&m.name, m.value))
}

pub fn light_alert(snapshot: &SensorSnapshot) -> bool {
    snapshot.light_state.is_fault()
}

pub fn motion_alert(snapshot: &SensorSnapshot) -> bool {
    snapshot.motion_state == MotionState::Detection
}
