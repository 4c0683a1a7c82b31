//! REST payload → canonical [`SensorSnapshot`] mapping.
//!
//! The backend's sensor list has drifted through several shapes; this is
//! the only place that knows about them.  Fields that are missing or carry
//! unknown values degrade to the quiet state.  Only the envelope has to
//! parse: each record is decoded on its own, and one that cannot be read
//! (or has no `sensorID`) is dropped without failing the rest of the batch.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use super::{FireDetectorState, LightState, Metric, MotionState, SensorSnapshot, SensorStatus};
use crate::error::{SnapshotError, TransportError};

/// Sensor ids arrive as strings, occasionally as bare numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiSensorId {
    Text(String),
    Number(serde_json::Number),
}

impl ApiSensorId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// One metric as reported by the backend.  A reading without a usable
/// value is skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMetric {
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One sensor as reported by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSensor {
    #[serde(rename = "sensorID", default)]
    pub sensor_id: Option<ApiSensorId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub light_status: Option<String>,
    #[serde(default)]
    pub fire_detector: Option<String>,
    #[serde(default)]
    pub motion_detection: Option<String>,
    #[serde(default)]
    pub sensors: Vec<ApiMetric>,
}

/// Envelope returned by the sensor-list endpoint.  Records stay raw until
/// [`decode_sensor_list`] parses them one by one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorListResponse {
    #[serde(default, alias = "sensors")]
    pub sensor_list: Vec<Value>,
}

impl TryFrom<ApiSensor> for SensorSnapshot {
    type Error = SnapshotError;

    fn try_from(api: ApiSensor) -> Result<Self, Self::Error> {
        let id = api
            .sensor_id
            .map(ApiSensorId::into_string)
            .filter(|id| !id.trim().is_empty())
            .ok_or(SnapshotError::MissingId)?;

        // Explicit status first, else the first reading's status.
        let status = api
            .status
            .as_deref()
            .or_else(|| api.sensors.first().and_then(|m| m.status.as_deref()))
            .map_or(SensorStatus::Normal, SensorStatus::parse);

        let mut metrics = Vec::with_capacity(api.sensors.len());
        for m in api.sensors {
            match m.value {
                Some(value) => metrics.push(Metric::new(m.name, value)),
                None => debug!("Sensor list: '{id}' reading '{}' has no value", m.name),
            }
        }

        Ok(SensorSnapshot {
            id,
            status,
            fire_detector_state: api
                .fire_detector
                .as_deref()
                .map_or(FireDetectorState::Normal, FireDetectorState::parse),
            light_state: api
                .light_status
                .as_deref()
                .map_or(LightState::On, LightState::parse),
            motion_state: api
                .motion_detection
                .as_deref()
                .map_or(MotionState::Normal, MotionState::parse),
            metrics,
        })
    }
}

/// Decode a sensor-list response body into canonical snapshots.
///
/// A body that is not a sensor-list envelope is a
/// [`TransportError::Decode`]; individual records that fail to parse or
/// carry no id are logged and skipped.
pub fn decode_sensor_list(body: &[u8]) -> Result<Vec<SensorSnapshot>, TransportError> {
    let response: SensorListResponse =
        serde_json::from_slice(body).map_err(|e| TransportError::Decode(e.to_string()))?;

    let mut snapshots = Vec::with_capacity(response.sensor_list.len());
    for (idx, raw) in response.sensor_list.into_iter().enumerate() {
        let api = match serde_json::from_value::<ApiSensor>(raw) {
            Ok(api) => api,
            Err(e) => {
                warn!("Sensor list: dropping unreadable record #{idx}: {e}");
                continue;
            }
        };
        match SensorSnapshot::try_from(api) {
            Ok(snap) => snapshots.push(snap),
            Err(e) => warn!("Sensor list: dropping record #{idx}: {e}"),
        }
    }
    Ok(snapshots)
}
