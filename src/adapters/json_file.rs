//! File-backed sensor source.
//!
//! Reads a sensor-list JSON document from disk on every poll, the way the
//! dashboard reads a static `data.json` during development.  Each
//! successful read is stamped with the next sequence number.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::ports::SensorSource;
use crate::config::{DashboardConfig, validate_thresholds};
use crate::error::TransportError;
use crate::sensors::SnapshotBatch;
use crate::sensors::thresholds::{ThresholdEntry, ThresholdTable};
use crate::sensors::wire::decode_sensor_list;

pub struct FileSensorSource {
    path: PathBuf,
    sequence: u64,
}

impl FileSensorSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sequence: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SensorSource for FileSensorSource {
    fn fetch(&mut self) -> Result<SnapshotBatch, TransportError> {
        let body = fs::read(&self.path)
            .map_err(|e| TransportError::Unavailable(format!("{}: {e}", self.path.display())))?;
        let snapshots = decode_sensor_list(&body)?;
        self.sequence += 1;
        Ok(SnapshotBatch::new(snapshots).with_sequence(self.sequence))
    }
}

/// Load a `[{ "name": .., "dangerValue": .. }]` threshold list.
pub fn load_thresholds(path: &Path) -> Result<ThresholdTable> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading thresholds from {}", path.display()))?;
    let entries: Vec<ThresholdEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing thresholds in {}", path.display()))?;
    validate_thresholds(&entries).context("invalid threshold list")?;
    Ok(ThresholdTable::from_entries(&entries))
}

/// Load a [`DashboardConfig`]; missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<DashboardConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let config: DashboardConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing config in {}", path.display()))?;
    config.validate().context("invalid config")?;
    Ok(config)
}
