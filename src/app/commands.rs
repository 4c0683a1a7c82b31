//! Inbound commands to the dashboard service.
//!
//! These represent actions requested by the UI that the
//! [`DashboardService`](super::service::DashboardService) interprets.

use crate::sensors::thresholds::ThresholdEntry;

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Operator dismissed the alarm of one sensor.
    Acknowledge(String),

    /// First click/keypress seen by the page; opens the autoplay gate.
    UserInteraction,

    /// Replace the threshold table and re-evaluate the latest batch.
    UpdateThresholds(Vec<ThresholdEntry>),
}
