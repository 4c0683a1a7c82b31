//! Outbound application events.
//!
//! The [`DashboardService`](super::service::DashboardService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them: log, push to a UI store,
//! forward to telemetry.

use crate::error::TransportError;

/// Structured events emitted by the alarm core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started polling.
    Started,

    /// A batch was classified.
    BatchApplied { sensors: usize, active: usize },

    /// A batch arrived with a sequence number not newer than the last one.
    StaleBatchDropped { sequence: u64, last_applied: u64 },

    /// A poll failed; the previous state is kept.
    PollFailed(TransportError),

    /// The aggregate alarm went from quiet to active.
    AlarmRaised { sensor_ids: Vec<String> },

    /// No unacknowledged dangerous sensors remain.
    AlarmCleared,

    /// The operator dismissed the current episode of one sensor.
    Acknowledged { sensor_id: String },

    /// Audio playback is allowed from now on.
    AudioUnlocked,

    /// The primary alarm sound failed; the beeper took over.
    PlaybackFallback,

    /// Threshold table replaced at runtime.
    ThresholdsUpdated { count: usize },

    /// The service was torn down; audio is silent and timers cancelled.
    Stopped,
}
