//! Log-based sinks.
//!
//! [`LogEventSink`] writes every [`AppEvent`] as one structured log line;
//! [`LogAlertSink`] does the same for viewer messages when no embedded
//! viewer is attached.  A UI-store adapter would implement the same traits.

use log::{debug, error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{AlertSink, EventSink};
use crate::notify::ViewerMessage;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | polling"),
            AppEvent::BatchApplied { sensors, active } => {
                debug!("BATCH | sensors={} active={}", sensors, active);
            }
            AppEvent::StaleBatchDropped {
                sequence,
                last_applied,
            } => {
                warn!("BATCH | stale #{} dropped (last #{})", sequence, last_applied);
            }
            AppEvent::PollFailed(e) => warn!("POLL  | failed: {}", e),
            AppEvent::AlarmRaised { sensor_ids } => {
                error!("ALARM | raised by [{}]", sensor_ids.join(", "));
            }
            AppEvent::AlarmCleared => info!("ALARM | cleared"),
            AppEvent::Acknowledged { sensor_id } => info!("ALARM | '{}' acknowledged", sensor_id),
            AppEvent::AudioUnlocked => info!("AUDIO | unlocked"),
            AppEvent::PlaybackFallback => warn!("AUDIO | primary failed, beeper active"),
            AppEvent::ThresholdsUpdated { count } => info!("CONF  | {} thresholds", count),
            AppEvent::Stopped => info!("STOP  | torn down"),
        }
    }
}

/// Adapter that logs viewer messages as JSON.
#[derive(Debug, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn send(&mut self, message: &ViewerMessage) {
        match message.to_json() {
            Ok(json) => debug!("VIEW  | {}", json),
            Err(e) => warn!("VIEW  | could not encode message: {}", e),
        }
    }
}
