//! Runtime diagnostics.
//!
//! Plain counters maintained by the service and handed out on demand, for
//! a status panel or a periodic log line.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuntimeMetrics {
    /// Milliseconds of simulated time since start.
    pub uptime_ms: u64,
    pub polls_ok: u64,
    pub polls_failed: u64,
    /// Batches discarded for arriving out of order.
    pub stale_batches: u64,
    /// Malformed records skipped by the tracker.
    pub snapshots_dropped: u64,
    /// false → true edges of the aggregate alarm.
    pub alarms_raised: u64,
    pub acknowledgements: u64,
    /// Episodes that sounded on the fallback beeper.
    pub playback_fallbacks: u32,
    pub alerts_sent: u64,
}

impl RuntimeMetrics {
    /// Share of polls that failed, 0.0 when nothing was polled yet.
    pub fn poll_failure_ratio(&self) -> f32 {
        let total = self.polls_ok + self.polls_failed;
        if total == 0 {
            0.0
        } else {
            self.polls_failed as f32 / total as f32
        }
    }
}
