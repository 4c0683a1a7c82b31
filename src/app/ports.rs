//! Port traits: the hexagonal boundary between the alarm core and the
//! browser/host it runs in.
//!
//! ```text
//!   SensorSource ──▶ ┌──────────────────┐ ──▶ EventSink
//!                    │ DashboardService │ ──▶ AlertSink
//!   PlaybackPort ◀── │ tracker · audio  │
//!   TonePort     ◀── └──────────────────┘
//! ```
//!
//! Adapters implement these; the service consumes them via generics, so
//! the core never touches an audio element, a socket or a timer directly.

use crate::audio::beeper::Tone;
use crate::error::{PlaybackError, TransportError};
use crate::notify::ViewerMessage;
use crate::sensors::SnapshotBatch;

// ───────────────────────────────────────────────────────────────
// Sensor source (driven adapter: backend → core)
// ───────────────────────────────────────────────────────────────

/// Delivers one batch per poll.  Request timeouts are the adapter's
/// business; the core only sees success or a typed failure.
pub trait SensorSource {
    fn fetch(&mut self) -> Result<SnapshotBatch, TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Audio (driven adapters: core → speaker)
// ───────────────────────────────────────────────────────────────

/// The one looping alarm sound.  Only the audio driver holds it.
pub trait PlaybackPort {
    /// Load `asset` and mark it looping.  Called once, lazily.
    fn prepare(&mut self, asset: &str) -> Result<(), PlaybackError>;

    /// Begin or resume playback.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    /// Seek back to the start.
    fn rewind(&mut self);

    fn is_paused(&self) -> bool;
}

/// Minimal oscillator used by the fallback beeper.
pub trait TonePort {
    /// Emit one short tone.  Must not block for its duration.
    fn beep(&mut self, tone: &Tone) -> Result<(), PlaybackError>;
}

// ───────────────────────────────────────────────────────────────
// Outbound sinks
// ───────────────────────────────────────────────────────────────

/// Receives per-sensor alert messages (e.g. an embedded 3D viewer).
/// Delivery is best effort.
pub trait AlertSink {
    fn send(&mut self, message: &ViewerMessage);
}

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate
// ───────────────────────────────────────────────────────────────

/// Callback the [`Scheduler`](crate::scheduler::Scheduler) invokes when a
/// task comes due.  The scheduler knows nothing about polling or audio.
pub trait SchedulerDelegate {
    fn on_task_fired(&mut self, task: crate::scheduler::TaskId, label: &str);
}
