//! Dashboard service, the hexagonal core.
//!
//! [`DashboardService`] owns the alarm tracker, the audio driver, the
//! notification emitter and the scheduler.  The host drives it with
//! `tick(delta_ms, ..)` and UI commands; every I/O side goes through port
//! traits passed in at the call site.
//!
//! ```text
//!  SensorSource ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                   │      DashboardService       │ ──▶ AlertSink
//!  AppCommand   ──▶ │ tracker · audio · scheduler │
//!                   └─────────────────────────────┘
//! ```
//!
//! Polling self-reschedules: the next poll is armed only after the
//! current one completes, so a slow backend lowers the effective rate.

use log::{info, warn};

use crate::alarm::{AlarmTracker, AlarmTrackerState};
use crate::audio::{AudioAlarmDriver, AudioState};
use crate::config::{DashboardConfig, validate_thresholds};
use crate::diagnostics::RuntimeMetrics;
use crate::error::Result;
use crate::notify::NotificationEmitter;
use crate::safety::DangerVerdict;
use crate::scheduler::{Scheduler, Task, TaskId};
use crate::sensors::thresholds::ThresholdTable;
use crate::sensors::{SensorSnapshot, SnapshotBatch};
use crate::stats::SensorSummary;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{
    AlertSink, EventSink, PlaybackPort, SchedulerDelegate, SensorSource, TonePort,
};

const POLL_TASK: &str = "poll";
const NOTIFY_TASK: &str = "notify";

/// Collects the tasks that fired during one scheduler tick.
#[derive(Default)]
struct DueTasks(Vec<TaskId>);

impl SchedulerDelegate for DueTasks {
    fn on_task_fired(&mut self, task: TaskId, _label: &str) {
        self.0.push(task);
    }
}

// ───────────────────────────────────────────────────────────────
// DashboardService
// ───────────────────────────────────────────────────────────────

pub struct DashboardService<P: PlaybackPort, T: TonePort> {
    config: DashboardConfig,
    thresholds: ThresholdTable,
    tracker: AlarmTracker,
    audio: AudioAlarmDriver<P, T>,
    emitter: NotificationEmitter,
    scheduler: Scheduler,
    poll_task: Option<TaskId>,
    notify_task: Option<TaskId>,
    /// Snapshots of the last applied batch.
    latest: Vec<SensorSnapshot>,
    last_sequence: Option<u64>,
    metrics: RuntimeMetrics,
    running: bool,
}

impl<P: PlaybackPort, T: TonePort> DashboardService<P, T> {
    /// Validate `config` and take ownership of the audio resources.
    ///
    /// Does **not** start polling; call [`start`](Self::start) next.
    pub fn new(config: DashboardConfig, playback: P, tone: T) -> Result<Self> {
        config.validate()?;
        let thresholds = config.threshold_table();
        let audio = AudioAlarmDriver::new(playback, tone, &config.audio);
        Ok(Self {
            config,
            thresholds,
            tracker: AlarmTracker::new(),
            audio,
            emitter: NotificationEmitter::new(),
            scheduler: Scheduler::new(),
            poll_task: None,
            notify_task: None,
            latest: Vec::new(),
            last_sequence: None,
            metrics: RuntimeMetrics::default(),
            running: false,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Poll once immediately and arm the recurring tasks.
    pub fn start(&mut self, source: &mut impl SensorSource, sink: &mut impl EventSink) {
        if self.running {
            return;
        }
        self.running = true;
        sink.emit(&AppEvent::Started);
        info!(
            "Dashboard started (poll every {}ms, notify every {}ms)",
            self.config.poll_interval_ms, self.config.notify_interval_ms
        );

        if self.config.notifications_enabled {
            self.notify_task = Some(
                self.scheduler
                    .add(Task::repeating(NOTIFY_TASK, self.config.notify_interval_ms)),
            );
        }
        self.poll(source, sink);
    }

    /// Silence audio and cancel every timer.  Idempotent.
    pub fn teardown(&mut self, sink: &mut impl EventSink) {
        if !self.running {
            self.audio.teardown();
            return;
        }
        self.running = false;
        self.scheduler.cancel_all();
        self.poll_task = None;
        self.notify_task = None;
        self.audio.teardown();
        sink.emit(&AppEvent::Stopped);
        info!("Dashboard stopped");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Advance time: run due polls and notifications, drive the beeper.
    pub fn tick(
        &mut self,
        delta_ms: u32,
        source: &mut impl SensorSource,
        alerts: &mut impl AlertSink,
        sink: &mut impl EventSink,
    ) {
        if !self.running {
            return;
        }
        self.metrics.uptime_ms += u64::from(delta_ms);

        let mut due = DueTasks::default();
        self.scheduler.tick(delta_ms, &mut due);
        for task in due.0 {
            if Some(task) == self.poll_task {
                self.poll_task = None;
                self.poll(source, sink);
            } else if Some(task) == self.notify_task {
                self.emit_alerts(alerts);
            }
        }

        self.audio.tick(delta_ms);
    }

    /// Poll right away instead of waiting for the armed poll.
    pub fn poll_now(&mut self, source: &mut impl SensorSource, sink: &mut impl EventSink) {
        if !self.running {
            return;
        }
        if let Some(task) = self.poll_task.take() {
            self.scheduler.cancel(task);
        }
        self.poll(source, sink);
    }

    /// Apply a batch delivered out of band (e.g. pushed by the backend).
    ///
    /// Batches carrying a sequence number not newer than the last applied
    /// one are discarded.
    pub fn apply_batch(&mut self, batch: SnapshotBatch, sink: &mut impl EventSink) {
        if let (Some(sequence), Some(last_applied)) = (batch.sequence, self.last_sequence) {
            if sequence <= last_applied {
                warn!("Dropping stale batch #{sequence} (last applied #{last_applied})");
                self.metrics.stale_batches += 1;
                sink.emit(&AppEvent::StaleBatchDropped {
                    sequence,
                    last_applied,
                });
                return;
            }
        }
        if batch.sequence.is_some() {
            self.last_sequence = batch.sequence;
        }
        self.latest = batch.snapshots;
        self.reevaluate(sink);
        self.metrics.snapshots_dropped += self.tracker.dropped_in_last_batch() as u64;
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) -> Result<()> {
        match cmd {
            AppCommand::Acknowledge(sensor_id) => {
                let was_active = self.tracker.alarm_active();
                self.tracker.acknowledge(&sensor_id);
                self.metrics.acknowledgements += 1;
                sink.emit(&AppEvent::Acknowledged { sensor_id });
                self.after_tracker_change(was_active, sink);
            }
            AppCommand::UserInteraction => {
                if !self.audio.is_unlocked() {
                    sink.emit(&AppEvent::AudioUnlocked);
                    let before = self.audio.fallback_count();
                    self.audio.unlock();
                    self.note_fallback(before, sink);
                }
            }
            AppCommand::UpdateThresholds(entries) => {
                validate_thresholds(&entries)?;
                self.thresholds = ThresholdTable::from_entries(&entries);
                info!("Thresholds updated ({} entries)", entries.len());
                sink.emit(&AppEvent::ThresholdsUpdated {
                    count: entries.len(),
                });
                self.config.thresholds = entries;
                self.reevaluate(sink);
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &AlarmTrackerState {
        self.tracker.state()
    }

    pub fn alarm_active(&self) -> bool {
        self.tracker.alarm_active()
    }

    pub fn verdict(&self, sensor_id: &str) -> Option<&DangerVerdict> {
        self.tracker.verdict(sensor_id)
    }

    pub fn latest_snapshots(&self) -> &[SensorSnapshot] {
        &self.latest
    }

    pub fn summary(&self) -> SensorSummary {
        SensorSummary::from_snapshots(&self.latest, &self.thresholds)
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn audio_state(&self) -> AudioState {
        self.audio.state()
    }

    pub fn audio(&self) -> &AudioAlarmDriver<P, T> {
        &self.audio
    }

    pub fn metrics(&self) -> RuntimeMetrics {
        self.metrics
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a poll is armed (false only while one is in progress or
    /// after teardown).
    pub fn poll_pending(&self) -> bool {
        self.poll_task.is_some_and(|t| self.scheduler.is_scheduled(t))
    }

    // ── Internal ──────────────────────────────────────────────

    fn poll(&mut self, source: &mut impl SensorSource, sink: &mut impl EventSink) {
        match source.fetch() {
            Ok(batch) => {
                self.metrics.polls_ok += 1;
                self.apply_batch(batch, sink);
            }
            Err(e) => {
                self.metrics.polls_failed += 1;
                warn!("Poll failed: {e}; keeping last known state");
                sink.emit(&AppEvent::PollFailed(e));
            }
        }
        // Re-arm only after the attempt has completed.
        if self.running {
            self.poll_task = Some(
                self.scheduler
                    .add(Task::one_shot(POLL_TASK, self.config.poll_interval_ms)),
            );
        }
    }

    fn reevaluate(&mut self, sink: &mut impl EventSink) {
        let was_active = self.tracker.alarm_active();
        let state = self.tracker.on_snapshot_batch(&self.latest, &self.thresholds);
        let active = state.active_alarm_ids.len();
        sink.emit(&AppEvent::BatchApplied {
            sensors: self.latest.len(),
            active,
        });
        self.after_tracker_change(was_active, sink);
    }

    fn after_tracker_change(&mut self, was_active: bool, sink: &mut impl EventSink) {
        let now_active = self.tracker.alarm_active();
        if now_active && !was_active {
            self.metrics.alarms_raised += 1;
            let sensor_ids: Vec<String> =
                self.tracker.state().active_alarm_ids.iter().cloned().collect();
            warn!("ALARM raised by {}", sensor_ids.join(", "));
            sink.emit(&AppEvent::AlarmRaised { sensor_ids });
        } else if was_active && !now_active {
            info!("Alarm cleared");
            sink.emit(&AppEvent::AlarmCleared);
        }

        let before = self.audio.fallback_count();
        self.audio.set_alarm_active(now_active);
        self.note_fallback(before, sink);
    }

    fn note_fallback(&mut self, before: u32, sink: &mut impl EventSink) {
        let after = self.audio.fallback_count();
        if after > before {
            self.metrics.playback_fallbacks = after;
            sink.emit(&AppEvent::PlaybackFallback);
        }
    }

    fn emit_alerts(&mut self, alerts: &mut impl AlertSink) {
        let sent = self
            .emitter
            .emit_alerts(&self.latest, &self.thresholds, alerts);
        self.metrics.alerts_sent += sent as u64;
    }
}
