//! Mock host adapters for integration tests.
//!
//! Records every audio call into a shared log so tests can assert on the
//! full history even after the service (and its driver) is dropped.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use floorwatch::app::commands::AppCommand;
use floorwatch::app::events::AppEvent;
use floorwatch::app::ports::{AlertSink, EventSink, PlaybackPort, SensorSource, TonePort};
use floorwatch::app::service::DashboardService;
use floorwatch::audio::beeper::Tone;
use floorwatch::config::DashboardConfig;
use floorwatch::error::{PlaybackError, TransportError};
use floorwatch::notify::ViewerMessage;
use floorwatch::sensors::{SensorSnapshot, SensorStatus, SnapshotBatch};

// ── Audio call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    Prepare(String),
    Play,
    Pause,
    Rewind,
    Beep,
}

pub type CallLog = Rc<RefCell<Vec<AudioCall>>>;

pub fn count(log: &CallLog, call: &AudioCall) -> usize {
    log.borrow().iter().filter(|c| *c == call).count()
}

// ── MockPlayback / MockTone ───────────────────────────────────

pub struct MockPlayback {
    log: CallLog,
    paused: bool,
    fail_with: Option<PlaybackError>,
}

impl PlaybackPort for MockPlayback {
    fn prepare(&mut self, asset: &str) -> Result<(), PlaybackError> {
        self.log.borrow_mut().push(AudioCall::Prepare(asset.to_string()));
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.log.borrow_mut().push(AudioCall::Play);
        match self.fail_with {
            Some(e) => Err(e),
            None => {
                self.paused = false;
                Ok(())
            }
        }
    }

    fn pause(&mut self) {
        self.log.borrow_mut().push(AudioCall::Pause);
        self.paused = true;
    }

    fn rewind(&mut self) {
        self.log.borrow_mut().push(AudioCall::Rewind);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

pub struct MockTone {
    log: CallLog,
}

impl TonePort for MockTone {
    fn beep(&mut self, _tone: &Tone) -> Result<(), PlaybackError> {
        self.log.borrow_mut().push(AudioCall::Beep);
        Ok(())
    }
}

/// Working playback + tone generator sharing one log.
pub fn audio() -> (MockPlayback, MockTone, CallLog) {
    audio_failing(None)
}

/// Playback whose `play()` always fails with `fail_with`.
pub fn audio_failing(fail_with: Option<PlaybackError>) -> (MockPlayback, MockTone, CallLog) {
    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    (
        MockPlayback {
            log: log.clone(),
            paused: true,
            fail_with,
        },
        MockTone { log: log.clone() },
        log,
    )
}

// ── ScriptedSource ────────────────────────────────────────────

/// Replays queued poll responses; an exhausted script reports the
/// backend as unavailable.
#[derive(Default)]
pub struct ScriptedSource {
    responses: VecDeque<Result<SnapshotBatch, TransportError>>,
    pub fetches: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshots: Vec<SensorSnapshot>) -> &mut Self {
        self.responses.push_back(Ok(SnapshotBatch::new(snapshots)));
        self
    }

    pub fn push_batch(&mut self, batch: SnapshotBatch) -> &mut Self {
        self.responses.push_back(Ok(batch));
        self
    }

    pub fn push_err(&mut self, err: TransportError) -> &mut Self {
        self.responses.push_back(Err(err));
        self
    }
}

impl SensorSource for ScriptedSource {
    fn fetch(&mut self) -> Result<SnapshotBatch, TransportError> {
        self.fetches += 1;
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Unavailable("script exhausted".into())))
    }
}

// ── Recording sinks ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Vec<AppEvent>,
}

impl RecordingEvents {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingEvents {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    pub messages: Vec<ViewerMessage>,
}

impl AlertSink for RecordingAlerts {
    fn send(&mut self, message: &ViewerMessage) {
        self.messages.push(message.clone());
    }
}

// ── Snapshot helpers ──────────────────────────────────────────

pub fn co2(id: &str, ppm: f64) -> SensorSnapshot {
    SensorSnapshot::normal(id)
        .with_status(SensorStatus::Normal)
        .with_metric("co2", ppm)
}

// ── Harness ───────────────────────────────────────────────────

/// A service wired to scripted/recording mocks.
pub struct Harness {
    pub svc: DashboardService<MockPlayback, MockTone>,
    pub source: ScriptedSource,
    pub events: RecordingEvents,
    pub alerts: RecordingAlerts,
    pub log: CallLog,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(DashboardConfig::default(), audio())
    }

    pub fn with(config: DashboardConfig, audio: (MockPlayback, MockTone, CallLog)) -> Self {
        let (playback, tone, log) = audio;
        Self {
            svc: DashboardService::new(config, playback, tone).unwrap(),
            source: ScriptedSource::new(),
            events: RecordingEvents::default(),
            alerts: RecordingAlerts::default(),
            log,
        }
    }

    pub fn start(&mut self) {
        self.svc.start(&mut self.source, &mut self.events);
    }

    pub fn tick(&mut self, delta_ms: u32) {
        self.svc
            .tick(delta_ms, &mut self.source, &mut self.alerts, &mut self.events);
    }

    pub fn command(&mut self, cmd: AppCommand) -> floorwatch::error::Result<()> {
        self.svc.handle_command(cmd, &mut self.events)
    }

    pub fn unlock(&mut self) {
        self.command(AppCommand::UserInteraction).unwrap();
    }

    pub fn acknowledge(&mut self, sensor_id: &str) {
        self.command(AppCommand::Acknowledge(sensor_id.to_string()))
            .unwrap();
    }

    pub fn plays(&self) -> usize {
        count(&self.log, &AudioCall::Play)
    }

    pub fn pauses(&self) -> usize {
        count(&self.log, &AudioCall::Pause)
    }

    pub fn beeps(&self) -> usize {
        count(&self.log, &AudioCall::Beep)
    }
}
