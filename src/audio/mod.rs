//! Audio alarm driver.
//!
//! ```text
//!            alarm_active && unlocked
//!   ┌──────┐ ───────────────────────▶ ┌──────────────────────────┐
//!   │ Idle │                          │ Sounding(Primary|Fallback)│
//!   └──────┘ ◀─────────────────────── └──────────────────────────┘
//!             !alarm_active || teardown
//! ```
//!
//! The driver exclusively owns the looping playback handle and the tone
//! generator; nothing else may start or stop them.  Re-asserting an
//! already-sounding alarm is a no-op, so playback never stutters.
//!
//! Playback may only begin after the host has seen a user interaction
//! (`unlock()`).  Until then `alarm_active` is recorded but silent.
//!
//! If the primary sound fails to load or play, the driver switches to
//! the [`FallbackBeeper`] for the rest of the episode.

pub mod beeper;

use log::{error, info, warn};

use crate::app::ports::{PlaybackPort, TonePort};
use crate::config::AudioConfig;
use crate::error::PlaybackError;
use beeper::{FallbackBeeper, Tone};

/// Which output is carrying the alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmOutput {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    Idle,
    Sounding(AlarmOutput),
}

impl AudioState {
    pub fn is_sounding(self) -> bool {
        matches!(self, Self::Sounding(_))
    }
}

pub struct AudioAlarmDriver<P: PlaybackPort, T: TonePort> {
    playback: P,
    tone_port: T,
    asset: String,
    tone: Tone,
    beeper: FallbackBeeper,
    /// `prepare()` succeeded on the playback handle.
    prepared: bool,
    /// Host allows audio (a user interaction was seen).
    unlocked: bool,
    /// Latest value pushed by the tracker.
    alarm_active: bool,
    state: AudioState,
    torn_down: bool,
    fallback_count: u32,
}

impl<P: PlaybackPort, T: TonePort> AudioAlarmDriver<P, T> {
    pub fn new(playback: P, tone_port: T, config: &AudioConfig) -> Self {
        Self {
            playback,
            tone_port,
            asset: config.alarm_asset.clone(),
            tone: config.fallback_tone,
            beeper: FallbackBeeper::new(config.fallback_period_ms),
            prepared: false,
            unlocked: false,
            alarm_active: false,
            state: AudioState::Idle,
            torn_down: false,
            fallback_count: 0,
        }
    }

    // ── Inputs ────────────────────────────────────────────────

    /// Record the tracker's aggregate alarm flag and act on edges.
    pub fn set_alarm_active(&mut self, active: bool) {
        if self.torn_down {
            return;
        }
        self.alarm_active = active;
        self.sync();
    }

    /// Open the autoplay gate.  Idempotent.
    pub fn unlock(&mut self) {
        if self.unlocked || self.torn_down {
            return;
        }
        self.unlocked = true;
        info!("Audio: unlocked by user interaction");
        self.sync();
    }

    /// Advance the fallback beeper.
    pub fn tick(&mut self, delta_ms: u32) {
        if self.beeper.tick(delta_ms) {
            self.beep();
        }
    }

    /// Stop everything.  Safe to call repeatedly; only the first call
    /// touches the playback handle.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.alarm_active = false;
        self.halt();
        info!("Audio: torn down");
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> AudioState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Alarm requested, whether or not it is audible yet.
    pub fn alarm_requested(&self) -> bool {
        self.alarm_active
    }

    /// Episodes that had to fall back to the beeper.
    pub fn fallback_count(&self) -> u32 {
        self.fallback_count
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn tone_port(&self) -> &T {
        &self.tone_port
    }

    // ── Internal ──────────────────────────────────────────────

    fn sync(&mut self) {
        let want = self.alarm_active && self.unlocked;
        match (want, self.state) {
            (true, AudioState::Idle) => self.start(),
            (false, AudioState::Sounding(_)) => self.halt(),
            _ => {}
        }
    }

    fn start(&mut self) {
        match self.start_primary() {
            Ok(()) => {
                info!("Audio: alarm sounding ({})", self.asset);
                self.state = AudioState::Sounding(AlarmOutput::Primary);
            }
            Err(e) => {
                warn!("Audio: primary playback failed ({e}), using fallback beeper");
                self.start_fallback();
            }
        }
    }

    fn start_primary(&mut self) -> Result<(), PlaybackError> {
        if !self.prepared {
            self.playback.prepare(&self.asset)?;
            self.prepared = true;
        }
        if self.playback.is_paused() {
            self.playback.play()?;
        }
        Ok(())
    }

    fn start_fallback(&mut self) {
        self.fallback_count += 1;
        self.state = AudioState::Sounding(AlarmOutput::Fallback);
        if self.beeper.start() {
            self.beep();
        }
    }

    fn beep(&mut self) {
        if let Err(e) = self.tone_port.beep(&self.tone) {
            error!("Audio: fallback tone failed: {e}");
        }
    }

    /// Stop and rewind the primary sound and cancel the beeper.
    fn halt(&mut self) {
        self.playback.pause();
        self.playback.rewind();
        self.beeper.cancel();
        if self.state.is_sounding() {
            info!("Audio: alarm silenced");
        }
        self.state = AudioState::Idle;
    }
}

impl<P: PlaybackPort, T: TonePort> Drop for AudioAlarmDriver<P, T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
