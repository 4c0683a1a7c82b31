//! Fallback beeper.
//!
//! Used when the primary alarm sound cannot be played.  Emits one short
//! tone immediately on start, then one per `period_ms`.  The owner calls
//! `tick()` with the elapsed time and issues a beep whenever it returns
//! `true`; at most one beep is due per tick however long the gap was.

use serde::{Deserialize, Serialize};

/// Oscillator waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One synthesized tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub waveform: Waveform,
    pub frequency_hz: f32,
    pub duration_ms: u32,
    /// Linear gain, 0.0–1.0.
    pub gain: f32,
}

impl Default for Tone {
    fn default() -> Self {
        Self {
            waveform: Waveform::Triangle,
            frequency_hz: 800.0,
            duration_ms: 300,
            gain: 0.3,
        }
    }
}

/// Periodic tone scheduler.  Cancellable and idempotent.
#[derive(Debug)]
pub struct FallbackBeeper {
    period_ms: u32,
    phase_ms: u32,
    running: bool,
}

impl FallbackBeeper {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            phase_ms: 0,
            running: false,
        }
    }

    /// Start beeping.  Returns `true` when this call started it (the
    /// caller should beep right away), `false` if it was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.phase_ms = 0;
        true
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.phase_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `delta_ms`; `true` when a beep is due.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if !self.running {
            return false;
        }
        self.phase_ms = self.phase_ms.saturating_add(delta_ms);
        if self.phase_ms >= self.period_ms {
            self.phase_ms %= self.period_ms;
            true
        } else {
            false
        }
    }
}
