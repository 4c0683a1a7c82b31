//! Unified error types for the dashboard alarm core.
//!
//! A single `Error` enum that every subsystem converts into. None of these
//! are fatal: the service logs them and keeps showing last-known state.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sensor batch could not be fetched or decoded.
    Transport(TransportError),
    /// The alarm sound could not be played.
    Playback(PlaybackError),
    /// A single snapshot record was unusable.
    Snapshot(SnapshotError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Playback(e) => write!(f, "playback: {e}"),
            Self::Snapshot(e) => write!(f, "snapshot: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Failures of the sensor-polling collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Backend unreachable or the source could not be read.
    Unavailable(String),
    /// Backend answered with a non-success status code.
    Status(u16),
    /// Response body was not a valid sensor list.
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(why) => write!(f, "source unavailable: {why}"),
            Self::Status(code) => write!(f, "unexpected status {code}"),
            Self::Decode(why) => write!(f, "decode failed: {why}"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Playback errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackError {
    /// The alarm asset could not be loaded or decoded.
    LoadFailed,
    /// Playback was refused by the host (autoplay policy).
    Blocked,
    /// No tone generator is available for the fallback beeper.
    ToneUnavailable,
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailed => write!(f, "alarm asset failed to load"),
            Self::Blocked => write!(f, "playback blocked by host policy"),
            Self::ToneUnavailable => write!(f, "tone generator unavailable"),
        }
    }
}

impl std::error::Error for PlaybackError {}

impl From<PlaybackError> for Error {
    fn from(e: PlaybackError) -> Self {
        Self::Playback(e)
    }
}

// ---------------------------------------------------------------------------
// Snapshot errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// Record carried no sensor identifier.
    MissingId,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId => write!(f, "missing sensor id"),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<SnapshotError> for Error {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
