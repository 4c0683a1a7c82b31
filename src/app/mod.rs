//! Application core: alarm orchestration with zero I/O.
//!
//! The service wires the tracker, audio driver, notification emitter and
//! scheduler together.  All interaction with the host happens through
//! **port traits** defined in [`ports`], keeping this layer testable
//! without a browser.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
