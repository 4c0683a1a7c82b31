//! Floorwatch: alarm core of a floor-plan sensor dashboard.
//!
//! Ingests sensor snapshot batches, classifies danger, tracks operator
//! acknowledgements, drives a single looping audio alarm and forwards
//! per-sensor alerts to an embedded viewer.  All host interaction (REST
//! polling, audio, viewer bridge) goes through the traits in
//! [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod alarm;
pub mod app;
pub mod audio;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notify;
pub mod safety;
pub mod scheduler;
pub mod sensors;
pub mod stats;
