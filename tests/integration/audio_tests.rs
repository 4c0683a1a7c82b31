//! Audio driver behaviour observed through the service.

use floorwatch::app::events::AppEvent;
use floorwatch::audio::{AlarmOutput, AudioState};
use floorwatch::config::DashboardConfig;
use floorwatch::error::PlaybackError;

use super::mock_io::{AudioCall, Harness, audio_failing, co2, count};

#[test]
fn consecutive_danger_batches_play_once() {
    let mut h = Harness::new();
    h.source
        .push(vec![co2("A", 3000.0)])
        .push(vec![co2("A", 3200.0)])
        .push(vec![co2("A", 3400.0), co2("B", 5000.0)]);
    h.unlock();
    h.start();
    h.tick(3000);
    h.tick(3000);

    assert_eq!(h.plays(), 1);
    assert_eq!(count(&h.log, &AudioCall::Prepare("/sounds/emergency_bell.mp3".into())), 1);
    assert_eq!(h.pauses(), 0);
    assert_eq!(h.svc.audio_state(), AudioState::Sounding(AlarmOutput::Primary));
}

#[test]
fn locked_audio_waits_for_interaction() {
    let mut h = Harness::new();
    h.source.push(vec![co2("A", 3000.0)]);
    h.start();

    assert!(h.svc.alarm_active());
    assert_eq!(h.svc.audio_state(), AudioState::Idle);
    assert_eq!(h.plays(), 0);

    h.unlock();
    assert_eq!(h.plays(), 1);
    assert!(h.events.events.contains(&AppEvent::AudioUnlocked));

    // A second interaction changes nothing.
    h.unlock();
    assert_eq!(h.plays(), 1);
    assert_eq!(h.events.count(|e| *e == AppEvent::AudioUnlocked), 1);
}

#[test]
fn teardown_while_sounding_stops_once() {
    let mut h = Harness::new();
    h.source.push(vec![co2("A", 3000.0)]);
    h.unlock();
    h.start();
    assert!(h.svc.audio_state().is_sounding());

    h.svc.teardown(&mut h.events);
    h.svc.teardown(&mut h.events);
    let log = h.log.clone();
    drop(h);

    assert_eq!(count(&log, &AudioCall::Pause), 1);
    assert_eq!(count(&log, &AudioCall::Rewind), 1);
}

#[test]
fn dropping_service_silences_alarm() {
    let mut h = Harness::new();
    h.source.push(vec![co2("A", 3000.0)]);
    h.unlock();
    h.start();
    let log = h.log.clone();
    drop(h);

    assert_eq!(count(&log, &AudioCall::Pause), 1);
}

#[test]
fn blocked_playback_beeps_every_period() {
    let mut h = Harness::with(
        DashboardConfig::default(),
        audio_failing(Some(PlaybackError::Blocked)),
    );
    h.source.push(vec![co2("A", 3000.0)]);
    h.unlock();
    h.start();

    assert_eq!(h.svc.audio_state(), AudioState::Sounding(AlarmOutput::Fallback));
    assert_eq!(h.beeps(), 1);
    assert_eq!(h.events.count(|e| *e == AppEvent::PlaybackFallback), 1);
    assert_eq!(h.svc.metrics().playback_fallbacks, 1);

    h.tick(1000);
    h.tick(1000);
    assert_eq!(h.beeps(), 3);

    h.acknowledge("A");
    assert_eq!(h.svc.audio_state(), AudioState::Idle);
    h.tick(1000);
    h.tick(1000);
    assert_eq!(h.beeps(), 3);
}

#[test]
fn failed_load_falls_back() {
    let mut h = Harness::with(
        DashboardConfig::default(),
        audio_failing(Some(PlaybackError::LoadFailed)),
    );
    h.source.push(vec![co2("A", 3000.0)]);
    h.unlock();
    h.start();

    assert_eq!(h.svc.audio_state(), AudioState::Sounding(AlarmOutput::Fallback));
    assert!(h.beeps() >= 1);
}
