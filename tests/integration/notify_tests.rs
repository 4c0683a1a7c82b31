//! Viewer notifications driven by the service's notify task.

use floorwatch::config::DashboardConfig;
use floorwatch::notify::ViewerMessage;
use floorwatch::sensors::{LightState, MotionState, SensorSnapshot};

use super::mock_io::{Harness, audio, co2};

#[test]
fn one_message_per_sensor_each_second() {
    let mut h = Harness::new();
    h.source.push(vec![co2("A", 3000.0), co2("B", 400.0)]);
    h.start();
    assert!(h.alerts.messages.is_empty());

    h.tick(1000);
    assert_eq!(h.alerts.messages.len(), 2);
    h.tick(1000);
    h.tick(1000);
    assert_eq!(h.alerts.messages.len(), 6);
    assert_eq!(h.svc.metrics().alerts_sent, 6);

    let ViewerMessage::SensorAlerts(first) = &h.alerts.messages[0];
    assert_eq!(first.sensor_id, "A");
    assert!(first.alerts.gas.is_active);
    assert!(!first.alerts.fire.is_active);
}

#[test]
fn acknowledged_sensor_still_reports_alerts() {
    let mut h = Harness::new();
    h.source.push(vec![co2("A", 3000.0)]);
    h.start();
    h.acknowledge("A");

    h.tick(1000);
    let ViewerMessage::SensorAlerts(msg) = &h.alerts.messages[0];
    assert!(msg.alerts.gas.is_active);
}

#[test]
fn motion_and_light_flags_are_forwarded() {
    let mut h = Harness::new();
    h.source.push(vec![
        SensorSnapshot::normal("M")
            .with_motion(MotionState::Detection)
            .with_light(LightState::Error),
    ]);
    h.start();
    h.tick(1000);

    let json = h.alerts.messages[0].to_json().unwrap();
    assert!(json.contains(r#""type":"SENSOR_ALERTS""#));
    assert!(json.contains(r#""sensorId":"M""#));
    assert!(json.contains(r#""motion":{"isActive":true}"#));
    assert!(json.contains(r#""light":{"isActive":true}"#));
}

#[test]
fn disabled_notifications_send_nothing() {
    let config = DashboardConfig {
        notifications_enabled: false,
        ..DashboardConfig::default()
    };
    let mut h = Harness::with(config, audio());
    h.source.push(vec![co2("A", 3000.0)]);
    h.start();
    h.tick(1000);
    h.tick(1000);
    assert!(h.alerts.messages.is_empty());
}

#[test]
fn nothing_is_sent_before_first_batch() {
    let mut h = Harness::new();
    h.start(); // script is empty: poll fails
    h.tick(1000);
    assert!(h.alerts.messages.is_empty());
}
