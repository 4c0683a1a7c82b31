//! Fuzz target: `decode_sensor_list` feeding the alarm tracker.
//!
//! Arbitrary bytes must never panic the decoder, and whatever it accepts
//! must classify cleanly with every record attributable to a sensor.
//!
//! cargo fuzz run fuzz_sensor_list

#![no_main]

use floorwatch::alarm::AlarmTracker;
use floorwatch::sensors::thresholds::ThresholdTable;
use floorwatch::sensors::wire::decode_sensor_list;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(snapshots) = decode_sensor_list(data) else {
        return;
    };
    assert!(snapshots.iter().all(|s| !s.is_malformed()));

    let mut tracker = AlarmTracker::new();
    let state = tracker.on_snapshot_batch(&snapshots, &ThresholdTable::new());
    assert!(state.acknowledged_ids.is_empty());
    assert_eq!(state.alarm_active, !state.active_alarm_ids.is_empty());
    assert_eq!(tracker.dropped_in_last_batch(), 0);
});
