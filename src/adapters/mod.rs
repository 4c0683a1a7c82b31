//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements    | Connects to               |
//! |-------------|---------------|---------------------------|
//! | `json_file` | SensorSource  | sensor-list JSON on disk  |
//! | `log_sink`  | EventSink     | `log` output              |
//! |             | AlertSink     | `log` output              |
//!
//! Browser adapters (audio element, oscillator, iframe bridge) live with
//! the host and implement the same traits.

pub mod json_file;
pub mod log_sink;
