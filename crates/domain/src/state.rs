//! Latest known greenhouse state and serial link status.
//!
//! The serialized form is the dashboard contract: short field names, the
//! timestamp as UNIX seconds (`0` before the first reading) and the status
//! as a capitalized word.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::actuator::ActuatorState;
use crate::log_record::LogRecord;
use crate::reading::Reading;
use crate::time::{Timestamp, unix_seconds};

/// Status of the serial link.
///
/// ```text
/// Disconnected ──open ok──▶ Connected ──first reading──▶ Online
///      ▲                        │                           │
///      └──────── link fault ────┴───────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ConnectionStatus {
    /// The device is not open.
    #[default]
    Disconnected,
    /// The device is open but no reading has been accepted since it opened.
    Connected,
    /// At least one reading has been accepted since the device opened.
    Online,
}

impl ConnectionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::Connected => "Connected",
            Self::Online => "Online",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The most recent reading, its derived actuator flags, and the link status.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LatestState {
    #[serde(rename = "temp")]
    pub temperature: i64,
    #[serde(rename = "humid")]
    pub humidity: i64,
    #[serde(rename = "fan")]
    pub fan_on: bool,
    #[serde(rename = "pump")]
    pub pump_on: bool,
    /// When the last reading was accepted. Never moves backward.
    #[serde(serialize_with = "serialize_unix_seconds")]
    pub last_updated: Option<Timestamp>,
    #[serde(rename = "status")]
    pub connection_status: ConnectionStatus,
}

impl LatestState {
    /// Fold an accepted reading into the state and return its log row.
    ///
    /// All fields change together and the status becomes
    /// [`ConnectionStatus::Online`].
    pub fn record(
        &mut self,
        reading: Reading,
        actuators: ActuatorState,
        at: Timestamp,
    ) -> LogRecord {
        let at = self.last_updated.map_or(at, |prev| prev.max(at));

        self.temperature = reading.temperature;
        self.humidity = reading.humidity;
        self.fan_on = actuators.fan_on;
        self.pump_on = actuators.pump_on;
        self.last_updated = Some(at);
        self.connection_status = ConnectionStatus::Online;

        LogRecord::new(at, reading, actuators)
    }

    /// The device was opened; data is not validated yet.
    pub fn mark_connected(&mut self) {
        self.connection_status = ConnectionStatus::Connected;
    }

    /// The device is closed or failed to open. The last reading is kept.
    pub fn mark_disconnected(&mut self) {
        self.connection_status = ConnectionStatus::Disconnected;
    }
}

#[allow(clippy::ref_option)]
fn serialize_unix_seconds<S: Serializer>(
    ts: &Option<Timestamp>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(ts.map_or(0.0, unix_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::derive;
    use chrono::{DateTime, TimeDelta};

    fn at(secs: i64) -> Timestamp {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn should_start_disconnected_and_empty() {
        let state = LatestState::default();
        assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
        assert_eq!(state.temperature, 0);
        assert_eq!(state.humidity, 0);
        assert!(!state.fan_on);
        assert!(!state.pump_on);
        assert!(state.last_updated.is_none());
    }

    #[test]
    fn should_record_reading_and_go_online() {
        let mut state = LatestState::default();
        state.mark_connected();

        let reading = Reading::new(31, 39);
        let record = state.record(reading, derive(reading), at(1_000));

        assert_eq!(state.temperature, 31);
        assert_eq!(state.humidity, 39);
        assert!(state.fan_on);
        assert!(state.pump_on);
        assert_eq!(state.last_updated, Some(at(1_000)));
        assert_eq!(state.connection_status, ConnectionStatus::Online);

        assert_eq!(record.timestamp, at(1_000));
        assert_eq!(record.temperature, 31);
        assert!(record.fan_on);
    }

    #[test]
    fn should_never_move_last_updated_backward() {
        let mut state = LatestState::default();
        let reading = Reading::new(20, 50);
        state.record(reading, derive(reading), at(2_000));

        let earlier = at(2_000) - TimeDelta::seconds(30);
        let record = state.record(reading, derive(reading), earlier);

        assert_eq!(state.last_updated, Some(at(2_000)));
        assert_eq!(record.timestamp, at(2_000));
    }

    #[test]
    fn should_keep_reading_when_disconnected() {
        let mut state = LatestState::default();
        let reading = Reading::new(22, 45);
        state.record(reading, derive(reading), at(10));
        state.mark_disconnected();

        assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
        assert_eq!(state.temperature, 22);
        assert_eq!(state.last_updated, Some(at(10)));
    }

    #[test]
    fn should_demote_online_to_connected_on_reopen() {
        let mut state = LatestState::default();
        let reading = Reading::new(22, 45);
        state.record(reading, derive(reading), at(10));
        state.mark_disconnected();
        state.mark_connected();
        assert_eq!(state.connection_status, ConnectionStatus::Connected);
    }

    #[test]
    fn should_serialize_dashboard_field_names() {
        let mut state = LatestState::default();
        let reading = Reading::new(31, 39);
        state.record(reading, derive(reading), at(1_700_000_000));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "temp": 31,
                "humid": 39,
                "fan": true,
                "pump": true,
                "last_updated": 1_700_000_000.0,
                "status": "Online",
            })
        );
    }

    #[test]
    fn should_serialize_missing_timestamp_as_zero() {
        let json = serde_json::to_value(LatestState::default()).unwrap();
        assert_eq!(json["last_updated"], serde_json::json!(0.0));
        assert_eq!(json["status"], "Disconnected");
    }

    #[test]
    fn should_display_status() {
        assert_eq!(ConnectionStatus::Online.to_string(), "Online");
        assert_eq!(ConnectionStatus::Connected.as_str(), "Connected");
    }
}
