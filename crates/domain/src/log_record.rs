//! Rows of the append-only reading log.

use crate::actuator::ActuatorState;
use crate::reading::Reading;
use crate::time::{Timestamp, format_local};

/// Column titles written once at the top of a fresh log.
pub const LOG_HEADER: [&str; 5] = [
    "Timestamp",
    "Temperature (C)",
    "Humidity (%)",
    "Fan Status",
    "Pump Status",
];

/// One accepted reading, as written to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: Timestamp,
    pub temperature: i64,
    pub humidity: i64,
    pub fan_on: bool,
    pub pump_on: bool,
}

impl LogRecord {
    #[must_use]
    pub fn new(timestamp: Timestamp, reading: Reading, actuators: ActuatorState) -> Self {
        Self {
            timestamp,
            temperature: reading.temperature,
            humidity: reading.humidity,
            fan_on: actuators.fan_on,
            pump_on: actuators.pump_on,
        }
    }

    /// Column values in header order: local time, integers, `ON`/`OFF`.
    #[must_use]
    pub fn fields(&self) -> [String; 5] {
        [
            format_local(self.timestamp),
            self.temperature.to_string(),
            self.humidity.to_string(),
            on_off(self.fan_on).to_owned(),
            on_off(self.pump_on).to_owned(),
        ]
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::derive;
    use crate::time::now;

    #[test]
    fn should_render_fields_in_header_order() {
        let ts = now();
        let reading = Reading::new(31, 39);
        let record = LogRecord::new(ts, reading, derive(reading));

        let fields = record.fields();
        assert_eq!(fields[0], format_local(ts));
        assert_eq!(fields[1..], ["31", "39", "ON", "ON"]);
    }

    #[test]
    fn should_render_off_flags() {
        let reading = Reading::new(-3, 85);
        let record = LogRecord::new(now(), reading, derive(reading));
        assert_eq!(record.fields()[1..], ["-3", "85", "OFF", "OFF"]);
    }

    #[test]
    fn should_have_five_header_columns() {
        let record = LogRecord::new(now(), Reading::new(0, 0), ActuatorState::default());
        assert_eq!(LOG_HEADER.len(), record.fields().len());
        assert_eq!(LOG_HEADER[0], "Timestamp");
    }
}
