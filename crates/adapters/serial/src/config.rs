//! Serial link configuration.

use std::time::Duration;

use serde::Deserialize;

/// Device name used when nothing is configured.
#[cfg(windows)]
pub const DEFAULT_PORT: &str = "COM2";
/// Device name used when nothing is configured.
#[cfg(not(windows))]
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Configuration for the serial link to the greenhouse controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device name (e.g. `COM2`, `/dev/ttyUSB0`).
    pub port: String,
    /// Baud rate; the controller firmware talks at 9600.
    pub baud: u32,
    /// Upper bound on a single blocking read, in milliseconds.
    pub read_timeout_ms: u64,
}

impl SerialConfig {
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud: 9600,
            read_timeout_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = SerialConfig::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.baud, 9600);
        assert_eq!(config.read_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            port = "/dev/ttyACM0"
            baud = 115200
            read_timeout_ms = 250
        "#;
        let config: SerialConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.port, "/dev/ttyACM0");
        assert_eq!(config.baud, 115_200);
        assert_eq!(config.read_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: SerialConfig = toml::from_str(r#"port = "COM7""#).unwrap();
        assert_eq!(config.port, "COM7");
        assert_eq!(config.baud, 9600);
        assert_eq!(config.read_timeout_ms, 1000);
    }
}
