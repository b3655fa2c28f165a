//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `greenhouse.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use greenhouse_adapter_serial::SerialConfig;
use greenhouse_app::reader_loop::ReaderConfig;

const CONFIG_FILE: &str = "greenhouse.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Serial link settings.
    pub serial: SerialConfig,
    /// Reader loop timing.
    pub reader: ReaderSettings,
    /// Reading log settings.
    pub log: LogConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Reader loop timing, in milliseconds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    /// Delay between two polls of an open link.
    pub poll_interval_ms: u64,
    /// Delay before reopening the device after a fault.
    pub backoff_ms: u64,
}

/// CSV reading log configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// File the accepted readings are appended to.
    pub path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `greenhouse.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("GREENHOUSE_HOST") {
            self.server.host = val;
        }
        if let Some(port) = lookup("GREENHOUSE_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = lookup("GREENHOUSE_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("GREENHOUSE_SERIAL_PORT") {
            self.serial.port = val;
        }
        if let Some(baud) = lookup("GREENHOUSE_SERIAL_BAUD").and_then(|val| val.parse().ok()) {
            self.serial.baud = baud;
        }
        if let Some(val) = lookup("GREENHOUSE_LOG_PATH") {
            self.log.path = PathBuf::from(val);
        }
        if let Some(val) = lookup("GREENHOUSE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.serial.port.trim().is_empty() {
            return Err(ConfigError::Validation(
                "serial port must not be empty".to_string(),
            ));
        }
        if self.serial.baud == 0 {
            return Err(ConfigError::Validation("baud must be non-zero".to_string()));
        }
        if self.reader.poll_interval_ms == 0 || self.reader.backoff_ms == 0 {
            return Err(ConfigError::Validation(
                "reader poll interval and backoff must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the reader loop timing.
    #[must_use]
    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig {
            poll_interval: Duration::from_millis(self.reader.poll_interval_ms),
            backoff: Duration::from_millis(self.reader.backoff_ms),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            backoff_ms: 2000,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("agritech_logs.csv"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "greenhoused=info,greenhouse=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
