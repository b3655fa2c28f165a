//! # greenhouse-adapter-serial
//!
//! Serial adapter: connects the reader loop to the greenhouse controller.
//!
//! ## How it works
//!
//! The controller prints one `TEMP:<n>,HUM:<n>` line per measurement at
//! 9600 baud. [`SerialPortConnector`] opens the configured device with the
//! [`serialport`] crate; [`SerialPortLink`] asks the device how many bytes
//! are pending, reads them, and frames them into lines with a
//! [`LineBuffer`]. Device calls are blocking, so they run on tokio's
//! blocking pool and are bounded by the configured read timeout.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `greenhouse-app` and `greenhouse-domain`.

mod config;
mod error;
pub mod line_buffer;

pub use config::{DEFAULT_PORT, SerialConfig};
pub use error::SerialError;
pub use line_buffer::LineBuffer;

use std::io::ErrorKind;

use serialport::SerialPort;

use greenhouse_app::ports::{SerialConnector, SerialLink};
use greenhouse_domain::error::GreenhouseError;

/// Largest chunk read from the device in one call.
const READ_CHUNK: usize = 1024;

/// Opens the configured serial device.
#[derive(Debug, Clone)]
pub struct SerialPortConnector {
    config: SerialConfig,
}

impl SerialPortConnector {
    #[must_use]
    pub fn new(config: SerialConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }
}

impl SerialConnector for SerialPortConnector {
    type Link = SerialPortLink;

    async fn open(&mut self) -> Result<SerialPortLink, GreenhouseError> {
        let config = self.config.clone();
        tracing::debug!(port = %config.port, baud = config.baud, "opening serial device");

        let opened = tokio::task::spawn_blocking(move || {
            serialport::new(config.port.as_str(), config.baud)
                .timeout(config.read_timeout())
                .open()
                .map_err(|source| SerialError::Open {
                    port: config.port.clone(),
                    source,
                })
        })
        .await
        .map_err(SerialError::Worker)?;

        Ok(SerialPortLink::new(opened?))
    }
}

/// An open serial device framed into lines.
pub struct SerialPortLink {
    /// `None` only while a blocking read holds the port, or after that
    /// read's worker died.
    port: Option<Box<dyn SerialPort>>,
    buffer: LineBuffer,
}

impl SerialPortLink {
    #[must_use]
    pub fn new(port: Box<dyn SerialPort>) -> Self {
        Self {
            port: Some(port),
            buffer: LineBuffer::new(),
        }
    }
}

impl SerialLink for SerialPortLink {
    async fn poll_line(&mut self) -> Result<Option<Vec<u8>>, GreenhouseError> {
        if let Some(line) = self.buffer.next_line() {
            return Ok(Some(line));
        }

        let mut port = self.port.take().ok_or(SerialError::Closed)?;
        let (port, chunk) = tokio::task::spawn_blocking(move || {
            let chunk = read_available(port.as_mut());
            (port, chunk)
        })
        .await
        .map_err(SerialError::Worker)?;
        self.port = Some(port);

        self.buffer.extend(&chunk?);
        Ok(self.buffer.next_line())
    }
}

/// Read whatever the device has pending without waiting for more.
fn read_available(port: &mut dyn SerialPort) -> Result<Vec<u8>, SerialError> {
    let pending = port.bytes_to_read().map_err(SerialError::Query)?;
    if pending == 0 {
        return Ok(Vec::new());
    }

    let len = usize::try_from(pending).map_or(READ_CHUNK, |n| n.min(READ_CHUNK));
    let mut chunk = vec![0; len];
    match port.read(&mut chunk) {
        Ok(0) => Err(SerialError::Closed),
        Ok(read) => {
            chunk.truncate(read);
            Ok(chunk)
        }
        Err(err) if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => {
            Ok(Vec::new())
        }
        Err(err) => Err(SerialError::Read(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_config() {
        let config = SerialConfig {
            port: "COM9".to_string(),
            ..SerialConfig::default()
        };
        let connector = SerialPortConnector::new(config.clone());
        assert_eq!(connector.config(), &config);
    }

    #[tokio::test]
    async fn should_report_connection_fault_for_missing_device() {
        let mut connector = SerialPortConnector::new(SerialConfig {
            port: "/nonexistent/greenhouse-serial".to_string(),
            ..SerialConfig::default()
        });

        let result = connector.open().await;
        assert!(matches!(result, Err(GreenhouseError::Connection(_))));
    }
}
