//! Serial ports: opening the device and polling it for lines.
//!
//! The reader loop owns both the connector and every link it opens; no
//! other component touches the device.

use std::future::Future;

use greenhouse_domain::error::GreenhouseError;

/// Opens the configured serial device.
pub trait SerialConnector: Send {
    /// Handle to an open device.
    type Link: SerialLink;

    /// Try to open the device once.
    ///
    /// Returns [`GreenhouseError::Connection`] when the device is absent,
    /// busy, or refuses the configuration.
    fn open(&mut self) -> impl Future<Output = Result<Self::Link, GreenhouseError>> + Send;
}

/// An open serial device producing newline-terminated lines.
pub trait SerialLink: Send {
    /// Return the next complete line (without its terminator) if one is
    /// available, or `None` when nothing is buffered yet.
    ///
    /// Blocks for at most the link's read timeout. Any error means the link
    /// is gone: the caller drops it and reconnects.
    fn poll_line(
        &mut self,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, GreenhouseError>> + Send;
}
