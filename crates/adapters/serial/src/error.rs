//! Serial adapter error types.

use greenhouse_domain::error::GreenhouseError;

/// Errors specific to the serial adapter. All of them mean the link is
/// unusable and must be reopened.
#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    /// The device could not be opened or configured.
    #[error("failed to open {port}: {source}")]
    Open {
        /// Configured device name.
        port: String,
        #[source]
        source: serialport::Error,
    },

    /// Querying the device for pending input failed.
    #[error("failed to query serial device: {0}")]
    Query(#[source] serialport::Error),

    /// Reading from the device failed.
    #[error("failed to read serial device: {0}")]
    Read(#[source] std::io::Error),

    /// The device reported end of stream.
    #[error("serial device closed the stream")]
    Closed,

    /// The blocking worker running a device call did not complete.
    #[error("serial worker failed: {0}")]
    Worker(#[source] tokio::task::JoinError),
}

impl SerialError {
    /// Convert into a [`GreenhouseError::Connection`] for propagation across
    /// port boundaries.
    #[must_use]
    pub fn into_domain(self) -> GreenhouseError {
        GreenhouseError::Connection(Box::new(self))
    }
}

impl From<SerialError> for GreenhouseError {
    fn from(err: SerialError) -> Self {
        err.into_domain()
    }
}
