//! Common error types used across the workspace.
//!
//! Line rejections are local to a single line and never leave the reader
//! loop. Connection and log-write faults cross port boundaries as
//! [`GreenhouseError`], carrying the adapter's own error as a boxed source.

/// Boxed adapter error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a raw serial line was not turned into a reading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RejectReason {
    /// The line does not have the `TEMP:<n>,HUM:<n>` shape.
    #[error("malformed line")]
    Malformed(#[source] MalformedLine),
}

/// Details about a malformed line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedLine {
    /// The line does not mention both the temperature and humidity markers.
    #[error("missing TEMP/HUM markers")]
    MissingMarker,

    /// A comma-separated field, or its `:` separator, is absent.
    #[error("missing {0} field")]
    MissingField(&'static str),

    /// A field is present but keyed with something else (including fields
    /// given in the wrong order).
    #[error("expected {expected} key, got {actual:?}")]
    UnexpectedKey {
        /// The key required at this position.
        expected: &'static str,
        /// The key found in the line.
        actual: String,
    },

    /// The value is not a finite number representable as an integer.
    #[error("invalid {field} value {text:?}")]
    InvalidNumber {
        /// Which field carried the value.
        field: &'static str,
        /// The raw value text.
        text: String,
    },
}

impl From<MalformedLine> for RejectReason {
    fn from(err: MalformedLine) -> Self {
        Self::Malformed(err)
    }
}

/// Faults reported by the serial and log-sink ports.
#[derive(Debug, thiserror::Error)]
pub enum GreenhouseError {
    /// The serial device could not be opened, or the open link failed.
    #[error("serial connection fault: {0}")]
    Connection(#[source] BoxError),

    /// The reading log could not be written.
    #[error("log write fault: {0}")]
    LogWrite(#[source] BoxError),
}
