//! Log sink port: durable, append-only storage of accepted readings.

use std::future::Future;

use greenhouse_domain::error::GreenhouseError;
use greenhouse_domain::log_record::LogRecord;

/// Appends [`LogRecord`]s in arrival order.
///
/// Only the reader loop writes, so implementations need no coordination
/// between concurrent writers.
pub trait LogSink: Send {
    /// Append one record.
    ///
    /// Returns [`GreenhouseError::LogWrite`] when the store is unavailable.
    /// The caller logs the fault and carries on.
    fn append(
        &mut self,
        record: &LogRecord,
    ) -> impl Future<Output = Result<(), GreenhouseError>> + Send;
}
