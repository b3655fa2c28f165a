//! CSV log adapter error types.

use std::path::PathBuf;

use greenhouse_domain::error::GreenhouseError;

/// Errors specific to the CSV log adapter.
#[derive(Debug, thiserror::Error)]
pub enum CsvLogError {
    /// The log file could not be opened or created.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or flushing the rows failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CsvLogError {
    /// Convert into a [`GreenhouseError::LogWrite`] for propagation across
    /// port boundaries.
    #[must_use]
    pub fn into_domain(self) -> GreenhouseError {
        GreenhouseError::LogWrite(Box::new(self))
    }
}

impl From<CsvLogError> for GreenhouseError {
    fn from(err: CsvLogError) -> Self {
        err.into_domain()
    }
}
