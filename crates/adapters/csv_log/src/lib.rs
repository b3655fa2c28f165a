//! # greenhouse-adapter-csv-log
//!
//! Append-only CSV log of accepted readings.
//!
//! ```text
//! Timestamp,Temperature (C),Humidity (%),Fan Status,Pump Status
//! 2024-06-01 14:03:11,31,39,ON,ON
//! ```
//!
//! The file is opened in append mode for every record and closed again, so
//! it can be copied or rotated between readings. The header row is written
//! only when the file is empty at append time.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `greenhouse-app` and `greenhouse-domain`.

mod error;

pub use error::CsvLogError;

use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt as _;

use greenhouse_app::ports::LogSink;
use greenhouse_domain::error::GreenhouseError;
use greenhouse_domain::log_record::{LOG_HEADER, LogRecord};

const ROW_TERMINATOR: &str = "\r\n";

/// [`LogSink`] writing one CSV row per record.
#[derive(Debug, Clone)]
pub struct CsvLogSink {
    path: PathBuf,
}

impl CsvLogSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_record(&self, record: &LogRecord) -> Result<(), CsvLogError> {
        let open_err = |source| CsvLogError::Open {
            path: self.path.clone(),
            source,
        };
        let write_err = |source| CsvLogError::Write {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(open_err)?;
        let fresh = file.metadata().await.map_err(open_err)?.len() == 0;

        let mut rows = String::new();
        if fresh {
            tracing::info!(path = %self.path.display(), "starting new reading log");
            push_row(&mut rows, LOG_HEADER);
        }
        push_row(&mut rows, record.fields());

        file.write_all(rows.as_bytes()).await.map_err(write_err)?;
        file.flush().await.map_err(write_err)?;
        Ok(())
    }
}

impl LogSink for CsvLogSink {
    async fn append(&mut self, record: &LogRecord) -> Result<(), GreenhouseError> {
        self.write_record(record).await?;
        tracing::trace!(path = %self.path.display(), "reading appended");
        Ok(())
    }
}

fn push_row<I>(out: &mut String, fields: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for (idx, field) in fields.into_iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        push_field(out, field.as_ref());
    }
    out.push_str(ROW_TERMINATOR);
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
