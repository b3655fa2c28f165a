//! Time and timestamp helpers.

use chrono::{DateTime, Local, Utc};

/// UTC timestamp used for `last_updated` and log rows.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Seconds since the UNIX epoch, with sub-second precision.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn unix_seconds(ts: Timestamp) -> f64 {
    ts.timestamp() as f64 + f64::from(ts.timestamp_subsec_micros()) / 1_000_000.0
}

/// Human-readable local wall-clock time (`YYYY-MM-DD HH:MM:SS`).
#[must_use]
pub fn format_local(ts: Timestamp) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
