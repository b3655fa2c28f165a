//! Sensor readings and the serial line parser.
//!
//! The device prints one line per measurement:
//!
//! ```text
//! TEMP:25,HUM:60
//! ```
//!
//! Fields are positional: the temperature field comes first and the
//! humidity field second. Anything after the second field is ignored.
//! Values may carry a fractional part and are truncated toward zero.
//! There is no range check: negative or absurd values are accepted as-is.

use serde::Serialize;

use crate::error::{MalformedLine, RejectReason};

/// Key of the first field (degrees Celsius).
pub const TEMPERATURE_KEY: &str = "TEMP";
/// Key of the second field (relative humidity, percent).
pub const HUMIDITY_KEY: &str = "HUM";

/// One validated temperature/humidity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reading {
    /// Temperature in whole degrees Celsius.
    pub temperature: i64,
    /// Relative humidity in whole percent.
    pub humidity: i64,
}

impl Reading {
    #[must_use]
    pub fn new(temperature: i64, humidity: i64) -> Self {
        Self {
            temperature,
            humidity,
        }
    }
}

/// Decode raw serial bytes into text, dropping invalid UTF-8 sequences and
/// surrounding whitespace (including the `\r` some firmwares emit).
#[must_use]
pub fn decode_line(raw: &[u8]) -> String {
    let mut text = String::with_capacity(raw.len());
    for chunk in raw.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text.trim().to_owned()
}

/// Parse one decoded line into a [`Reading`].
///
/// # Errors
///
/// Returns [`RejectReason::Malformed`] when a marker or field is missing,
/// when the fields are out of order, or when a value is not a finite number.
pub fn parse(line: &str) -> Result<Reading, RejectReason> {
    if !(line.contains(TEMPERATURE_KEY) && line.contains(HUMIDITY_KEY)) {
        return Err(MalformedLine::MissingMarker.into());
    }

    let mut fields = line.split(',');
    let temperature = parse_field(fields.next(), TEMPERATURE_KEY)?;
    let humidity = parse_field(fields.next(), HUMIDITY_KEY)?;

    Ok(Reading {
        temperature,
        humidity,
    })
}

fn parse_field(field: Option<&str>, key: &'static str) -> Result<i64, MalformedLine> {
    let field = field.ok_or(MalformedLine::MissingField(key))?;
    let (actual, rest) = field
        .split_once(':')
        .ok_or(MalformedLine::MissingField(key))?;

    let actual = actual.trim();
    if actual != key {
        return Err(MalformedLine::UnexpectedKey {
            expected: key,
            actual: actual.to_owned(),
        });
    }

    // The value ends at the next ':' if the device ever appends a unit.
    let value = rest.split(':').next().unwrap_or_default().trim();
    truncate(value, key)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate(text: &str, field: &'static str) -> Result<i64, MalformedLine> {
    let invalid = || MalformedLine::InvalidNumber {
        field,
        text: text.to_owned(),
    };

    let whole = text.parse::<f64>().map_err(|_| invalid())?.trunc();
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
    if !whole.is_finite() || whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return Err(invalid());
    }

    Ok(whole as i64)
}
