//! Time formats used by the Start.Info API.
//!
//! Two representations appear on the wire:
//! - request timestamps as `YYYY-MM-DD+HH:MM` (local time, minute precision;
//!   the `+` is decoded as a space by the server)
//! - departure times as Unix epoch milliseconds in decimal

use chrono::{DateTime, NaiveDateTime, TimeZone};

use super::params::{InvalidParameter, require};

/// `strftime` pattern for request timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d+%H:%M";

/// Placeholder for the third (unused) slot of the update-check time triple.
pub const UNUSED_UPDATE_TIME: &str = "2011-11-11+11:11";

/// Render a timestamp as `YYYY-MM-DD+HH:MM`.
///
/// Seconds and sub-second precision are dropped.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rnv_client::domain::format_timestamp;
///
/// let t = NaiveDate::from_ymd_opt(2024, 3, 5)
///     .unwrap()
///     .and_hms_opt(7, 4, 59)
///     .unwrap();
/// assert_eq!(format_timestamp(&t), "2024-03-05+07:04");
/// ```
pub fn format_timestamp(t: &NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD+HH:MM` timestamp back into a date-time.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, InvalidParameter> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| InvalidParameter::new("time", format!("expected YYYY-MM-DD+HH:MM: {e}")))
}

/// Render an instant as epoch milliseconds, the form `departureTime` expects.
pub fn epoch_millis<Tz: TimeZone>(t: &DateTime<Tz>) -> String {
    t.timestamp_millis().to_string()
}

/// Check that a caller-supplied departure time is a non-empty run of digits.
pub(crate) fn require_epoch_millis<'a>(
    name: &'static str,
    value: &'a str,
) -> Result<&'a str, InvalidParameter> {
    let value = require(name, value)?;
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidParameter::new(
            name,
            format!("expected epoch milliseconds, got {value:?}"),
        ));
    }
    Ok(value)
}
