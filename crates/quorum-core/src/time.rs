//! `"HH:MM"` wall-clock codec.
//!
//! Times of day travel between collaborators as `"HH:MM"` strings and are
//! modelled internally as minute-of-day integers. The codec is lossless for
//! `0 <= m < 1440` and performs no range clamping on input.

use chrono::NaiveDateTime;

use crate::constants::TIMESTAMP_FORMAT;
use crate::errors::TimeError;

/// Minute of day. Nominally `[0, 1439]`; not enforced.
pub type Minutes = i32;

/// Convert an `"HH:MM"` string to minutes since midnight.
///
/// The string must split into exactly two colon-separated integers. Out of
/// range hours or minutes (e.g. `"25:99"`) are accepted as-is.
pub fn time_to_minutes(s: &str) -> Result<Minutes, TimeError> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err(TimeError::InvalidFormat {
            input: s.to_string(),
        });
    }

    let hours: i32 = parts[0].parse().map_err(|_| TimeError::InvalidHours {
        part: parts[0].to_string(),
    })?;
    let minutes: i32 = parts[1].parse().map_err(|_| TimeError::InvalidMinutes {
        part: parts[1].to_string(),
    })?;

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| TimeError::InvalidHours {
            part: parts[0].to_string(),
        })
}

/// Convert minutes since midnight to a zero-padded `"HH:MM"` string.
pub fn minutes_to_time(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse a `"YYYY-MM-DD HH:MM"` timestamp.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TimeError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map_err(|_| TimeError::InvalidTimestamp {
        input: s.to_string(),
    })
}

/// Format a timestamp as `"YYYY-MM-DD HH:MM"`.
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
