//! Local time-of-day formatting from UTC epochs and flat offsets
//!
//! The weather API reports sunrise and sunset as UTC epoch seconds together
//! with the city's UTC offset in seconds. No timezone database is involved:
//! the offset is added to the epoch and the result is formatted as UTC.

use chrono::NaiveTime;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i32 = 3_600;

/// Formats `epoch + offset` as a 24-hour `HH:MM` time of day
///
/// Only the time of day is shown, so a result that falls on the previous or
/// next day wraps silently.
pub fn format_time(epoch: i64, offset_seconds: i32) -> String {
    let local = epoch.saturating_add(i64::from(offset_seconds));
    let seconds_into_day = local.rem_euclid(SECONDS_PER_DAY) as u32;

    NaiveTime::from_num_seconds_from_midnight_opt(seconds_into_day, 0)
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Formats an offset as `GMT±H`, truncating partial hours toward zero
pub fn format_gmt_offset(offset_seconds: i32) -> String {
    format!("GMT{:+}", offset_seconds / SECONDS_PER_HOUR)
}
