//! Time-of-day arithmetic.
//!
//! Booking start times travel as `HH:MM` strings (24-hour, zero-padded) and are
//! compared as minute offsets from midnight. Seconds, when a stored value
//! carries them, are accepted and dropped.

use chrono::{NaiveTime, Timelike};

use crate::error::{EngineError, EngineResult};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Parses an `HH:MM` (or `HH:MM:SS`) string into minutes since midnight.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTime`] when the value is not a valid
/// 24-hour time of day.
///
/// # Example
///
/// ```
/// use quote_engine::schedule::parse_time;
///
/// assert_eq!(parse_time("09:30").unwrap(), 570);
/// assert_eq!(parse_time("18:00:00").unwrap(), 1080);
/// assert!(parse_time("24:00").is_err());
/// ```
pub fn parse_time(value: &str) -> EngineResult<u32> {
    parse_clock(value).map(minutes_of_day)
}

/// Formats minutes since midnight as `HH:MM`.
///
/// Callers pass values in `0..MINUTES_PER_DAY`. Larger offsets are not wrapped
/// into the next day: `1500` formats as `"25:00"`.
///
/// # Example
///
/// ```
/// use quote_engine::schedule::format_time;
///
/// assert_eq!(format_time(0), "00:00");
/// assert_eq!(format_time(9 * 60 + 5), "09:05");
/// ```
pub fn format_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Adds a number of minutes to an `HH:MM` string.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTime`] if `value` does not parse or the
/// result would fall before midnight or past `u32::MAX` minutes.
pub fn add_minutes(value: &str, minutes: i64) -> EngineResult<String> {
    let start = i64::from(parse_time(value)?);
    start
        .checked_add(minutes)
        .and_then(|shifted| u32::try_from(shifted).ok())
        .map(format_time)
        .ok_or_else(|| EngineError::InvalidTime {
            value: value.to_string(),
            message: format!("adding {} minutes leaves the clock range", minutes),
        })
}

/// Returns the minute offset from midnight of a time, ignoring seconds.
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Converts a minute offset from midnight into a [`NaiveTime`].
///
/// Returns `None` for offsets outside a single day.
pub fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Parses an `HH:MM` string into a [`NaiveTime`] with zero seconds.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTime`] for the same inputs [`parse_time`] rejects.
pub fn parse_clock(value: &str) -> EngineResult<NaiveTime> {
    let trimmed = value.trim();

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .and_then(|time| time_from_minutes(minutes_of_day(time)))
        .ok_or_else(|| EngineError::InvalidTime {
            value: value.to_string(),
            message: "expected HH:MM".to_string(),
        })
}

/// Serde adapter storing a [`NaiveTime`] as an `HH:MM` string.
///
/// ```
/// use chrono::NaiveTime;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Slot {
///     #[serde(with = "quote_engine::schedule::hhmm")]
///     start: NaiveTime,
/// }
///
/// let slot: Slot = serde_json::from_str(r#"{"start":"10:30:00"}"#).unwrap();
/// assert_eq!(serde_json::to_string(&slot).unwrap(), r#"{"start":"10:30"}"#);
/// ```
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{format_time, minutes_of_day, parse_clock};

    /// Serializes a time as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_time(minutes_of_day(*time)))
    }

    /// Deserializes a time from `HH:MM` or `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse_clock(&value).map_err(D::Error::custom)
    }

    /// The same adapter for optional times. An empty string reads as `None`.
    pub mod option {
        use chrono::NaiveTime;
        use serde::de::Error;
        use serde::{Deserialize, Deserializer, Serializer};

        use super::super::{format_time, minutes_of_day, parse_clock};

        /// Serializes an optional time as `HH:MM` or `null`.
        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => serializer.serialize_some(&format_time(minutes_of_day(*time))),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional time; `null` and `""` both yield `None`.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(value) if !value.trim().is_empty() => {
                    parse_clock(&value).map(Some).map_err(D::Error::custom)
                }
                _ => Ok(None),
            }
        }
    }
}
