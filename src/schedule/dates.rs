//! Calendar date arithmetic and parsing.
//!
//! Booking dates are calendar dates with no timezone component. Course start
//! dates arrive from the catalogue as ISO date-times; only their wall-clock
//! date and time are used.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};

use crate::error::{EngineError, EngineResult};

use super::clock::{format_time, minutes_of_day};

/// Adds `days` calendar days to a date. Negative values move backwards.
///
/// Results past the supported calendar range clamp to [`NaiveDate::MAX`] or
/// [`NaiveDate::MIN`].
///
/// # Example
///
/// ```
/// use quote_engine::schedule::add_days;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
/// assert_eq!(add_days(date, 3), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
/// ```
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    if days < 0 {
        date.checked_sub_days(step).unwrap_or(NaiveDate::MIN)
    } else {
        date.checked_add_days(step).unwrap_or(NaiveDate::MAX)
    }
}

/// Adds `weeks` whole weeks to a date.
pub fn add_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    add_days(date, weeks.saturating_mul(7))
}

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO date-time as a wall-clock [`NaiveDateTime`].
///
/// Values with an explicit offset (`Z`, `+03:00`) keep the clock time written
/// in that offset; no conversion to another zone takes place.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] if no supported format matches.
pub fn parse_start_datetime(value: &str) -> EngineResult<NaiveDateTime> {
    let trimmed = value.trim();

    if let Some(parsed) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Ok(parsed);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_local())
        .map_err(|e| EngineError::InvalidDate {
            value: value.to_string(),
            message: e.to_string(),
        })
}

/// Parses a `YYYY-MM-DD` date, or takes the date part of an ISO date-time.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] for anything else, including dates that
/// do not exist on the calendar.
///
/// # Example
///
/// ```
/// use quote_engine::schedule::parse_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// assert_eq!(parse_date("2025-03-01").unwrap(), expected);
/// assert_eq!(parse_date("2025-03-01T18:00:00").unwrap(), expected);
/// assert!(parse_date("2025-02-30").is_err());
/// ```
pub fn parse_date(value: &str) -> EngineResult<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_start_datetime(trimmed).map(|dt| dt.date())
}

/// Extracts the `HH:MM` start time of an ISO date-time.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] if the value is not a date-time.
pub fn time_of(value: &str) -> EngineResult<String> {
    let parsed = parse_start_datetime(value)?;
    Ok(format_time(minutes_of_day(parsed.time())))
}
