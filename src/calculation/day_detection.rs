//! Day detection for the weekend/holiday multiplier.
//!
//! A booking that starts on a Saturday, a Sunday, or a fixed public holiday
//! has its `fee × duration` term multiplied by the tariff's weekend factor.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{HolidayCalendar, PricingConfig};

/// Represents the type of day for the weekend multiplier.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::DayType;
///
/// let day_type = DayType::Holiday;
/// assert_eq!(day_type.to_string(), "Holiday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday, not a holiday.
    Weekday,
    /// Saturday or Sunday, not a holiday.
    Weekend,
    /// A fixed public holiday, whatever the weekday.
    Holiday,
}

impl DayType {
    /// Whether the weekend multiplier applies.
    pub fn is_surcharged(&self) -> bool {
        !matches!(self, DayType::Weekday)
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Weekend => write!(f, "Weekend"),
            DayType::Holiday => write!(f, "Holiday"),
        }
    }
}

/// Determines the day type for a date.
///
/// Holidays are checked first, so a holiday that falls on a Saturday is
/// reported as [`DayType::Holiday`].
///
/// # Example
///
/// ```
/// use quote_engine::calculation::{DayType, get_day_type};
/// use quote_engine::config::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::default();
///
/// // 2024-01-10 is a Wednesday
/// let wednesday = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// assert_eq!(get_day_type(wednesday, &calendar), DayType::Weekday);
///
/// // 2024-06-12 is Russia Day
/// let holiday = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
/// assert_eq!(get_day_type(holiday, &calendar), DayType::Holiday);
/// ```
pub fn get_day_type(date: NaiveDate, calendar: &HolidayCalendar) -> DayType {
    if calendar.is_fixed_holiday(date) {
        return DayType::Holiday;
    }
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayType::Weekend,
        _ => DayType::Weekday,
    }
}

/// Returns whether a date is a Saturday, a Sunday, or a fixed holiday.
pub fn is_holiday_or_weekend(date: NaiveDate, calendar: &HolidayCalendar) -> bool {
    get_day_type(date, calendar).is_surcharged()
}

/// Returns the multiplier for the `fee × duration` term.
///
/// The tariff's weekend multiplier on weekends and holidays, otherwise `1`.
/// A missing date is priced as an ordinary day.
pub fn weekend_or_holiday_multiplier(date: Option<NaiveDate>, config: &PricingConfig) -> Decimal {
    match date {
        Some(date) if is_holiday_or_weekend(date, config.holidays()) => {
            config.tariff().weekend_multiplier
        }
        _ => Decimal::ONE,
    }
}
