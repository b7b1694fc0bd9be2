//! Stored orders and the order submission payload.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::hhmm;

use super::{BookingKind, OptionSet};

/// An order as stored by the remote order API.
///
/// Missing option booleans read as `false`, and `time_start` may carry
/// seconds (`"10:00:00"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: u64,
    /// Course the order is for, if a course booking.
    #[serde(default)]
    pub course_id: Option<u64>,
    /// Tutor the order is for, if a tutor booking.
    #[serde(default)]
    pub tutor_id: Option<u64>,
    /// Start date.
    pub date_start: NaiveDate,
    /// Start time.
    #[serde(with = "hhmm")]
    pub time_start: NaiveTime,
    /// Booked hours.
    pub duration: Decimal,
    /// Number of persons.
    pub persons: u32,
    /// Price stored at submission time.
    pub price: Decimal,
    /// All eight options as stored.
    #[serde(flatten)]
    pub options: OptionSet,
}

impl Order {
    /// Returns the booking kind and the id of the service the order is for.
    ///
    /// An id of 0 counts as absent. `None` when the order names neither a
    /// course nor a tutor. If both ids are present the course wins.
    pub fn service_ref(&self) -> Option<(BookingKind, u64)> {
        let course_id = self.course_id.filter(|id| *id != 0);
        let tutor_id = self.tutor_id.filter(|id| *id != 0);
        match (course_id, tutor_id) {
            (Some(id), _) => Some((BookingKind::Course, id)),
            (None, Some(id)) => Some((BookingKind::Tutor, id)),
            (None, None) => None,
        }
    }
}

/// The body submitted to create or update an order.
///
/// Every field is always present. Exactly one of `tutor_id` and `course_id`
/// is set; the other is serialized as `null`.
///
/// # Example
///
/// ```
/// use quote_engine::models::{OptionSet, OrderPayload};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let payload = OrderPayload {
///     tutor_id: Some(3),
///     course_id: None,
///     date_start: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
///     time_start: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     duration: Decimal::from(2),
///     persons: 1,
///     price: 3400,
///     options: OptionSet::default(),
/// };
///
/// let json = serde_json::to_value(&payload).unwrap();
/// assert_eq!(json["time_start"], "18:00");
/// assert_eq!(json["course_id"], serde_json::Value::Null);
/// assert_eq!(json["assessment"], false);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Tutor id for tutor bookings.
    pub tutor_id: Option<u64>,
    /// Course id for course bookings.
    pub course_id: Option<u64>,
    /// Start date as `YYYY-MM-DD`.
    pub date_start: NaiveDate,
    /// Start time as `HH:MM`.
    #[serde(with = "hhmm")]
    pub time_start: NaiveTime,
    /// Booked hours, as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub duration: Decimal,
    /// Number of persons.
    pub persons: u32,
    /// Quoted total in whole currency units.
    pub price: i64,
    /// All eight options.
    #[serde(flatten)]
    pub options: OptionSet,
}
