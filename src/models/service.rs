//! Catalogue records a booking can be made against.
//!
//! A booking is either for a [`Course`] (fixed schedule and length) or a
//! [`Tutor`] (free date and duration). Both expose an hourly fee that feeds the
//! base-cost formula.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Which kind of service a booking is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    /// A scheduled group course.
    Course,
    /// An individual tutor.
    Tutor,
}

impl std::fmt::Display for BookingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingKind::Course => write!(f, "course"),
            BookingKind::Tutor => write!(f, "tutor"),
        }
    }
}

/// A language course as published in the catalogue.
///
/// # Example
///
/// ```
/// use quote_engine::models::Course;
///
/// let course: Course = serde_json::from_str(r#"{
///     "id": 7,
///     "name": "English for Travel",
///     "total_length": 8,
///     "week_length": 3,
///     "start_dates": ["2025-03-01T09:00:00", "2025-03-01T18:00:00"],
///     "course_fee_per_hour": 600
/// }"#).unwrap();
///
/// assert_eq!(course.total_hours().to_string(), "24");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Catalogue identifier.
    pub id: u64,
    /// Course title.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Name of the teacher running the course.
    #[serde(default)]
    pub teacher: String,
    /// Level label (beginner, intermediate, advanced).
    #[serde(default)]
    pub level: String,
    /// Course length in weeks.
    #[serde(default)]
    pub total_length: u32,
    /// Teaching load in hours per week.
    #[serde(default)]
    pub week_length: u32,
    /// Offered start date-times. Several may share one date.
    #[serde(default)]
    pub start_dates: Vec<NaiveDateTime>,
    /// Hourly fee.
    #[serde(default)]
    pub course_fee_per_hour: Decimal,
}

impl Course {
    /// Total booked hours for the whole course: `total_length × week_length`.
    pub fn total_hours(&self) -> Decimal {
        Decimal::from(self.total_length) * Decimal::from(self.week_length)
    }

    /// Weekly teaching load as a decimal.
    pub fn weekly_hours(&self) -> Decimal {
        Decimal::from(self.week_length)
    }
}

/// An individual tutor as published in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    /// Catalogue identifier.
    pub id: u64,
    /// Tutor's display name.
    pub name: String,
    /// Years of teaching experience.
    #[serde(default)]
    pub work_experience: u32,
    /// Languages the tutor speaks.
    #[serde(default)]
    pub languages_spoken: Vec<String>,
    /// Languages the tutor teaches.
    #[serde(default)]
    pub languages_offered: Vec<String>,
    /// Level the tutor teaches at.
    #[serde(default)]
    pub language_level: String,
    /// Hourly fee.
    #[serde(default)]
    pub price_per_hour: Decimal,
}

/// The service a booking is priced against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Service {
    /// A course booking.
    Course(Course),
    /// A tutor booking.
    Tutor(Tutor),
}

impl Service {
    /// Returns the booking kind.
    pub fn kind(&self) -> BookingKind {
        match self {
            Service::Course(_) => BookingKind::Course,
            Service::Tutor(_) => BookingKind::Tutor,
        }
    }

    /// Returns the catalogue identifier.
    pub fn id(&self) -> u64 {
        match self {
            Service::Course(course) => course.id,
            Service::Tutor(tutor) => tutor.id,
        }
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        match self {
            Service::Course(course) => &course.name,
            Service::Tutor(tutor) => &tutor.name,
        }
    }

    /// Returns the hourly fee used by the base-cost formula.
    pub fn fee_per_hour(&self) -> Decimal {
        match self {
            Service::Course(course) => course.course_fee_per_hour,
            Service::Tutor(tutor) => tutor.price_per_hour,
        }
    }

    /// Number of billing weeks, used only by the per-week fixed addition.
    ///
    /// For a course this is its length in weeks. A tutor booking has no
    /// declared length, so one week is counted per started block of four
    /// booked hours. Both are at least 1.
    ///
    /// # Example
    ///
    /// ```
    /// use quote_engine::models::{Service, Tutor};
    /// use rust_decimal::Decimal;
    ///
    /// let tutor = Service::Tutor(Tutor {
    ///     id: 1,
    ///     name: "Anna".to_string(),
    ///     work_experience: 5,
    ///     languages_spoken: vec![],
    ///     languages_offered: vec![],
    ///     language_level: "B2".to_string(),
    ///     price_per_hour: Decimal::from(1200),
    /// });
    ///
    /// assert_eq!(tutor.billing_weeks(Decimal::from(4)), 1);
    /// assert_eq!(tutor.billing_weeks(Decimal::from(5)), 2);
    /// ```
    pub fn billing_weeks(&self, duration_hours: Decimal) -> u32 {
        match self {
            Service::Course(course) => course.total_length.max(1),
            Service::Tutor(_) => {
                if duration_hours <= Decimal::ZERO {
                    return 1;
                }
                (duration_hours / Decimal::from(4))
                    .ceil()
                    .to_u32()
                    .unwrap_or(u32::MAX)
                    .max(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_course(total_length: u32, week_length: u32) -> Course {
        Course {
            id: 3,
            name: "Business German".to_string(),
            description: String::new(),
            teacher: "Klaus".to_string(),
            level: "Intermediate".to_string(),
            total_length,
            week_length,
            start_dates: vec![],
            course_fee_per_hour: dec("800"),
        }
    }

    fn create_tutor() -> Tutor {
        Tutor {
            id: 11,
            name: "Maria".to_string(),
            work_experience: 4,
            languages_spoken: vec!["Russian".to_string(), "Spanish".to_string()],
            languages_offered: vec!["Spanish".to_string()],
            language_level: "A2".to_string(),
            price_per_hour: dec("1500"),
        }
    }

    #[test]
    fn test_course_total_hours() {
        assert_eq!(create_course(8, 3).total_hours(), dec("24"));
        assert_eq!(create_course(0, 3).total_hours(), dec("0"));
    }

    #[test]
    fn test_service_accessors() {
        let course = Service::Course(create_course(8, 3));
        assert_eq!(course.kind(), BookingKind::Course);
        assert_eq!(course.id(), 3);
        assert_eq!(course.name(), "Business German");
        assert_eq!(course.fee_per_hour(), dec("800"));

        let tutor = Service::Tutor(create_tutor());
        assert_eq!(tutor.kind(), BookingKind::Tutor);
        assert_eq!(tutor.id(), 11);
        assert_eq!(tutor.fee_per_hour(), dec("1500"));
    }

    #[test]
    fn test_course_billing_weeks_is_total_length() {
        let course = Service::Course(create_course(12, 2));
        assert_eq!(course.billing_weeks(dec("1")), 12);
    }

    #[test]
    fn test_course_billing_weeks_floors_to_one() {
        let course = Service::Course(create_course(0, 2));
        assert_eq!(course.billing_weeks(dec("0")), 1);
    }

    #[test]
    fn test_tutor_billing_weeks_rounds_up_per_four_hours() {
        let tutor = Service::Tutor(create_tutor());
        assert_eq!(tutor.billing_weeks(dec("1")), 1);
        assert_eq!(tutor.billing_weeks(dec("4")), 1);
        assert_eq!(tutor.billing_weeks(dec("4.5")), 2);
        assert_eq!(tutor.billing_weeks(dec("40")), 10);
    }

    #[test]
    fn test_tutor_billing_weeks_minimum_one() {
        let tutor = Service::Tutor(create_tutor());
        assert_eq!(tutor.billing_weeks(dec("0")), 1);
        assert_eq!(tutor.billing_weeks(dec("-3")), 1);
    }

    #[test]
    fn test_course_deserializes_with_missing_optional_fields() {
        let course: Course = serde_json::from_str(
            r#"{"id": 1, "name": "Italian A1", "course_fee_per_hour": "450.50"}"#,
        )
        .unwrap();
        assert_eq!(course.total_length, 0);
        assert!(course.start_dates.is_empty());
        assert_eq!(course.course_fee_per_hour, dec("450.50"));
    }

    #[test]
    fn test_service_tagged_serialization() {
        let json = serde_json::to_value(Service::Tutor(create_tutor())).unwrap();
        assert_eq!(json["kind"], "tutor");
        assert_eq!(json["name"], "Maria");
    }

    #[test]
    fn test_booking_kind_display() {
        assert_eq!(BookingKind::Course.to_string(), "course");
        assert_eq!(BookingKind::Tutor.to_string(), "tutor");
    }
}
