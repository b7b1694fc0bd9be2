//! Booking form state and the pricing input derived from it.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::hhmm;

use super::{Order, Service, UserOptions};

/// Raw booking form state.
///
/// Every field may be missing while the form is being filled in. Missing
/// values are defaulted, not rejected, when the form is priced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingForm {
    /// Chosen start date.
    #[serde(default)]
    pub date_start: Option<NaiveDate>,
    /// Chosen start time.
    #[serde(default, with = "hhmm::option")]
    pub time_start: Option<NaiveTime>,
    /// Requested duration in hours. Ignored for courses.
    #[serde(default)]
    pub duration: Option<Decimal>,
    /// Number of persons.
    #[serde(default)]
    pub persons: Option<u32>,
    /// The five customer-chosen options.
    #[serde(flatten)]
    pub choices: UserOptions,
}

impl BookingForm {
    /// Rebuilds the form from a stored order for editing.
    ///
    /// Only the customer's own choices are carried over. The auto options
    /// stored with the order are dropped and re-derived when the form is
    /// priced again.
    pub fn from_order(order: &Order) -> Self {
        Self {
            date_start: Some(order.date_start),
            time_start: Some(order.time_start),
            duration: Some(order.duration),
            persons: Some(order.persons),
            choices: order.options.user(),
        }
    }

    /// Billable hours for this form against a service.
    ///
    /// A course is always booked in full, so its total hours win over whatever
    /// the duration field holds. A tutor booking uses the duration field, 0 if
    /// missing.
    pub fn duration_hours(&self, service: &Service) -> Decimal {
        match service {
            Service::Course(course) => course.total_hours(),
            Service::Tutor(_) => self.duration.unwrap_or(Decimal::ZERO),
        }
    }

    /// Number of persons, 1 if missing.
    pub fn persons_or_default(&self) -> u32 {
        self.persons.unwrap_or(1)
    }
}

/// The defaulted inputs of the base-cost formula.
///
/// `persons` keeps the value the caller supplied, including 0; the formula
/// clamps it to at least 1 at the point of use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    /// Hourly fee of the service.
    pub fee_per_hour: Decimal,
    /// Total billable hours.
    pub duration_hours: Decimal,
    /// Start date, if chosen.
    pub date_start: Option<NaiveDate>,
    /// Start time, if chosen.
    #[serde(default, with = "hhmm::option")]
    pub time_start: Option<NaiveTime>,
    /// Headcount as supplied.
    pub persons: u32,
    /// Billing weeks for the per-week addition.
    pub weeks: u32,
}

impl PricingInput {
    /// Builds the pricing input for a form against a service.
    ///
    /// # Example
    ///
    /// ```
    /// use quote_engine::models::{BookingForm, PricingInput, Service, Tutor};
    /// use rust_decimal::Decimal;
    ///
    /// let tutor = Service::Tutor(Tutor {
    ///     id: 2,
    ///     name: "Ivan".to_string(),
    ///     work_experience: 10,
    ///     languages_spoken: vec![],
    ///     languages_offered: vec![],
    ///     language_level: "C1".to_string(),
    ///     price_per_hour: Decimal::from(900),
    /// });
    ///
    /// let input = PricingInput::from_booking(&tutor, &BookingForm::default());
    /// assert_eq!(input.fee_per_hour, Decimal::from(900));
    /// assert_eq!(input.duration_hours, Decimal::ZERO);
    /// assert_eq!(input.persons, 1);
    /// assert_eq!(input.weeks, 1);
    /// ```
    pub fn from_booking(service: &Service, form: &BookingForm) -> Self {
        let duration_hours = form.duration_hours(service);

        Self {
            fee_per_hour: service.fee_per_hour(),
            duration_hours,
            date_start: form.date_start,
            time_start: form.time_start,
            persons: form.persons_or_default(),
            weeks: service.billing_weeks(duration_hours),
        }
    }
}
