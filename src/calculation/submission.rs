//! Order submission checks and payload construction.
//!
//! Pricing tolerates a half-filled form; submission does not. Everything here
//! returns [`EngineError::InvalidOrder`] naming the offending field.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::config::BookingLimits;
use crate::error::{EngineError, EngineResult};
use crate::models::{BookingForm, Order, OrderPayload, PriceResult, Service};
use crate::schedule::is_course_start_date;

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidOrder {
        field: field.to_string(),
        message: message.into(),
    }
}

fn required_date(form: &BookingForm) -> EngineResult<NaiveDate> {
    form.date_start
        .ok_or_else(|| invalid("date_start", "a start date is required"))
}

fn required_time(form: &BookingForm) -> EngineResult<NaiveTime> {
    form.time_start
        .ok_or_else(|| invalid("time_start", "a start time is required"))
}

/// Checks a form before it is submitted as an order.
///
/// - date and time are both required
/// - a course date must be one of the course's start dates
/// - a tutor booking's duration must be within the configured hour limits
/// - persons must be within the configured limits
///
/// # Errors
///
/// Returns the first violation as [`EngineError::InvalidOrder`].
pub fn validate_submission(
    service: &Service,
    form: &BookingForm,
    limits: &BookingLimits,
) -> EngineResult<()> {
    let date = required_date(form)?;
    required_time(form)?;

    match service {
        Service::Course(course) => {
            if !is_course_start_date(course, date) {
                return Err(invalid(
                    "date_start",
                    format!("{} is not a start date of course {}", date, course.id),
                ));
            }
        }
        Service::Tutor(_) => {
            let duration = form.duration.unwrap_or(Decimal::ZERO);
            if duration < limits.tutor_min_hours || duration > limits.tutor_max_hours {
                return Err(invalid(
                    "duration",
                    format!(
                        "tutor bookings must last {}–{} hours, got {}",
                        limits.tutor_min_hours.normalize(),
                        limits.tutor_max_hours.normalize(),
                        duration.normalize()
                    ),
                ));
            }
        }
    }

    let persons = form.persons_or_default();
    if persons < limits.min_persons || persons > limits.max_persons {
        return Err(invalid(
            "persons",
            format!(
                "persons must be {}–{}, got {}",
                limits.min_persons, limits.max_persons, persons
            ),
        ));
    }

    Ok(())
}

impl OrderPayload {
    /// Builds the submission body for a priced form.
    ///
    /// Carries all eight options from `price`, so the auto flags are the ones
    /// derived when the price was computed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidOrder`] if the date or time is missing,
    /// or if `price` was computed for a different service.
    /// Returns [`EngineError::CalculationError`] if the total does not fit an
    /// integer.
    pub fn from_quote(
        service: &Service,
        form: &BookingForm,
        price: &PriceResult,
    ) -> EngineResult<Self> {
        if price.kind != service.kind() || price.service_id != service.id() {
            return Err(invalid(
                "price",
                format!(
                    "quote is for {} {}, not {} {}",
                    price.kind,
                    price.service_id,
                    service.kind(),
                    service.id()
                ),
            ));
        }

        let total = price
            .total_units()
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("total {} does not fit an integer price", price.total),
            })?;

        let (tutor_id, course_id) = match service {
            Service::Course(course) => (None, Some(course.id)),
            Service::Tutor(tutor) => (Some(tutor.id), None),
        };

        Ok(Self {
            tutor_id,
            course_id,
            date_start: required_date(form)?,
            time_start: required_time(form)?,
            duration: form.duration_hours(service),
            persons: form.persons_or_default(),
            price: total,
            options: price.options,
        })
    }
}

/// Checks that a stored order belongs to `service`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidOrder`] when the order names another service
/// or none at all.
pub fn ensure_order_matches(order: &Order, service: &Service) -> EngineResult<()> {
    match order.service_ref() {
        Some((kind, id)) if kind == service.kind() && id == service.id() => Ok(()),
        Some((kind, id)) => Err(invalid(
            "service",
            format!(
                "order {} is for {} {}, not {} {}",
                order.id,
                kind,
                id,
                service.kind(),
                service.id()
            ),
        )),
        None => Err(invalid(
            "service",
            format!("order {} names neither a course nor a tutor", order.id),
        )),
    }
}
