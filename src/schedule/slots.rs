//! Bookable dates and start times.
//!
//! Courses publish a fixed list of start date-times; tutors can be booked on
//! any day inside a rolling window, at any slot of a regular time grid.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::SlotGrid;
use crate::models::Course;

use super::clock::{format_time, hhmm, minutes_of_day, time_from_minutes};
use super::dates::{add_days, add_weeks};

/// A selectable start time with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Start time.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Display label, e.g. `"09:00–12:00"` for a course or `"09:00"` for a tutor.
    pub label: String,
}

/// Groups a course's start date-times by date.
///
/// Times on each date are sorted and de-duplicated; seconds are dropped.
pub fn course_start_dates(course: &Course) -> BTreeMap<NaiveDate, Vec<NaiveTime>> {
    let mut dates: BTreeMap<NaiveDate, Vec<NaiveTime>> = BTreeMap::new();

    for start in &course.start_dates {
        let Some(time) = time_from_minutes(minutes_of_day(start.time())) else {
            continue;
        };
        dates.entry(start.date()).or_default().push(time);
    }

    for times in dates.values_mut() {
        times.sort();
        times.dedup();
    }

    dates
}

/// Returns whether `date` is one of the course's offered start dates.
pub fn is_course_start_date(course: &Course, date: NaiveDate) -> bool {
    course.start_dates.iter().any(|start| start.date() == date)
}

/// Lists the course's start times on `date`, each labelled with its end time.
///
/// A session ends `week_length` hours after it starts. An empty list means
/// the course does not start on that date.
///
/// # Example
///
/// ```
/// use quote_engine::models::Course;
/// use quote_engine::schedule::course_time_slots;
/// use chrono::NaiveDate;
///
/// let course: Course = serde_json::from_str(r#"{
///     "id": 1,
///     "name": "French A2",
///     "total_length": 6,
///     "week_length": 2,
///     "start_dates": ["2025-04-07T18:00:00", "2025-04-07T10:00:00"],
///     "course_fee_per_hour": 500
/// }"#).unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
/// let labels: Vec<String> = course_time_slots(&course, date)
///     .into_iter()
///     .map(|slot| slot.label)
///     .collect();
/// assert_eq!(labels, vec!["10:00–12:00", "18:00–20:00"]);
/// ```
pub fn course_time_slots(course: &Course, date: NaiveDate) -> Vec<TimeSlot> {
    let session_minutes = course.week_length.saturating_mul(60);

    course_start_dates(course)
        .remove(&date)
        .unwrap_or_default()
        .into_iter()
        .map(|start| {
            let from = minutes_of_day(start);
            TimeSlot {
                start,
                label: format!(
                    "{}–{}",
                    format_time(from),
                    format_time(from.saturating_add(session_minutes))
                ),
            }
        })
        .collect()
}

/// Lists tutor start times from `grid.first` to `grid.last` inclusive.
pub fn tutor_time_slots(grid: &SlotGrid) -> Vec<TimeSlot> {
    let first = minutes_of_day(grid.first);
    let last = minutes_of_day(grid.last);
    let step = grid.step_minutes.max(1) as usize;

    (first..=last)
        .step_by(step)
        .filter_map(|minute| {
            time_from_minutes(minute).map(|start| TimeSlot {
                start,
                label: format_time(minute),
            })
        })
        .collect()
}

/// Date of the last weekly lesson of a course starting on `date`.
///
/// A zero-length course is treated as a single week.
pub fn course_last_lesson(date: NaiveDate, total_length: u32) -> NaiveDate {
    add_weeks(date, i64::from(total_length.max(1)) - 1)
}

/// The inclusive range of dates a tutor can be booked on.
pub fn tutor_booking_window(today: NaiveDate, horizon_days: u32) -> (NaiveDate, NaiveDate) {
    (today, add_days(today, i64::from(horizon_days)))
}
