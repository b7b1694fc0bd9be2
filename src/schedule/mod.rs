//! Date and time-of-day helpers.
//!
//! Pure calendar arithmetic on dates and `HH:MM` clock strings, plus the
//! derivation of bookable course and tutor slots.

mod clock;
mod dates;
mod slots;

pub use clock::{
    MINUTES_PER_DAY, add_minutes, format_time, hhmm, minutes_of_day, parse_clock, parse_time,
    time_from_minutes,
};
pub use dates::{add_days, add_weeks, parse_date, parse_start_datetime, time_of};
pub use slots::{
    TimeSlot, course_last_lesson, course_start_dates, course_time_slots, is_course_start_date,
    tutor_booking_window, tutor_time_slots,
};
