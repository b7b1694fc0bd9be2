//! Booking Quote Engine for language courses and tutors
//!
//! This crate prices bookings for scheduled courses and individual tutors:
//! a base cost from the hourly fee, duration, weekend/holiday multiplier and
//! time-of-day surcharges, followed by a fixed chain of percentage and
//! fixed-amount adjustments. It also derives bookable slots and builds the
//! order payload submitted for a priced booking.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod models;
pub mod schedule;
