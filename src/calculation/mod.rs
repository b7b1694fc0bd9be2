//! Pricing logic for the quote engine.
//!
//! This module contains all the calculation functions for pricing a booking:
//! weekend and holiday detection, time-of-day surcharges, the base cost
//! formula, derivation of the automatic options, the adjustment chain, the
//! full pricing pipeline and the checks run before an order is submitted.

mod adjustments;
mod auto_options;
mod base_cost;
mod day_detection;
mod price;
mod submission;
mod time_bands;

pub use adjustments::{AdjustmentChainResult, apply_chain};
pub use auto_options::{auto_badges, derive_auto_options};
pub use base_cost::{BaseCostResult, compute_base};
pub use day_detection::{DayType, get_day_type, is_holiday_or_weekend, weekend_or_holiday_multiplier};
pub use price::calculate_price;
pub use submission::{ensure_order_matches, validate_submission};
pub use time_bands::{TimeBandSurcharges, time_band_surcharges};
