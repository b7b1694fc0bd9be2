//! Time-of-day surcharges.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TariffConfig;

/// Flat surcharges for the booking's start time.
///
/// The bands do not overlap, so at most one of the two is non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBandSurcharges {
    /// Morning band surcharge, or 0.
    pub morning: Decimal,
    /// Evening band surcharge, or 0.
    pub evening: Decimal,
}

/// Looks up the surcharges for a start time.
///
/// A missing start time carries no surcharge.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::time_band_surcharges;
/// use quote_engine::config::TariffConfig;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let tariff = TariffConfig::default();
/// let surcharges = time_band_surcharges(NaiveTime::from_hms_opt(19, 0, 0), &tariff);
/// assert_eq!(surcharges.morning, Decimal::ZERO);
/// assert_eq!(surcharges.evening, Decimal::from(1000));
/// ```
pub fn time_band_surcharges(time: Option<NaiveTime>, tariff: &TariffConfig) -> TimeBandSurcharges {
    let Some(time) = time else {
        return TimeBandSurcharges::default();
    };

    let band_amount = |contains: bool, surcharge: Decimal| {
        if contains { surcharge } else { Decimal::ZERO }
    };

    TimeBandSurcharges {
        morning: band_amount(tariff.morning.contains(time), tariff.morning.surcharge),
        evening: band_amount(tariff.evening.contains(time), tariff.evening.surcharge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;

    fn at(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn surcharges(time: Option<NaiveTime>) -> (i64, i64) {
        let result = time_band_surcharges(time, &TariffConfig::default());
        (
            result.morning.to_i64().unwrap(),
            result.evening.to_i64().unwrap(),
        )
    }

    #[test]
    fn test_morning_band() {
        assert_eq!(surcharges(at(10, 0)), (400, 0));
        assert_eq!(surcharges(at(9, 0)), (400, 0));
        assert_eq!(surcharges(at(11, 59)), (400, 0));
    }

    #[test]
    fn test_evening_band() {
        assert_eq!(surcharges(at(19, 0)), (0, 1000));
        assert_eq!(surcharges(at(18, 0)), (0, 1000));
        assert_eq!(surcharges(at(19, 59)), (0, 1000));
    }

    #[test]
    fn test_band_edges_are_exclusive_at_the_top() {
        assert_eq!(surcharges(at(8, 59)), (0, 0));
        assert_eq!(surcharges(at(12, 0)), (0, 0));
        assert_eq!(surcharges(at(17, 59)), (0, 0));
        assert_eq!(surcharges(at(20, 0)), (0, 0));
    }

    #[test]
    fn test_seconds_do_not_move_a_time_out_of_band() {
        let time = NaiveTime::from_hms_opt(11, 59, 59);
        assert_eq!(surcharges(time), (400, 0));
    }

    #[test]
    fn test_missing_time_has_no_surcharge() {
        assert_eq!(surcharges(None), (0, 0));
    }
}
