//! Base cost calculation.
//!
//! ```text
//! base = round((fee × duration × weekend_factor + morning + evening) × max(1, persons))
//! ```
//!
//! Rounding happens once, on the whole expression.

use rust_decimal::Decimal;

use crate::config::PricingConfig;
use crate::format::round_currency;
use crate::models::{AuditStep, BaseCostParts, PricingInput};

use super::{time_band_surcharges, weekend_or_holiday_multiplier};

/// The result of a base cost calculation, including the parts and audit step.
#[derive(Debug, Clone)]
pub struct BaseCostResult {
    /// Rounded base cost.
    pub base: Decimal,
    /// Every intermediate of the formula.
    pub parts: BaseCostParts,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the base cost of a booking.
///
/// Never fails: a missing date or time contributes the neutral value, and
/// fewer than one person is priced as one.
///
/// # Examples
///
/// ```
/// use quote_engine::calculation::compute_base;
/// use quote_engine::config::PricingConfig;
/// use quote_engine::models::PricingInput;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let input = PricingInput {
///     fee_per_hour: Decimal::from(1000),
///     duration_hours: Decimal::from(2),
///     // New Year's Day
///     date_start: NaiveDate::from_ymd_opt(2024, 1, 1),
///     time_start: NaiveTime::from_hms_opt(10, 0, 0),
///     persons: 2,
///     weeks: 1,
/// };
///
/// let result = compute_base(&input, &PricingConfig::default(), 1);
/// // (1000 × 2 × 1.5 + 400 + 0) × 2
/// assert_eq!(result.base, Decimal::from(6800));
/// ```
pub fn compute_base(input: &PricingInput, config: &PricingConfig, step_number: u32) -> BaseCostResult {
    let weekend_factor = weekend_or_holiday_multiplier(input.date_start, config);
    let surcharges = time_band_surcharges(input.time_start, config.tariff());
    let persons = input.persons.max(1);

    // Saturating: duration is unvalidated form input.
    let per_person = input
        .fee_per_hour
        .saturating_mul(input.duration_hours)
        .saturating_mul(weekend_factor)
        .saturating_add(surcharges.morning)
        .saturating_add(surcharges.evening);
    let base = round_currency(per_person.saturating_mul(Decimal::from(persons)));

    let parts = BaseCostParts {
        fee: input.fee_per_hour,
        dur: input.duration_hours,
        weekend_factor,
        morning: surcharges.morning,
        evening: surcharges.evening,
        persons,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_cost".to_string(),
        rule_name: "Base Cost".to_string(),
        input: serde_json::json!({
            "fee_per_hour": input.fee_per_hour.normalize().to_string(),
            "duration_hours": input.duration_hours.normalize().to_string(),
            "date_start": input.date_start.map(|d| d.to_string()),
            "time_start": input.time_start.map(|t| t.format("%H:%M").to_string()),
            "persons": input.persons
        }),
        output: serde_json::json!({
            "weekend_factor": weekend_factor.normalize().to_string(),
            "morning": surcharges.morning.normalize().to_string(),
            "evening": surcharges.evening.normalize().to_string(),
            "persons": persons,
            "base": base.to_string()
        }),
        reasoning: format!("Base cost: {} = {}", parts.formula(), base),
    };

    BaseCostResult {
        base,
        parts,
        audit_step,
    }
}
