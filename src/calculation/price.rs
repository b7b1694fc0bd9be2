//! The full pricing pipeline.

use chrono::NaiveDate;

use crate::config::PricingConfig;
use crate::models::{BookingForm, PriceResult, PricingInput, Service};

use super::auto_options::auto_options_audit;
use super::{apply_chain, compute_base, derive_auto_options};

/// Prices a booking form against a service.
///
/// Base cost first, then the auto options are derived as of `today` and
/// merged with the customer's choices, then the adjustment chain runs. The
/// result depends only on the arguments.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::calculate_price;
/// use quote_engine::config::PricingConfig;
/// use quote_engine::models::{BookingForm, Service, Tutor, UserOptions};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let tutor = Service::Tutor(Tutor {
///     id: 1,
///     name: "Anna".to_string(),
///     work_experience: 5,
///     languages_spoken: vec![],
///     languages_offered: vec![],
///     language_level: "B2".to_string(),
///     price_per_hour: Decimal::from(1000),
/// });
///
/// let form = BookingForm {
///     // Wednesday
///     date_start: NaiveDate::from_ymd_opt(2024, 1, 10),
///     time_start: NaiveTime::from_hms_opt(14, 0, 0),
///     duration: Some(Decimal::from(2)),
///     persons: Some(1),
///     choices: UserOptions { assessment: true, ..UserOptions::default() },
/// };
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// let result = calculate_price(&tutor, &form, &PricingConfig::default(), today);
/// assert_eq!(result.base_cost, Decimal::from(2000));
/// assert_eq!(result.total, Decimal::from(2300));
/// ```
pub fn calculate_price(
    service: &Service,
    form: &BookingForm,
    config: &PricingConfig,
    today: NaiveDate,
) -> PriceResult {
    let input = PricingInput::from_booking(service, form);

    let base = compute_base(&input, config, 1);

    let auto = derive_auto_options(
        service,
        input.date_start,
        input.persons,
        input.duration_hours,
        today,
        &config.adjustments().auto,
    );
    let auto_step = auto_options_audit(
        service,
        input.date_start,
        input.persons,
        input.duration_hours,
        today,
        &auto,
        2,
    );
    let options = form.choices.with_auto(auto);

    let chain = apply_chain(base.base, input.persons, input.weeks, &options, config, 3);

    let mut audit_steps = Vec::with_capacity(chain.audit_steps.len() + 2);
    audit_steps.push(base.audit_step);
    audit_steps.push(auto_step);
    audit_steps.extend(chain.audit_steps);

    PriceResult {
        kind: service.kind(),
        service_id: service.id(),
        base_cost: base.base,
        base_parts: base.parts,
        weeks: input.weeks,
        options,
        total: chain.total,
        breakdown: chain.breakdown,
        adjustments: chain.applied,
        audit_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Tutor, UserOptions};
    use chrono::{NaiveDateTime, NaiveTime};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_tutor(fee: &str) -> Service {
        Service::Tutor(Tutor {
            id: 21,
            name: "Sergey".to_string(),
            work_experience: 12,
            languages_spoken: vec![],
            languages_offered: vec!["English".to_string()],
            language_level: "C1".to_string(),
            price_per_hour: dec(fee),
        })
    }

    fn create_course() -> Service {
        Service::Course(Course {
            id: 31,
            name: "Japanese N5".to_string(),
            description: String::new(),
            teacher: "Yuki".to_string(),
            level: "Beginner".to_string(),
            total_length: 4,
            week_length: 5,
            start_dates: vec![
                NaiveDateTime::parse_from_str("2025-03-03 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
            ],
            course_fee_per_hour: dec("100"),
        })
    }

    fn today() -> NaiveDate {
        make_date("2025-01-15")
    }

    // ==========================================================================
    // PR-001: Holiday morning tutor booking, no options
    // ==========================================================================
    #[test]
    fn test_pr_001_holiday_morning_tutor() {
        let form = BookingForm {
            date_start: Some(make_date("2024-01-01")),
            time_start: NaiveTime::from_hms_opt(10, 0, 0),
            duration: Some(dec("2")),
            persons: Some(2),
            choices: UserOptions::default(),
        };
        let result = calculate_price(&create_tutor("1000"), &form, &PricingConfig::default(), today());

        assert_eq!(result.base_cost, dec("6800"));
        assert_eq!(result.total, dec("6800"));
        assert!(result.breakdown.is_empty());
        assert_eq!(result.options, Default::default());
    }

    // ==========================================================================
    // PR-002: Course booking picks up intensive and early registration
    // ==========================================================================
    #[test]
    fn test_pr_002_course_auto_options() {
        let form = BookingForm {
            // Monday, 47 days after today
            date_start: Some(make_date("2025-03-03")),
            time_start: NaiveTime::from_hms_opt(14, 0, 0),
            duration: None,
            persons: Some(1),
            choices: UserOptions::default(),
        };
        let result = calculate_price(&create_course(), &form, &PricingConfig::default(), today());

        // 100 × 20 hours = 2000; × 0.9 × 1.2 = 2160
        assert_eq!(result.base_cost, dec("2000"));
        assert!(result.options.early_registration);
        assert!(result.options.intensive_course);
        assert!(!result.options.group_enrollment);
        assert_eq!(result.total, dec("2160"));
        assert_eq!(result.breakdown, vec!["Early registration ×0.9", "Intensive ×1.2"]);
        assert_eq!(result.weeks, 4);
    }

    // ==========================================================================
    // PR-003: Personalised plan counts billing weeks
    // ==========================================================================
    #[test]
    fn test_pr_003_personalized_uses_billing_weeks() {
        let form = BookingForm {
            date_start: Some(make_date("2025-01-22")),
            duration: Some(dec("9")),
            persons: Some(1),
            choices: UserOptions {
                personalized: true,
                ..UserOptions::default()
            },
            ..BookingForm::default()
        };
        let result = calculate_price(&create_tutor("100"), &form, &PricingConfig::default(), today());

        // 2025-01-22 is a Wednesday. 100 × 9 = 900 × 1.2 (intensive) = 1080
        // + 1500 × ceil(9 / 4) = 4500
        assert_eq!(result.weeks, 3);
        assert_eq!(result.total, dec("5580"));
    }

    #[test]
    fn test_early_registration_needs_lead_time() {
        // tomorrow is inside the 30-day lead time
        let form = BookingForm {
            date_start: Some(make_date("2025-01-16")),
            duration: Some(dec("1")),
            persons: Some(1),
            ..BookingForm::default()
        };
        let result = calculate_price(&create_tutor("1000"), &form, &PricingConfig::default(), today());
        assert!(!result.options.early_registration);
        assert_eq!(result.total, dec("1000"));
    }

    #[test]
    fn test_absurd_duration_saturates() {
        let form = BookingForm {
            duration: Some(dec("70000000000000000000000000000")),
            ..BookingForm::default()
        };
        let result = calculate_price(&create_tutor("1000"), &form, &PricingConfig::default(), today());

        assert_eq!(result.base_cost, Decimal::MAX);
        assert_eq!(result.total, Decimal::MAX);
        assert!(result.options.intensive_course);
        assert_eq!(result.total_units(), None);
    }

    #[test]
    fn test_unreachable_lead_time_still_prices() {
        let mut adjustments = crate::config::AdjustmentConfig::default();
        adjustments.auto.early_registration_lead_days = u32::MAX;
        let config = PricingConfig::new(Default::default(), Default::default(), adjustments);
        let form = BookingForm {
            date_start: Some(make_date("2025-06-04")),
            duration: Some(dec("2")),
            ..BookingForm::default()
        };

        let result = calculate_price(&create_tutor("1000"), &form, &config, today());
        assert!(!result.options.early_registration);
        assert_eq!(result.total, dec("2000"));
    }

    #[test]
    fn test_empty_form_prices_zero() {
        let result = calculate_price(
            &create_tutor("1000"),
            &BookingForm::default(),
            &PricingConfig::default(),
            today(),
        );
        assert_eq!(result.base_cost, Decimal::ZERO);
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.base_parts.persons, 1);
    }

    #[test]
    fn test_audit_trail_sequence() {
        let form = BookingForm {
            duration: Some(dec("2")),
            choices: UserOptions {
                assessment: true,
                ..UserOptions::default()
            },
            ..BookingForm::default()
        };
        let result = calculate_price(&create_tutor("1000"), &form, &PricingConfig::default(), today());

        let ids: Vec<&str> = result.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["base_cost", "auto_options", "assessment", "chain_total"]);
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_summary_of_priced_booking() {
        let form = BookingForm {
            date_start: Some(make_date("2024-01-01")),
            time_start: NaiveTime::from_hms_opt(10, 0, 0),
            duration: Some(dec("2")),
            persons: Some(2),
            choices: UserOptions {
                assessment: true,
                ..UserOptions::default()
            },
        };
        let result = calculate_price(&create_tutor("1000"), &form, &PricingConfig::default(), today());
        assert_eq!(
            result.summary(),
            "Base: ((1 000×2×1.5) + 400 + 0) × 2 • Options: Assessment +300₽"
        );
    }

    proptest! {
        #[test]
        fn pricing_is_deterministic(
            fee in 0u32..3000,
            hours in 1u32..40,
            persons in 1u32..20,
            day in 0i64..200,
            supplementary in any::<bool>(),
            interactive in any::<bool>(),
        ) {
            let form = BookingForm {
                date_start: Some(today() + chrono::Duration::days(day)),
                time_start: NaiveTime::from_hms_opt(9, 30, 0),
                duration: Some(Decimal::from(hours)),
                persons: Some(persons),
                choices: UserOptions {
                    supplementary,
                    interactive,
                    ..UserOptions::default()
                },
            };
            let tutor = create_tutor(&fee.to_string());
            let config = PricingConfig::default();

            let first = calculate_price(&tutor, &form, &config, today());
            let second = calculate_price(&tutor, &form, &config, today());
            prop_assert_eq!(first, second);
        }
    }
}
