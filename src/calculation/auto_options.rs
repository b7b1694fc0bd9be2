//! Derivation of the engine-controlled options.
//!
//! Early registration, group enrollment and intensive are never taken from the
//! caller. They are recomputed from the booking on every evaluation, and
//! early registration depends on the current date.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{AdjustmentConfig, AutoRules, PercentageRule};
use crate::format::format_factor;
use crate::models::{AuditStep, AutoOptions, Service};
use crate::schedule::add_days;

/// Derives the three auto options for a booking.
///
/// - early registration: the start date is at least `early_registration_lead_days`
///   after `today` (boundary inclusive)
/// - group enrollment: at least `group_min_persons` persons
/// - intensive: a course's weekly hours, or a tutor booking's total hours,
///   reach `intensive_min_hours`
///
/// # Example
///
/// ```
/// use quote_engine::calculation::derive_auto_options;
/// use quote_engine::config::AutoRules;
/// use quote_engine::models::{Service, Tutor};
/// use chrono::NaiveDate;
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
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// let auto = derive_auto_options(&tutor, Some(start), 5, Decimal::from(5), today, &AutoRules::default());
///
/// assert!(auto.early_registration);
/// assert!(auto.group_enrollment);
/// assert!(auto.intensive_course);
/// ```
pub fn derive_auto_options(
    service: &Service,
    date_start: Option<NaiveDate>,
    persons: u32,
    duration_hours: Decimal,
    today: NaiveDate,
    rules: &AutoRules,
) -> AutoOptions {
    let early_cutoff = add_days(today, i64::from(rules.early_registration_lead_days));
    let intensity = match service {
        Service::Course(course) => course.weekly_hours(),
        Service::Tutor(_) => duration_hours,
    };

    AutoOptions {
        early_registration: date_start.is_some_and(|date| date >= early_cutoff),
        group_enrollment: persons >= rules.group_min_persons,
        intensive_course: intensity >= rules.intensive_min_hours,
    }
}

/// Builds the audit step for auto option derivation.
pub(crate) fn auto_options_audit(
    service: &Service,
    date_start: Option<NaiveDate>,
    persons: u32,
    duration_hours: Decimal,
    today: NaiveDate,
    auto: &AutoOptions,
    step_number: u32,
) -> AuditStep {
    let intensity_source = match service {
        Service::Course(_) => "week_length",
        Service::Tutor(_) => "duration",
    };

    AuditStep {
        step_number,
        rule_id: "auto_options".to_string(),
        rule_name: "Auto Option Derivation".to_string(),
        input: serde_json::json!({
            "kind": service.kind().to_string(),
            "date_start": date_start.map(|d| d.to_string()),
            "today": today.to_string(),
            "persons": persons,
            "duration_hours": duration_hours.normalize().to_string(),
            "intensity_source": intensity_source
        }),
        output: serde_json::json!({
            "early_registration": auto.early_registration,
            "group_enrollment": auto.group_enrollment,
            "intensive_course": auto.intensive_course
        }),
        reasoning: format!(
            "Auto options as of {}: early_registration={}, group_enrollment={}, intensive_course={} (from {})",
            today,
            auto.early_registration,
            auto.group_enrollment,
            auto.intensive_course,
            intensity_source
        ),
    }
}

fn badge(name: &str, rule: &PercentageRule) -> String {
    let percent = (rule.factor - Decimal::ONE).saturating_mul(Decimal::ONE_HUNDRED);
    let sign = if percent.is_sign_negative() { "" } else { "+" };
    format!("{} {}{}%", name, sign, format_factor(percent))
}

/// Notices shown to the customer for the auto options that fired.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::auto_badges;
/// use quote_engine::config::AdjustmentConfig;
/// use quote_engine::models::AutoOptions;
///
/// let auto = AutoOptions { group_enrollment: true, ..AutoOptions::default() };
/// assert_eq!(auto_badges(&auto, &AdjustmentConfig::default()), vec!["Group discount -15%"]);
/// ```
pub fn auto_badges(auto: &AutoOptions, config: &AdjustmentConfig) -> Vec<String> {
    let mut badges = Vec::new();
    if auto.early_registration {
        badges.push(badge("Early registration discount", &config.early_registration));
    }
    if auto.group_enrollment {
        badges.push(badge("Group discount", &config.group_enrollment));
    }
    if auto.intensive_course {
        badges.push(badge("Intensive", &config.intensive_course));
    }
    badges
}
