//! Configuration types for the quote engine.
//!
//! These are deserialized from the YAML files of a tariff directory. Every
//! type also has a `Default` carrying the stock tariff, so the engine can run
//! without a directory.

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::Adjustment;
use crate::schedule::{hhmm, minutes_of_day, time_from_minutes};

/// Upper bound accepted for day counts measured from today.
pub const MAX_DAYS_AHEAD: u32 = 3650;

fn clock(hour: u32, minute: u32) -> NaiveTime {
    time_from_minutes(hour * 60 + minute).unwrap_or(NaiveTime::MIN)
}

/// A half-open time-of-day window `[start, end)` carrying a flat surcharge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeBand {
    /// First minute inside the band.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// First minute after the band.
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    /// Flat amount added per person when the booking starts inside the band.
    pub surcharge: Decimal,
}

impl TimeBand {
    /// Returns whether a start time falls inside `[start, end)`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let minute = minutes_of_day(time);
        minutes_of_day(self.start) <= minute && minute < minutes_of_day(self.end)
    }

    /// Returns whether two bands share at least one minute.
    pub fn overlaps(&self, other: &TimeBand) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The grid of start times offered for tutor bookings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlotGrid {
    /// Earliest start time.
    #[serde(with = "hhmm")]
    pub first: NaiveTime,
    /// Latest start time (inclusive).
    #[serde(with = "hhmm")]
    pub last: NaiveTime,
    /// Minutes between consecutive slots.
    pub step_minutes: u32,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            first: clock(9, 0),
            last: clock(20, 0),
            step_minutes: 30,
        }
    }
}

/// Bounds checked before an order is submitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookingLimits {
    /// Fewest persons per booking.
    pub min_persons: u32,
    /// Most persons per booking.
    pub max_persons: u32,
    /// Shortest tutor booking in hours.
    pub tutor_min_hours: Decimal,
    /// Longest tutor booking in hours.
    pub tutor_max_hours: Decimal,
    /// How many days ahead a tutor can be booked.
    pub tutor_horizon_days: u32,
}

impl Default for BookingLimits {
    fn default() -> Self {
        Self {
            min_persons: 1,
            max_persons: 20,
            tutor_min_hours: Decimal::from(1),
            tutor_max_hours: Decimal::from(40),
            tutor_horizon_days: 90,
        }
    }
}

/// Tariff settings from `tariff.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TariffConfig {
    /// Short tariff code.
    pub code: String,
    /// Human-readable tariff name.
    pub name: String,
    /// ISO currency code.
    pub currency: String,
    /// Symbol appended to amounts in breakdown lines.
    pub currency_symbol: String,
    /// Factor applied to `fee × duration` on weekends and holidays.
    pub weekend_multiplier: Decimal,
    /// Morning surcharge band.
    pub morning: TimeBand,
    /// Evening surcharge band.
    pub evening: TimeBand,
    /// Tutor start-time grid.
    #[serde(default)]
    pub tutor_slots: SlotGrid,
    /// Order validation limits.
    #[serde(default)]
    pub limits: BookingLimits,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            code: "lingua_moscow".to_string(),
            name: "LinguaMoscow standard tariff".to_string(),
            currency: "RUB".to_string(),
            currency_symbol: "₽".to_string(),
            weekend_multiplier: Decimal::new(15, 1),
            morning: TimeBand {
                start: clock(9, 0),
                end: clock(12, 0),
                surcharge: Decimal::from(400),
            },
            evening: TimeBand {
                start: clock(18, 0),
                end: clock(20, 0),
                surcharge: Decimal::from(1000),
            },
            tutor_slots: SlotGrid::default(),
            limits: BookingLimits::default(),
        }
    }
}

impl TariffConfig {
    /// Checks values serde cannot express as types.
    pub fn validate(&self) -> Result<(), String> {
        if self.weekend_multiplier <= Decimal::ZERO {
            return Err("weekend_multiplier must be positive".to_string());
        }
        for (name, band) in [("morning", &self.morning), ("evening", &self.evening)] {
            if band.start >= band.end {
                return Err(format!("{} band must start before it ends", name));
            }
            if band.surcharge < Decimal::ZERO {
                return Err(format!("{} band surcharge must not be negative", name));
            }
        }
        if self.morning.overlaps(&self.evening) {
            return Err("morning and evening bands must not overlap".to_string());
        }
        if self.tutor_slots.step_minutes == 0 {
            return Err("tutor_slots.step_minutes must be positive".to_string());
        }
        if self.tutor_slots.first > self.tutor_slots.last {
            return Err("tutor_slots.first must not be after tutor_slots.last".to_string());
        }
        if self.limits.min_persons > self.limits.max_persons {
            return Err("limits.min_persons must not exceed limits.max_persons".to_string());
        }
        if self.limits.tutor_min_hours > self.limits.tutor_max_hours {
            return Err("limits.tutor_min_hours must not exceed limits.tutor_max_hours".to_string());
        }
        if self.limits.tutor_horizon_days > MAX_DAYS_AHEAD {
            return Err(format!(
                "limits.tutor_horizon_days must not exceed {}",
                MAX_DAYS_AHEAD
            ));
        }
        Ok(())
    }
}

/// A holiday observed on the same month and day every year.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixedHoliday {
    /// Month, 1-12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Holiday name.
    pub name: String,
}

impl FixedHoliday {
    fn new(month: u32, day: u32, name: &str) -> Self {
        Self {
            month,
            day,
            name: name.to_string(),
        }
    }

    /// Returns whether the holiday falls on `date`, in any year.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

/// Holiday table from `holidays.yaml`.
///
/// Only fixed month/day holidays are supported; there are no movable feasts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HolidayCalendar {
    /// Region the table applies to.
    pub region: String,
    /// The holidays.
    pub holidays: Vec<FixedHoliday>,
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        let mut holidays: Vec<FixedHoliday> = (1..=8)
            .map(|day| match day {
                7 => FixedHoliday::new(1, day, "Orthodox Christmas"),
                _ => FixedHoliday::new(1, day, "New Year holidays"),
            })
            .collect();
        holidays.extend([
            FixedHoliday::new(2, 23, "Defender of the Fatherland Day"),
            FixedHoliday::new(3, 8, "International Women's Day"),
            FixedHoliday::new(5, 1, "Spring and Labour Day"),
            FixedHoliday::new(5, 9, "Victory Day"),
            FixedHoliday::new(6, 12, "Russia Day"),
            FixedHoliday::new(11, 4, "Unity Day"),
        ]);

        Self {
            region: "RU".to_string(),
            holidays,
        }
    }
}

impl HolidayCalendar {
    /// Returns the holiday falling on `date`, if any.
    pub fn holiday_on(&self, date: NaiveDate) -> Option<&FixedHoliday> {
        self.holidays.iter().find(|h| h.falls_on(date))
    }

    /// Returns whether `date` is a holiday.
    pub fn is_fixed_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_on(date).is_some()
    }

    /// Checks that every entry names a real calendar day.
    pub fn validate(&self) -> Result<(), String> {
        for holiday in &self.holidays {
            // 2000 is a leap year, so Feb 29 is accepted.
            if NaiveDate::from_ymd_opt(2000, holiday.month, holiday.day).is_none() {
                return Err(format!(
                    "holiday '{}' has invalid month/day {}/{}",
                    holiday.name, holiday.month, holiday.day
                ));
            }
        }
        Ok(())
    }
}

/// Thresholds for the engine-derived options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AutoRules {
    /// Minimum days between today and the start date for early registration.
    pub early_registration_lead_days: u32,
    /// Minimum persons for the group discount.
    pub group_min_persons: u32,
    /// Minimum hours (weekly for courses, booked for tutors) for intensive.
    pub intensive_min_hours: Decimal,
}

impl Default for AutoRules {
    fn default() -> Self {
        Self {
            early_registration_lead_days: 30,
            group_min_persons: 5,
            intensive_min_hours: Decimal::from(5),
        }
    }
}

/// A chain step that multiplies the running total.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PercentageRule {
    /// Breakdown label.
    pub label: String,
    /// Multiplier applied to the running total.
    pub factor: Decimal,
}

/// A chain step that adds an amount to the running total.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixedRule {
    /// Breakdown label.
    pub label: String,
    /// Amount per unit (person, week, or flat).
    pub amount: Decimal,
}

/// How a chain step changes the running total, as configured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleRef<'a> {
    /// Multiply.
    Percentage(&'a PercentageRule),
    /// Add.
    Fixed(&'a FixedRule),
}

/// Adjustment settings from `adjustments.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdjustmentConfig {
    /// Auto-derivation thresholds.
    #[serde(default)]
    pub auto: AutoRules,
    /// Early registration discount.
    pub early_registration: PercentageRule,
    /// Group discount.
    pub group_enrollment: PercentageRule,
    /// Intensive surcharge.
    pub intensive_course: PercentageRule,
    /// Excursions surcharge.
    pub excursions: PercentageRule,
    /// Interactive platform surcharge.
    pub interactive: PercentageRule,
    /// Materials, per person.
    pub supplementary: FixedRule,
    /// Personalised plan, per billing week.
    pub personalized: FixedRule,
    /// Assessment, flat.
    pub assessment: FixedRule,
}

fn percentage(label: &str, factor: Decimal) -> PercentageRule {
    PercentageRule {
        label: label.to_string(),
        factor,
    }
}

fn fixed(label: &str, amount: i64) -> FixedRule {
    FixedRule {
        label: label.to_string(),
        amount: Decimal::from(amount),
    }
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            auto: AutoRules::default(),
            early_registration: percentage("Early registration", Decimal::new(90, 2)),
            group_enrollment: percentage("Group 5+", Decimal::new(85, 2)),
            intensive_course: percentage("Intensive", Decimal::new(120, 2)),
            excursions: percentage("Excursions", Decimal::new(125, 2)),
            interactive: percentage("Platform", Decimal::new(150, 2)),
            supplementary: fixed("Materials", 2000),
            personalized: fixed("Personalized", 1500),
            assessment: fixed("Assessment", 300),
        }
    }
}

impl AdjustmentConfig {
    /// Returns the configured rule for a chain step.
    pub fn rule(&self, adjustment: Adjustment) -> RuleRef<'_> {
        match adjustment {
            Adjustment::EarlyRegistration => RuleRef::Percentage(&self.early_registration),
            Adjustment::GroupEnrollment => RuleRef::Percentage(&self.group_enrollment),
            Adjustment::IntensiveCourse => RuleRef::Percentage(&self.intensive_course),
            Adjustment::Excursions => RuleRef::Percentage(&self.excursions),
            Adjustment::Interactive => RuleRef::Percentage(&self.interactive),
            Adjustment::Supplementary => RuleRef::Fixed(&self.supplementary),
            Adjustment::Personalized => RuleRef::Fixed(&self.personalized),
            Adjustment::Assessment => RuleRef::Fixed(&self.assessment),
        }
    }

    /// Returns the breakdown label of a chain step.
    pub fn label(&self, adjustment: Adjustment) -> &str {
        match self.rule(adjustment) {
            RuleRef::Percentage(rule) => &rule.label,
            RuleRef::Fixed(rule) => &rule.label,
        }
    }

    /// Checks that factors are positive, amounts are not negative and the
    /// early registration lead time is bounded.
    pub fn validate(&self) -> Result<(), String> {
        if self.auto.early_registration_lead_days > MAX_DAYS_AHEAD {
            return Err(format!(
                "auto.early_registration_lead_days must not exceed {}",
                MAX_DAYS_AHEAD
            ));
        }
        for adjustment in Adjustment::CHAIN {
            match self.rule(adjustment) {
                RuleRef::Percentage(rule) if rule.factor <= Decimal::ZERO => {
                    return Err(format!(
                        "{} factor must be positive",
                        adjustment.option_name()
                    ));
                }
                RuleRef::Fixed(rule) if rule.amount < Decimal::ZERO => {
                    return Err(format!(
                        "{} amount must not be negative",
                        adjustment.option_name()
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// The complete pricing configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingConfig {
    tariff: TariffConfig,
    holidays: HolidayCalendar,
    adjustments: AdjustmentConfig,
}

impl PricingConfig {
    /// Creates a PricingConfig from its component parts.
    pub fn new(
        tariff: TariffConfig,
        holidays: HolidayCalendar,
        adjustments: AdjustmentConfig,
    ) -> Self {
        Self {
            tariff,
            holidays,
            adjustments,
        }
    }

    /// Returns the tariff settings.
    pub fn tariff(&self) -> &TariffConfig {
        &self.tariff
    }

    /// Returns the holiday table.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    /// Returns the adjustment settings.
    pub fn adjustments(&self) -> &AdjustmentConfig {
        &self.adjustments
    }
}
