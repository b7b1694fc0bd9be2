//! Quote result models.
//!
//! This module contains the [`PriceResult`] produced by the pricing pipeline
//! and the [`Quote`] envelope the engine wraps it in, together with the audit
//! structures that record every pricing decision.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format::{format_factor, format_money};

use super::{Adjustment, BookingKind, OptionSet};

/// A single step in the audit trail recording a pricing decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Identifier of the rule that was applied.
    pub rule_id: String,
    /// Human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Every named intermediate of the base-cost formula.
///
/// The formula string can be rebuilt from these fields alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseCostParts {
    /// Hourly fee.
    pub fee: Decimal,
    /// Billable hours.
    pub dur: Decimal,
    /// Weekend/holiday multiplier.
    pub weekend_factor: Decimal,
    /// Morning surcharge.
    pub morning: Decimal,
    /// Evening surcharge.
    pub evening: Decimal,
    /// Headcount after clamping to at least 1.
    pub persons: u32,
}

impl BaseCostParts {
    /// Renders the formula, e.g. `((1 000×2×1.5) + 400 + 0) × 2`.
    pub fn formula(&self) -> String {
        format!(
            "(({}×{}×{}) + {} + {}) × {}",
            format_money(self.fee),
            self.dur.normalize(),
            format_factor(self.weekend_factor),
            self.morning.normalize(),
            self.evening.normalize(),
            self.persons
        )
    }
}

/// How one adjustment changed the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdjustmentEffect {
    /// The running total was multiplied by `factor`.
    Percentage {
        /// Multiplier.
        factor: Decimal,
    },
    /// `amount` was added to the running total.
    Fixed {
        /// Amount added, already scaled by persons or weeks.
        amount: Decimal,
    },
}

/// One adjustment that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedAdjustment {
    /// Which chain step.
    pub adjustment: Adjustment,
    /// Configured label.
    pub label: String,
    /// What it did.
    pub effect: AdjustmentEffect,
    /// Unrounded running total after this step.
    pub running_total: Decimal,
    /// The breakdown line for this step.
    pub description: String,
}

/// The priced booking.
///
/// `base_cost` and `total` are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResult {
    /// Booking kind.
    pub kind: BookingKind,
    /// Catalogue id of the service.
    pub service_id: u64,
    /// Rounded base cost.
    pub base_cost: Decimal,
    /// Base-cost intermediates.
    pub base_parts: BaseCostParts,
    /// Billing weeks used by the per-week addition.
    pub weeks: u32,
    /// The option set that was priced, auto flags freshly derived.
    pub options: OptionSet,
    /// Rounded final price.
    pub total: Decimal,
    /// Breakdown lines of the steps that fired, in application order.
    pub breakdown: Vec<String>,
    /// Structured view of the same steps.
    pub adjustments: Vec<AppliedAdjustment>,
    /// Audit trail.
    pub audit_steps: Vec<AuditStep>,
}

impl PriceResult {
    /// One-line explanation of the price.
    ///
    /// # Example
    ///
    /// ```
    /// use quote_engine::models::{BaseCostParts, BookingKind, OptionSet, PriceResult};
    /// use rust_decimal::Decimal;
    ///
    /// let result = PriceResult {
    ///     kind: BookingKind::Tutor,
    ///     service_id: 1,
    ///     base_cost: Decimal::from(2000),
    ///     base_parts: BaseCostParts {
    ///         fee: Decimal::from(1000),
    ///         dur: Decimal::from(2),
    ///         weekend_factor: Decimal::ONE,
    ///         morning: Decimal::ZERO,
    ///         evening: Decimal::ZERO,
    ///         persons: 1,
    ///     },
    ///     weeks: 1,
    ///     options: OptionSet::default(),
    ///     total: Decimal::from(2300),
    ///     breakdown: vec!["Assessment +300₽".to_string()],
    ///     adjustments: vec![],
    ///     audit_steps: vec![],
    /// };
    ///
    /// assert_eq!(
    ///     result.summary(),
    ///     "Base: ((1 000×2×1) + 0 + 0) × 1 • Options: Assessment +300₽"
    /// );
    /// ```
    pub fn summary(&self) -> String {
        let mut summary = format!("Base: {}", self.base_parts.formula());
        if !self.breakdown.is_empty() {
            summary.push_str(" • Options: ");
            summary.push_str(&self.breakdown.join(", "));
        }
        summary
    }

    /// Whole-unit total as an integer.
    ///
    /// `None` if the total does not fit an `i64`.
    pub fn total_units(&self) -> Option<i64> {
        use rust_decimal::prelude::ToPrimitive;
        self.total.trunc().to_i64()
    }
}

/// A priced booking with its identity and timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique id, also used as the log correlation id.
    pub quote_id: Uuid,
    /// When the quote was produced.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced it.
    pub engine_version: String,
    /// The price.
    pub price: PriceResult,
    /// Time spent pricing, in microseconds.
    pub duration_us: u64,
}
