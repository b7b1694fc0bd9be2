//! The adjustment chain.
//!
//! Applies the enabled options to the base cost in the fixed order of
//! [`Adjustment::CHAIN`]: the five multipliers compound on the running
//! total, then the three fixed amounts are added. The running total is kept
//! unrounded until the very end.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{PricingConfig, RuleRef};
use crate::format::{format_factor, format_money, round_currency};
use crate::models::{Adjustment, AdjustmentEffect, AppliedAdjustment, AuditStep, OptionSet};

/// The result of applying the adjustment chain.
#[derive(Debug, Clone)]
pub struct AdjustmentChainResult {
    /// Rounded final total.
    pub total: Decimal,
    /// Breakdown lines of the steps that fired, in application order.
    pub breakdown: Vec<String>,
    /// Structured record of the steps that fired.
    pub applied: Vec<AppliedAdjustment>,
    /// One audit step per fired adjustment, then one for the final rounding.
    pub audit_steps: Vec<AuditStep>,
}

/// Applies every enabled adjustment to `base`.
///
/// `persons` and `weeks` below 1 are treated as 1. The order the options are
/// set in has no effect; only [`Adjustment::CHAIN`] decides the order.
///
/// # Examples
///
/// ```
/// use quote_engine::calculation::apply_chain;
/// use quote_engine::config::PricingConfig;
/// use quote_engine::models::OptionSet;
/// use rust_decimal::Decimal;
///
/// let options = OptionSet {
///     intensive_course: true,
///     supplementary: true,
///     ..OptionSet::default()
/// };
///
/// let result = apply_chain(Decimal::from(1000), 1, 1, &options, &PricingConfig::default(), 1);
/// // 1000 × 1.2 + 2000 × 1, never (1000 + 2000) × 1.2
/// assert_eq!(result.total, Decimal::from(3200));
/// assert_eq!(result.breakdown, vec!["Intensive ×1.2", "Materials +2 000₽"]);
/// ```
pub fn apply_chain(
    base: Decimal,
    persons: u32,
    weeks: u32,
    options: &OptionSet,
    config: &PricingConfig,
    step_number: u32,
) -> AdjustmentChainResult {
    let adjustments = config.adjustments();
    let currency = &config.tariff().currency_symbol;
    let persons = persons.max(1);
    let weeks = weeks.max(1);

    let mut running_total = base;
    let mut applied = Vec::new();
    let mut audit_steps = Vec::new();
    let mut step = step_number;

    for adjustment in options.enabled() {
        let before = running_total;

        let (effect, description, units) = match adjustments.rule(adjustment) {
            RuleRef::Percentage(rule) => {
                running_total = running_total.saturating_mul(rule.factor);
                (
                    AdjustmentEffect::Percentage {
                        factor: rule.factor,
                    },
                    format!("{} ×{}", rule.label, format_factor(rule.factor)),
                    None,
                )
            }
            RuleRef::Fixed(rule) => {
                let units = match adjustment {
                    Adjustment::Supplementary => persons,
                    Adjustment::Personalized => weeks,
                    _ => 1,
                };
                let amount = rule.amount.saturating_mul(Decimal::from(units));
                running_total = running_total.saturating_add(amount);
                (
                    AdjustmentEffect::Fixed { amount },
                    format!("{} +{}{}", rule.label, format_money(amount), currency),
                    Some(units),
                )
            }
        };

        debug!(
            adjustment = adjustment.option_name(),
            before = %before,
            after = %running_total,
            "Applied adjustment"
        );

        audit_steps.push(AuditStep {
            step_number: step,
            rule_id: adjustment.option_name().to_string(),
            rule_name: adjustments.label(adjustment).to_string(),
            input: serde_json::json!({
                "running_total": before.normalize().to_string(),
                "units": units
            }),
            output: serde_json::json!({
                "effect": effect,
                "running_total": running_total.normalize().to_string()
            }),
            reasoning: format!(
                "{}: {} -> {}",
                description,
                before.normalize(),
                running_total.normalize()
            ),
        });
        step += 1;

        applied.push(AppliedAdjustment {
            adjustment,
            label: adjustments.label(adjustment).to_string(),
            effect,
            running_total,
            description,
        });
    }

    let total = round_currency(running_total);

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "chain_total".to_string(),
        rule_name: "Chain Total".to_string(),
        input: serde_json::json!({
            "base": base.normalize().to_string(),
            "applied": applied.len(),
            "running_total": running_total.normalize().to_string()
        }),
        output: serde_json::json!({
            "total": total.to_string()
        }),
        reasoning: format!(
            "Rounded {} to {} after {} adjustment(s)",
            running_total.normalize(),
            total,
            applied.len()
        ),
    });

    let breakdown = applied.iter().map(|a| a.description.clone()).collect();

    AdjustmentChainResult {
        total,
        breakdown,
        applied,
        audit_steps,
    }
}
