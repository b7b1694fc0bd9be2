//! Display formatting for prices, factors and dates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to whole currency units, halves away from zero.
///
/// This is the only rounding the engine applies to money.
///
/// # Example
///
/// ```
/// use quote_engine::format::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("764.5").unwrap()), Decimal::from(765));
/// assert_eq!(round_currency(Decimal::from_str("764.49").unwrap()), Decimal::from(764));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as whole units with space-separated thousands.
///
/// # Example
///
/// ```
/// use quote_engine::format::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::from(1234567)), "1 234 567");
/// assert_eq!(format_money(Decimal::from(950)), "950");
/// ```
pub fn format_money(amount: Decimal) -> String {
    let rounded = round_currency(amount).normalize();
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a multiplier without trailing zeros: `1.50` becomes `"1.5"`.
pub fn format_factor(factor: Decimal) -> String {
    factor.normalize().to_string()
}

/// Formats a date as `DD.MM.YYYY`.
pub fn format_date_ru(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
