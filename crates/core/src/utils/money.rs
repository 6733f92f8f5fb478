use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DISPLAY_DECIMAL_PRECISION, MAX_MONEY_VALUE};
use crate::errors::{Result, ValidationError};

/// Describes why `value` is not an acceptable amount, rate or revenue.
pub fn money_violation(label: &str, value: Decimal) -> Option<String> {
    if value.is_sign_negative() && !value.is_zero() {
        return Some(format!("{} cannot be negative", label));
    }
    let max = Decimal::from(MAX_MONEY_VALUE);
    if value > max {
        return Some(format!("{} cannot exceed {}", label, format_brl(max)));
    }
    None
}

/// Rejects negative values and values above [`MAX_MONEY_VALUE`].
pub fn check_money(label: &str, value: Decimal) -> Result<()> {
    match money_violation(label, value) {
        Some(msg) => Err(ValidationError::InvalidInput(msg).into()),
        None => Ok(()),
    }
}

/// Formats an amount as a Brazilian Real currency string, e.g. `R$ 1.000,00`.
pub fn format_brl(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    let abs = rounded.abs();
    let cents = (abs.fract() * Decimal::ONE_HUNDRED)
        .round()
        .to_u32()
        .unwrap_or(0);
    let integer = group_thousands(&abs.trunc().normalize().to_string());
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}R$ {},{:02}", sign, integer, cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_thousands_and_cents() {
        assert_eq!(format_brl(dec!(1000)), "R$ 1.000,00");
        assert_eq!(format_brl(dec!(200)), "R$ 200,00");
        assert_eq!(format_brl(dec!(1234567.891)), "R$ 1.234.567,89");
        assert_eq!(format_brl(dec!(0.5)), "R$ 0,50");
    }

    #[test]
    fn negative_amounts_carry_leading_sign() {
        assert_eq!(format_brl(dec!(-50)), "-R$ 50,00");
        assert_eq!(format_brl(dec!(-0.001)), "R$ 0,00");
    }

    #[test]
    fn money_checks_bound_both_sides() {
        assert!(check_money("amount", dec!(0)).is_ok());
        assert!(check_money("amount", Decimal::from(MAX_MONEY_VALUE)).is_ok());
        assert!(check_money("amount", dec!(-0.01)).is_err());
        assert!(check_money("amount", Decimal::from(MAX_MONEY_VALUE) + dec!(0.01)).is_err());
        assert!(check_money("rate", Decimal::MAX).is_err());
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_brl(dec!(10.005)), "R$ 10,01");
        assert_eq!(format_brl(dec!(999.999)), "R$ 1.000,00");
    }
}
