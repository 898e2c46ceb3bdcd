//! Money arithmetic on `rust_decimal::Decimal`.
//!
//! Prices are carried as `Decimal` end to end. Only derived amounts (discounts) are
//! rounded, to 2 decimal places half-up.

use rust_decimal::{Decimal, RoundingStrategy};

const DECIMAL_PLACES: u32 = 2;

/// Rounds to cents, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `unit_price × quantity`.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// `amount × percent / 100`, rounded to cents.
pub fn percent_of(amount: Decimal, percent: u32) -> Decimal {
    round_money(amount * Decimal::from(percent) / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_of(dec("30"), 10), dec("3"));
        assert_eq!(percent_of(dec("0.05"), 50), dec("0.03"));
        assert_eq!(percent_of(dec("19.99"), 15), dec("3.00"));
    }

    #[test]
    fn line_total_multiplies() {
        assert_eq!(line_total(dec("12.50"), 3), dec("37.50"));
        assert_eq!(line_total(dec("12.50"), 0), Decimal::ZERO);
    }
}
