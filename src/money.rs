//! Decimal money helpers

use rust_decimal::{Decimal, RoundingStrategy};

/// Round half-up to `dp` decimal places. Amounts here are never negative,
/// so away-from-zero is the same as half-up.
pub fn round_half_up(amount: Decimal, dp: u32) -> Decimal {
    amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Format as US dollars with thousands separators, e.g. `$1,234.50`.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = round_half_up(amount, 2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(dec!(33.545), 2), dec!(33.55));
        assert_eq!(round_half_up(dec!(33.544), 2), dec!(33.54));
        assert_eq!(round_half_up(dec!(59.5), 0), dec!(60));
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(0)), "$0.00");
        assert_eq!(format_usd(dec!(1750)), "$1,750.00");
        assert_eq!(format_usd(dec!(999.999)), "$1,000.00");
        assert_eq!(format_usd(dec!(1234567.8)), "$1,234,567.80");
        assert_eq!(format_usd(dec!(-42.5)), "-$42.50");
    }
}
