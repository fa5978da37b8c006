//! Money text parsing and rounding shared by the CSV side and the page side.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for every price and delta.
pub const CURRENCY_SCALE: u32 = 2;

/// Round to cents, half away from zero.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse a textual amount such as `" $1,234.50 "`, `"€12"` or `"-$3.00"`.
///
/// Surrounding whitespace and one leading currency symbol run are dropped,
/// a `-` is accepted on either side of the symbol, and thousands separators
/// are removed. Returns `None` when what is left is not a plain decimal
/// number, so words before the number are rejected rather than skipped.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let mut rest = text.trim();
    let mut negative = false;
    if let Some(unsigned) = rest.strip_prefix('-') {
        negative = true;
        rest = unsigned.trim_start();
    }

    rest = rest.trim_start_matches(is_currency_symbol).trim_start();
    if !negative {
        if let Some(unsigned) = rest.strip_prefix('-') {
            negative = true;
            rest = unsigned;
        }
    }

    let value = parse_decimal_run(rest)?;
    Some(if negative { -value } else { value })
}

fn is_currency_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '.' | ',')
}

/// Parse a run made only of digits, `.` and `,` thousands separators.
pub fn parse_decimal_run(run: &str) -> Option<Decimal> {
    let cleaned: String = run.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount_with_symbol_and_whitespace() {
        assert_eq!(parse_amount("$20.99"), Some(dec!(20.99)));
        assert_eq!(parse_amount("  $ 11.17 "), Some(dec!(11.17)));
        assert_eq!(parse_amount("€5"), Some(dec!(5)));
        assert_eq!(parse_amount("£1,299.00"), Some(dec!(1299.00)));
        assert_eq!(parse_amount("7.5"), Some(dec!(7.5)));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount("$abc"), None);
        assert_eq!(parse_amount("$12.5x"), None);
        assert_eq!(parse_amount("$1.2.3"), None);
    }

    #[test]
    fn test_parse_amount_keeps_sign() {
        assert_eq!(parse_amount("-$3.00"), Some(dec!(-3.00)));
        assert_eq!(parse_amount("$-5.00"), Some(dec!(-5.00)));
        assert_eq!(parse_amount(" - $ 2.50"), Some(dec!(-2.50)));
        assert_eq!(parse_amount("-$-1.00"), None);
    }

    #[test]
    fn test_parse_amount_rejects_leading_words() {
        assert_eq!(parse_amount("Total 12.50"), None);
        assert_eq!(parse_amount("USD 12.50"), None);
        assert_eq!(parse_amount("$ about 3"), None);
    }

    #[test]
    fn test_decimal_run() {
        assert_eq!(parse_decimal_run("15.00"), Some(dec!(15.00)));
        assert_eq!(parse_decimal_run("1,015.00"), Some(dec!(1015.00)));
        assert_eq!(parse_decimal_run("15 00"), None);
        assert_eq!(parse_decimal_run("$15"), None);
    }

    #[test]
    fn test_round_currency_half_away_from_zero() {
        assert_eq!(round_currency(dec!(1.005)), dec!(1.01));
        assert_eq!(round_currency(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_currency(dec!(5.994)), dec!(5.99));
        assert_eq!(round_currency(dec!(2.125)), dec!(2.13));
    }
}
