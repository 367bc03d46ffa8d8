//! # Money Module
//!
//! Monetary amount parsing and formatting. Every balance and transaction
//! amount is a fixed-point decimal with two fraction digits, backed by
//! `rust_decimal` for exact arithmetic.

use crate::error::CoreError;
use rust_decimal::Decimal;

/// Fraction digits carried by every stored amount
pub const SCALE: u32 = 2;

/// Parse a user-entered monetary amount.
///
/// Accepts plain decimal notation ("100", "42.5", "0.07"). Rejects
/// non-numeric input, negative values, and more than two fraction digits.
/// Parsing happens before any mutation, so a failure has no side effects.
///
/// # Examples
/// ```
/// use minibank_core::money::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("42.50").unwrap(), Decimal::new(4250, 2));
/// assert!(parse_amount("-1").is_err());
/// ```
pub fn parse_amount(input: &str) -> Result<Decimal, CoreError> {
    let trimmed = input.trim();
    let amount: Decimal = trimmed
        .parse()
        .map_err(|_| CoreError::InvalidAmount(format!("not a number: '{}'", trimmed)))?;

    if amount.is_sign_negative() {
        return Err(CoreError::InvalidAmount(format!(
            "must not be negative: {}",
            amount
        )));
    }

    if amount.scale() > SCALE {
        return Err(CoreError::InvalidAmount(format!(
            "at most {} fraction digits allowed: {}",
            SCALE, trimmed
        )));
    }

    Ok(amount)
}

/// Canonical two-fraction-digit text, used both for display and for the
/// TEXT columns in SQLite ("150" becomes "150.00").
pub fn format_amount(amount: Decimal) -> String {
    let mut canonical = amount;
    canonical.rescale(SCALE);
    canonical.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(parse_amount("100").unwrap(), dec!(100));
    }

    #[test]
    fn test_parse_two_fraction_digits() {
        assert_eq!(parse_amount("42.50").unwrap(), dec!(42.50));
        assert_eq!(parse_amount("0.07").unwrap(), dec!(0.07));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_amount("  12.5 ").unwrap(), dec!(12.5));
    }

    #[test]
    fn test_parse_zero_is_allowed() {
        assert_eq!(parse_amount("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("12.3.4").is_err());
    }

    #[test]
    fn test_parse_rejects_negative() {
        let err = parse_amount("-5").unwrap_err();
        assert!(err.is_invalid_amount());
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        assert!(parse_amount("1.234").is_err());
    }

    #[test]
    fn test_format_pads_to_two_digits() {
        assert_eq!(format_amount(dec!(7)), "7.00");
        assert_eq!(format_amount(dec!(42.5)), "42.50");
        assert_eq!(format_amount(dec!(0)), "0.00");
    }
}
