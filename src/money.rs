// 💵 Money - Exact two-decimal amounts as integer cents
// Receipts carry prices as strings like "10.00"; nothing here touches floats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A non-negative amount of money, stored as whole cents.
///
/// Only the strict `\d+\.\d{2}` form is accepted: at least one digit, a dot,
/// exactly two digits. No sign, no thousands separators, no whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cents(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCentsError {
    pub input: String,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected an amount like 0.00, got {:?}", self.input)
    }
}

impl std::error::Error for ParseCentsError {}

impl Cents {
    pub fn from_cents(cents: u64) -> Self {
        Cents(cents)
    }

    /// Parse a `\d+\.\d{2}` amount
    pub fn parse(input: &str) -> Result<Self, ParseCentsError> {
        let err = || ParseCentsError {
            input: input.to_string(),
        };

        let (dollars, cents) = input.split_once('.').ok_or_else(err)?;

        if dollars.is_empty() || !dollars.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        if cents.len() != 2 || !cents.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let dollars: u64 = dollars.parse().map_err(|_| err())?;
        let cents: u64 = cents.parse().map_err(|_| err())?;

        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Cents)
            .ok_or_else(err)
    }

    /// True when `input` is in the strict `\d+\.\d{2}` form
    pub fn is_well_formed(input: &str) -> bool {
        Cents::parse(input).is_ok()
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// No cents part ("12.00")
    pub fn is_round_dollar(&self) -> bool {
        self.0 % 100 == 0
    }

    /// Exact multiple of `step` cents (25 for a quarter)
    pub fn is_multiple_of(&self, step: u64) -> bool {
        step != 0 && self.0 % step == 0
    }

    /// Ceiling of `amount * numerator / denominator`, in whole dollars.
    ///
    /// `ceil_dollars_of_fraction(1, 5)` is `ceil(amount * 0.2)`.
    pub fn ceil_dollars_of_fraction(&self, numerator: u64, denominator: u64) -> u64 {
        let scaled = self.0 as u128 * numerator as u128;
        let divisor = 100u128 * denominator as u128;
        scaled.div_ceil(divisor) as u64
    }
}

impl FromStr for Cents {
    type Err = ParseCentsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cents::parse(s)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_amounts() {
        assert_eq!(Cents::parse("0.00").unwrap().cents(), 0);
        assert_eq!(Cents::parse("1.25").unwrap().cents(), 125);
        assert_eq!(Cents::parse("558.10").unwrap().cents(), 55810);
        assert_eq!(Cents::parse("007.05").unwrap().cents(), 705);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "1", "1.", ".50", "1.5", "1.500", "-1.00", "+1.00", "1,00", " 1.00", "1.00 ", "a.bc", "1.0a"] {
            assert!(Cents::parse(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(Cents::parse("99999999999999999999.00").is_err());
    }

    #[test]
    fn test_round_dollar() {
        assert!(Cents::parse("60.00").unwrap().is_round_dollar());
        assert!(Cents::parse("0.00").unwrap().is_round_dollar());
        assert!(!Cents::parse("60.01").unwrap().is_round_dollar());
    }

    #[test]
    fn test_quarter_multiple() {
        assert!(Cents::parse("1.25").unwrap().is_multiple_of(25));
        assert!(Cents::parse("1.75").unwrap().is_multiple_of(25));
        assert!(Cents::parse("60.00").unwrap().is_multiple_of(25));
        assert!(!Cents::parse("1.10").unwrap().is_multiple_of(25));
        assert!(!Cents::parse("49.99").unwrap().is_multiple_of(25));
        assert!(!Cents::parse("1.00").unwrap().is_multiple_of(0));
    }

    #[test]
    fn test_ceil_fifth() {
        // 10.00 * 0.2 = 2 exactly
        assert_eq!(Cents::parse("10.00").unwrap().ceil_dollars_of_fraction(1, 5), 2);
        // 12.25 * 0.2 = 2.45 -> 3
        assert_eq!(Cents::parse("12.25").unwrap().ceil_dollars_of_fraction(1, 5), 3);
        // 5.01 * 0.2 = 1.002 -> 2
        assert_eq!(Cents::parse("5.01").unwrap().ceil_dollars_of_fraction(1, 5), 2);
        assert_eq!(Cents::parse("0.01").unwrap().ceil_dollars_of_fraction(1, 5), 1);
        assert_eq!(Cents::parse("0.00").unwrap().ceil_dollars_of_fraction(1, 5), 0);
        assert_eq!(Cents::parse("350.00").unwrap().ceil_dollars_of_fraction(1, 5), 70);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cents::from_cents(705).to_string(), "7.05");
        assert_eq!(Cents::from_cents(0).to_string(), "0.00");
        assert_eq!("12.34".parse::<Cents>().unwrap().to_string(), "12.34");
    }
}
