//! Token amounts with 18-decimal fixed-point precision
//!
//! Rates and invoice amounts arrive as decimal strings ("0.0005"). Parsing
//! them into an `i128` of smallest units keeps sums exact, so two rates of
//! 0.0005 and 0.0006 add up to exactly 0.0011 instead of whatever a binary
//! float would produce.

use crate::{HireWireError, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Standard precision for token amounts (18 decimals, like wei for ETH)
pub const TOKEN_DECIMALS: u32 = 18;

/// The multiplier for 18 decimals
pub const TOKEN_MULTIPLIER: i128 = 1_000_000_000_000_000_000;

/// Maximum decimals shown on an aggregated invoice
pub const INVOICE_DISPLAY_DECIMALS: u32 = 6;

/// Fixed-point token amount
///
/// The raw value is stored in smallest units (10^-18). Negative values parse
/// so that callers can reject them explicitly instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenAmount(i128);

impl TokenAmount {
    /// Create an amount from raw smallest units
    pub const fn from_units(units: i128) -> Self {
        Self(units)
    }

    /// Zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Raw value in smallest units
    pub fn units(&self) -> i128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add with overflow checking
    pub fn checked_add(&self, other: TokenAmount) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(HireWireError::AmountOverflow)
    }

    /// Round half away from zero to `decimals` fractional digits
    pub fn round_dp(&self, decimals: u32) -> Self {
        if decimals >= TOKEN_DECIMALS {
            return *self;
        }

        let unit = 10i128.pow(TOKEN_DECIMALS - decimals);
        let remainder = self.0 % unit;
        let truncated = self.0 - remainder;

        if remainder.abs() * 2 >= unit {
            let step = if self.0 < 0 { -unit } else { unit };
            Self(truncated.saturating_add(step))
        } else {
            Self(truncated)
        }
    }

    /// Render with at most `decimals` fractional digits, trailing zeros and a
    /// dangling decimal point trimmed ("0.001100" -> "0.0011", "2.000" -> "2")
    pub fn to_display_string(&self, decimals: u32) -> String {
        self.round_dp(decimals).to_string()
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = TOKEN_MULTIPLIER as u128;
        let whole = abs / scale;
        let frac = abs % scale;

        if frac == 0 {
            return write!(f, "{}{}", sign, whole);
        }

        let frac = format!("{:0width$}", frac, width = TOKEN_DECIMALS as usize);
        write!(f, "{}{}.{}", sign, whole, frac.trim_end_matches('0'))
    }
}

impl FromStr for TokenAmount {
    type Err = HireWireError;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let invalid = || HireWireError::InvalidAmount {
            input: s.to_string(),
        };

        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input.strip_prefix('+').unwrap_or(input)),
        };

        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > TOKEN_DECIMALS as usize {
            return Err(HireWireError::TooManyDecimals {
                input: s.to_string(),
                max: TOKEN_DECIMALS,
            });
        }

        let whole_units: i128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| HireWireError::AmountOverflow)?
        };

        let frac_units: i128 = if frac.is_empty() {
            0
        } else {
            let raw: i128 = frac.parse().map_err(|_| invalid())?;
            raw * 10i128.pow(TOKEN_DECIMALS - frac.len() as u32)
        };

        let value = whole_units
            .checked_mul(TOKEN_MULTIPLIER)
            .and_then(|v| v.checked_add(frac_units))
            .ok_or(HireWireError::AmountOverflow)?;

        Ok(Self(if negative { -value } else { value }))
    }
}

impl PartialOrd for TokenAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TokenAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(TokenAmountVisitor)
    }
}

struct TokenAmountVisitor;

impl<'de> Visitor<'de> for TokenAmountVisitor {
    type Value = TokenAmount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<TokenAmount, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<TokenAmount, E> {
        v.to_string().parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<TokenAmount, E> {
        v.to_string().parse().map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<TokenAmount, E> {
        v.to_string().parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(s: &str) -> TokenAmount {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_decimal_strings() {
        assert_eq!(amt("1").units(), TOKEN_MULTIPLIER);
        assert_eq!(amt("0.0005").units(), 500_000_000_000_000);
        assert_eq!(amt(".5"), amt("0.5"));
        assert_eq!(amt("2."), amt("2"));
        assert_eq!(amt(" 0.01 "), amt("0.01"));
        assert!(amt("-0.1").is_negative());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<TokenAmount>().is_err());
        assert!(".".parse::<TokenAmount>().is_err());
        assert!("abc".parse::<TokenAmount>().is_err());
        assert!("1.2.3".parse::<TokenAmount>().is_err());
        assert!("1e-4".parse::<TokenAmount>().is_err());
        assert!(matches!(
            "0.0000000000000000001".parse::<TokenAmount>(),
            Err(HireWireError::TooManyDecimals { .. })
        ));
    }

    #[test]
    fn test_exact_sum_formats_without_trailing_zeros() {
        let total = amt("0.0005").checked_add(amt("0.0006")).unwrap();
        assert_eq!(total.to_display_string(INVOICE_DISPLAY_DECIMALS), "0.0011");
    }

    #[test]
    fn test_display_caps_at_six_decimals() {
        assert_eq!(amt("0.1234564").to_display_string(6), "0.123456");
        assert_eq!(amt("0.1234565").to_display_string(6), "0.123457");
        assert_eq!(amt("2.0000001").to_display_string(6), "2");
        assert_eq!(amt("1.5").to_display_string(6), "1.5");
    }

    #[test]
    fn test_ordering() {
        let mut rates = vec![amt("0.0007"), amt("0.0005"), amt("0.0006")];
        rates.sort();
        assert_eq!(rates[0], amt("0.0005"));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&amt("0.0005")).unwrap();
        assert_eq!(json, "\"0.0005\"");

        let from_number: TokenAmount = serde_json::from_str("0.25").unwrap();
        assert_eq!(from_number, amt("0.25"));
    }
}
