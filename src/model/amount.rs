//! Amount type for handling monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal`. Documents written by earlier
//! front ends hold amounts either as JSON numbers or as the raw text of a form field, so both are
//! accepted when deserializing. Amounts are always written back as a plain decimal string.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// Represents a sum of money in the event's currency.
///
/// Equality and ordering are numeric, so `5000` and `5000.00` are the same amount.
///
/// # Examples
///
/// ```
/// # use event_ledger::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("11,000").unwrap();
/// assert_eq!(amount.to_string(), "11,000.00");
/// assert_eq!(amount, Amount::from(11000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns true if the amount is below zero. Zero is not negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value.is_sign_negative()
    }

    /// Returns `None` if the sum does not fit.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.value.checked_add(rhs.value).map(Amount::new)
    }

    /// Returns `None` if the difference does not fit.
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.value.checked_sub(rhs.value).map(Amount::new)
    }

    /// Sums `amounts`, or returns `None` as soon as the running total no longer fits.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Amount>) -> Option<Amount> {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, |total, amount| total.checked_add(amount))
    }

    /// Clamps to the largest or smallest representable amount instead of overflowing.
    pub fn saturating_add(self, rhs: Amount) -> Amount {
        Amount::new(self.value.saturating_add(rhs.value))
    }

    pub fn saturating_sub(self, rhs: Amount) -> Amount {
        Amount::new(self.value.saturating_sub(rhs.value))
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(Option<rust_decimal::Error>);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(e) => Debug::fmt(e, f),
            None => f.write_str("Empty"),
        }
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(e) => Display::fmt(e, f),
            None => f.write_str("an amount is required"),
        }
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.as_ref().map(|e| e as &(dyn Error + 'static))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Blank input is an error. Stored documents that hold an empty string are read with
    /// `Amount::parse_stored` instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError(None));
        }

        // Remove commas (thousand separators)
        let without_commas = trimmed.replace(',', "");
        let value = match Decimal::from_str(&without_commas) {
            Ok(value) => value,
            Err(e) => {
                Decimal::from_scientific(&without_commas).map_err(|_| AmountError(Some(e)))?
            }
        };
        Ok(Amount { value })
    }
}

impl Amount {
    /// Like `from_str`, but an empty field, as older front ends saved it, reads as zero.
    fn parse_stored(s: &str) -> Result<Self, AmountError> {
        if s.trim().is_empty() {
            return Ok(Amount::ZERO);
        }
        Amount::from_str(s)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (sign, num) = if self.is_negative() {
            ("-", self.value.abs())
        } else {
            ("", self.value)
        };
        write!(
            f,
            "{sign}{}",
            format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.value.normalize().to_string())
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string holding a decimal number")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::new(Decimal::from(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount::new(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Decimal::from_f64(v)
            .map(Amount::new)
            .ok_or_else(|| E::custom(format!("{v} cannot be represented as an amount")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::parse_stored(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

// The operators panic on overflow, like `Decimal`'s. Totals over stored records use the checked or
// saturating methods instead.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount::new(self.value + rhs.value)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.value += rhs.value;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount::new(self.value - rhs.value)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("5001").unwrap();
        assert_eq!(amount.value(), Decimal::from(5001));
    }

    #[test]
    fn test_parse_with_commas() {
        let amount = Amount::from_str("1,234,567.89").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1234567.89").unwrap());
    }

    #[test]
    fn test_parse_empty_string_is_error() {
        let err = Amount::from_str("   ").unwrap_err();
        assert_eq!(err.to_string(), "an amount is required");
        assert!(Amount::from_str("").is_err());
    }

    #[test]
    fn test_deserialize_empty_string_is_zero() {
        let amount: Amount = serde_json::from_str("\"\"").unwrap();
        assert!(amount.is_zero());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Amount::from_str("lots").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from(5000).to_string(), "5,000.00");
        assert_eq!(Amount::from(-1500).to_string(), "-1,500.00");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_numeric_equality() {
        let a = Amount::from_str("5000.00").unwrap();
        let b = Amount::from_str("5,000").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialize_plain_string() {
        let json = serde_json::to_string(&Amount::from_str("12.50").unwrap()).unwrap();
        assert_eq!(json, "\"12.5\"");
        let json = serde_json::to_string(&Amount::from(5001)).unwrap();
        assert_eq!(json, "\"5001\"");
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_int: Amount = serde_json::from_str("2100").unwrap();
        let from_float: Amount = serde_json::from_str("2100.0").unwrap();
        let from_str: Amount = serde_json::from_str("\"2100\"").unwrap();
        assert_eq!(from_int, Amount::from(2100));
        assert_eq!(from_float, Amount::from(2100));
        assert_eq!(from_str, Amount::from(2100));
    }

    #[test]
    fn test_deserialize_rejects_bool() {
        assert!(serde_json::from_str::<Amount>("true").is_err());
    }

    #[test]
    fn test_sign() {
        assert!(Amount::from(-1).is_negative());
        assert!(!Amount::ZERO.is_negative());
        assert!(!Amount::from_str("-0").unwrap().is_negative());
    }

    #[test]
    fn test_checked_sum() {
        let total = Amount::checked_sum([Amount::from(5000), Amount::from(2100)]).unwrap();
        assert_eq!(total, Amount::from(7100));
        assert_eq!(total - Amount::from(1500), Amount::from(5600));
    }

    #[test]
    fn test_overflow_is_detected_not_panicking() {
        let max = Amount::new(Decimal::MAX);
        assert_eq!(max.checked_add(Amount::from(1)), None);
        assert_eq!(Amount::checked_sum([max, max]), None);
        assert_eq!(max.saturating_add(max), max);
        assert_eq!(
            Amount::new(Decimal::MIN).saturating_sub(max),
            Amount::new(Decimal::MIN)
        );
        assert_eq!(Amount::ZERO.checked_sub(max), Some(Amount::new(Decimal::MIN)));
    }
}
