//! Wire-faithful FHIR decimals.
//!
//! FHIR decimal precision is semantic: `1.50` and `1.5` are different values
//! on the wire and must be reproduced exactly on encode. The type therefore
//! wraps [`serde_json::Number`] (with the `arbitrary_precision` feature
//! enabled workspace-wide), which keeps the source literal verbatim, and
//! offers a [`rust_decimal`] view for arithmetic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::ParseError;

/// A FHIR `decimal`.
///
/// Equality is textual: `Decimal` compares the wire literal, so `1.50` and
/// `1.5` are distinct. Use [`Decimal::value`] for numeric comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decimal(Number);

impl Decimal {
    /// The literal as it appeared on the wire (or was constructed).
    pub fn literal(&self) -> &str {
        self.0.as_str()
    }

    /// Numeric view of the literal.
    ///
    /// Exponent forms (`1e2`) are handled via scientific-notation parsing.
    pub fn value(&self) -> Result<rust_decimal::Decimal, ParseError> {
        let s = self.literal();
        rust_decimal::Decimal::from_str(s)
            .or_else(|_| rust_decimal::Decimal::from_scientific(s))
            .map_err(|_| ParseError::Decimal(s.to_string()))
    }

    /// Build from a [`rust_decimal::Decimal`], keeping its scale.
    pub fn from_decimal(value: rust_decimal::Decimal) -> Self {
        // rust_decimal's Display form is always a valid JSON number.
        Decimal(Number::from_string_unchecked(value.to_string()))
    }

    /// Access the underlying JSON number.
    pub fn as_number(&self) -> &Number {
        &self.0
    }
}

impl FromStr for Decimal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        serde_json::from_str::<Number>(s)
            .map(Decimal)
            .map_err(|_| ParseError::Decimal(s.to_string()))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Decimal(Number::from(value))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(Number::from(value))
    }
}

impl From<Number> for Decimal {
    fn from(value: Number) -> Self {
        Decimal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_is_preserved() {
        let d: Decimal = "1.500".parse().unwrap();
        assert_eq!(d.literal(), "1.500");
        assert_eq!(d.to_string(), "1.500");
    }

    #[test]
    fn exponent_form_is_preserved() {
        let d: Decimal = "1e2".parse().unwrap();
        assert_eq!(d.literal(), "1e2");
        assert_eq!(d.value().unwrap(), rust_decimal::Decimal::from(100));
    }

    #[test]
    fn textual_equality_distinguishes_trailing_zeros() {
        let a: Decimal = "1.5".parse().unwrap();
        let b: Decimal = "1.50".parse().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.value().unwrap(), b.value().unwrap());
    }

    #[test]
    fn rejects_non_numbers() {
        assert!(Decimal::from_str("abc").is_err());
        assert!(Decimal::from_str("1.2.3").is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let d: Decimal = serde_json::from_str("185.70").unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "185.70");
    }
}
