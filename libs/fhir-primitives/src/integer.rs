//! Bounded FHIR integer kinds.
//!
//! `integer` is a signed 32-bit value; `unsignedInt` excludes negatives;
//! `positiveInt` additionally excludes zero. Deserialization goes through
//! [`serde_json::Number`] rather than a bare machine integer so the values
//! survive serde's internal buffering (flattened fields, internally tagged
//! enums) with the `arbitrary_precision` feature enabled.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

use crate::error::ParseError;

macro_rules! integer_kind {
    (
        $(#[$attr:meta])*
        $name:ident($repr:ty), min $min:expr
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($repr);

        impl $name {
            /// Build from a raw value, checking the kind's lower bound.
            pub fn new(value: $repr) -> Result<Self, ParseError> {
                if value >= $min {
                    Ok(Self(value))
                } else {
                    Err(ParseError::Integer(value.to_string()))
                }
            }

            /// The contained value.
            pub fn get(self) -> $repr {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                Number::from(self.0).serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let number = Number::deserialize(deserializer)?;
                let value = number
                    .as_i64()
                    .and_then(|v| <$repr>::try_from(v).ok())
                    .ok_or_else(|| {
                        D::Error::custom(ParseError::Integer(number.to_string()))
                    })?;
                Self::new(value).map_err(D::Error::custom)
            }
        }
    };
}

integer_kind! {
    /// A FHIR `integer`: signed 32-bit.
    Integer(i32), min i32::MIN
}

integer_kind! {
    /// A FHIR `unsignedInt`: 0 or greater.
    UnsignedInt(u32), min 0
}

integer_kind! {
    /// A FHIR `positiveInt`: 1 or greater.
    PositiveInt(u32), min 1
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Integer(value)
    }
}

impl From<u32> for UnsignedInt {
    fn from(value: u32) -> Self {
        UnsignedInt(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_accepts_negatives() {
        let i: Integer = serde_json::from_str("-40").unwrap();
        assert_eq!(i.get(), -40);
    }

    #[test]
    fn unsigned_int_rejects_negatives() {
        assert!(serde_json::from_str::<UnsignedInt>("-1").is_err());
        let u: UnsignedInt = serde_json::from_str("0").unwrap();
        assert_eq!(u.get(), 0);
    }

    #[test]
    fn positive_int_rejects_zero() {
        assert!(serde_json::from_str::<PositiveInt>("0").is_err());
        let p: PositiveInt = serde_json::from_str("1").unwrap();
        assert_eq!(p.get(), 1);
    }

    #[test]
    fn fractions_are_not_integers() {
        assert!(serde_json::from_str::<Integer>("1.5").is_err());
    }

    #[test]
    fn serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&Integer::from(7)).unwrap(), "7");
    }
}
