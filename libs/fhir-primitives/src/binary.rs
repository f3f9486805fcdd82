//! FHIR `base64Binary`.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// Base64-encoded content, kept in its encoded form.
///
/// The literal is validated when parsed; [`Base64Binary::decode`] yields the
/// raw bytes on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Binary(String);

impl Base64Binary {
    /// Encode raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Base64Binary(STANDARD.encode(bytes))
    }

    /// The base64 literal.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, ParseError> {
        STANDARD
            .decode(&self.0)
            .map_err(|_| ParseError::Base64(self.0.clone()))
    }
}

impl FromStr for Base64Binary {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STANDARD
            .decode(s)
            .map_err(|_| ParseError::Base64(s.to_string()))?;
        Ok(Base64Binary(s.to_string()))
    }
}

impl fmt::Display for Base64Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Base64Binary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Base64Binary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bytes() {
        let b = Base64Binary::from_bytes(b"hello");
        assert_eq!(b.as_str(), "aGVsbG8=");
        assert_eq!(b.decode().unwrap(), b"hello");
    }

    #[test]
    fn rejects_bad_literals() {
        assert!("not base64!".parse::<Base64Binary>().is_err());
    }
}
