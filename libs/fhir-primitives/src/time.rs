//! FHIR `time`: a time of day without a date or zone.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::datetime::{format_hms, parse_hms};
use crate::error::ParseError;

/// `hh:mm:ss` with an optional fraction whose digit count is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    time: NaiveTime,
    subsec_digits: u8,
}

impl Time {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let s = input.trim();
        let (time, subsec_digits) =
            parse_hms(s).ok_or_else(|| ParseError::Time(s.to_string()))?;
        Ok(Time {
            time,
            subsec_digits,
        })
    }

    pub fn value(&self) -> NaiveTime {
        self.time
    }
}

impl From<NaiveTime> for Time {
    fn from(time: NaiveTime) -> Self {
        Time {
            time,
            subsec_digits: 0,
        }
    }
}

impl FromStr for Time {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Time::parse(s)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_hms(f, &self.time, self.subsec_digits)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        for literal in ["09:30:00", "23:59:59.999", "00:00:00.5"] {
            assert_eq!(Time::parse(literal).unwrap().to_string(), literal);
        }
    }

    #[test]
    fn rejects_truncated_times() {
        for bad in ["09", "09:30", "9:30:00", "09:30:00Z", ""] {
            assert!(Time::parse(bad).is_err(), "accepted {bad:?}");
        }
    }
}
