//! FHIR `instant`: a full RFC 3339 timestamp.
//!
//! Unlike `dateTime`, truncated layouts are not allowed: an instant always
//! has a date, a time to at least the second, and an offset.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date::parse_full_date;
use crate::datetime::{format_hms, parse_hms, split_offset, Offset};
use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instant {
    date: NaiveDate,
    time: NaiveTime,
    offset: Offset,
    subsec_digits: u8,
}

impl Instant {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let s = input.trim();
        let err = || ParseError::Instant(s.to_string());

        let (date_part, rest) = s.split_once('T').ok_or_else(err)?;
        let date = parse_full_date(date_part).ok_or_else(err)?;
        let (time_part, offset) = split_offset(rest).ok_or_else(err)?;
        let (time, subsec_digits) = parse_hms(time_part).ok_or_else(err)?;
        Ok(Instant {
            date,
            time,
            offset,
            subsec_digits,
        })
    }

    /// Chrono view of the instant.
    pub fn to_fixed(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        let tz = chrono::FixedOffset::east_opt(self.offset.seconds())?;
        self.date.and_time(self.time).and_local_timezone(tz).single()
    }
}

impl FromStr for Instant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instant::parse(s)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T", self.date.format("%Y-%m-%d"))?;
        format_hms(f, &self.time, self.subsec_digits)?;
        write!(f, "{}", self.offset)
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Instant {
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
        for literal in [
            "2015-02-07T13:28:17Z",
            "2015-02-07T13:28:17.239+02:00",
        ] {
            assert_eq!(Instant::parse(literal).unwrap().to_string(), literal);
        }
    }

    #[test]
    fn rejects_truncated_layouts() {
        for bad in ["2015-02-07", "2015-02-07T13:28Z", "2015-02-07T13:28:17"] {
            assert!(Instant::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn chrono_view_matches() {
        let i = Instant::parse("2015-02-07T13:28:17+02:00").unwrap();
        let fixed = i.to_fixed().unwrap();
        assert_eq!(fixed.to_rfc3339(), "2015-02-07T13:28:17+02:00");
    }
}
