//! Partial-precision FHIR `dateTime`.
//!
//! Layouts are tried in decreasing precision: full RFC 3339 with offset,
//! `YYYY-MM-DD`, `YYYY-MM`, `YYYY`. A `T` with a truncated time or a missing
//! offset is an error; FHIR does not allow a timed value without a zone.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date::{parse_full_date, parse_year, parse_year_month};
use crate::error::ParseError;

/// Granularity of a [`DateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    Year,
    Month,
    Day,
    Second,
}

/// A timezone offset, keeping the `Z` spelling distinct from `+00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    /// The literal `Z`.
    Utc,
    /// Signed minutes east of UTC, spelled `+hh:mm` / `-hh:mm`.
    Minutes(i32),
}

impl Offset {
    /// Offset from UTC in seconds.
    pub fn seconds(&self) -> i32 {
        match self {
            Offset::Utc => 0,
            Offset::Minutes(m) => m * 60,
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Utc => f.write_str("Z"),
            Offset::Minutes(m) => {
                let sign = if *m < 0 { '-' } else { '+' };
                write!(f, "{sign}{:02}:{:02}", m.abs() / 60, m.abs() % 60)
            }
        }
    }
}

/// A FHIR `dateTime`.
///
/// The variant is the precision tag; components below the tag do not exist,
/// so encode can never synthesize detail the wire never carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTime {
    Year(i32),
    Month {
        year: i32,
        month: u32,
    },
    Day(NaiveDate),
    Second {
        date: NaiveDate,
        time: NaiveTime,
        offset: Offset,
        /// Fractional-second digits carried by the literal (0 = none).
        subsec_digits: u8,
    },
}

impl DateTime {
    /// Parse a dateTime literal, trying layouts in decreasing precision.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let s = input.trim();
        let err = || ParseError::DateTime(s.to_string());

        let Some((date_part, rest)) = s.split_once('T') else {
            // No time component: the date layouts apply.
            return match s.len() {
                10 => parse_full_date(s).map(DateTime::Day).ok_or_else(err),
                7 => parse_year_month(s)
                    .map(|(year, month)| DateTime::Month { year, month })
                    .ok_or_else(err),
                4 => parse_year(s).map(DateTime::Year).ok_or_else(err),
                _ => Err(err()),
            };
        };

        // A timed value needs a full date, a full hh:mm:ss time and an offset.
        let date = parse_full_date(date_part).ok_or_else(err)?;
        let (time_part, offset) = split_offset(rest).ok_or_else(err)?;
        let (time, subsec_digits) = parse_hms(time_part).ok_or_else(err)?;
        Ok(DateTime::Second {
            date,
            time,
            offset,
            subsec_digits,
        })
    }

    pub fn precision(&self) -> Precision {
        match self {
            DateTime::Year(_) => Precision::Year,
            DateTime::Month { .. } => Precision::Month,
            DateTime::Day(_) => Precision::Day,
            DateTime::Second { .. } => Precision::Second,
        }
    }

    /// The date component, when the precision reaches the day.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DateTime::Day(date) => Some(*date),
            DateTime::Second { date, .. } => Some(*date),
            _ => None,
        }
    }

    /// Chrono view of a second-precision value.
    pub fn to_fixed(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        match self {
            DateTime::Second {
                date, time, offset, ..
            } => {
                let tz = chrono::FixedOffset::east_opt(offset.seconds())?;
                date.and_time(*time).and_local_timezone(tz).single()
            }
            _ => None,
        }
    }
}

/// Splits the trailing timezone off `hh:mm:ss[.fff]±zz:zz`.
///
/// Returns `None` when no offset is present; FHIR requires one.
pub(crate) fn split_offset(rest: &str) -> Option<(&str, Offset)> {
    if let Some(stripped) = rest.strip_suffix('Z') {
        return Some((stripped, Offset::Utc));
    }
    let pos = rest.rfind(['+', '-'])?;
    let (time, tz) = rest.split_at(pos);
    let bytes = tz.as_bytes();
    if bytes.len() != 6 || bytes[3] != b':' {
        return None;
    }
    let hours: i32 = tz[1..3].parse().ok()?;
    let minutes: i32 = tz[4..6].parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    let sign = if tz.starts_with('-') { -1 } else { 1 };
    Some((time, Offset::Minutes(sign * (hours * 60 + minutes))))
}

/// Parses `hh:mm:ss` with an optional fraction, reporting the digit count.
pub(crate) fn parse_hms(time_part: &str) -> Option<(NaiveTime, u8)> {
    let (main, frac) = match time_part.split_once('.') {
        Some((main, frac)) => (main, Some(frac)),
        None => (time_part, None),
    };

    let mut parts = main.split(':');
    let hour: u32 = fixed_width(parts.next()?, 2)?;
    let minute: u32 = fixed_width(parts.next()?, 2)?;
    let second: u32 = fixed_width(parts.next()?, 2)?;
    if parts.next().is_some() {
        return None;
    }

    let (nanos, digits) = match frac {
        None => (0, 0),
        Some(frac) => {
            if frac.is_empty() || frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let value: u32 = frac.parse().ok()?;
            (value * 10u32.pow(9 - frac.len() as u32), frac.len() as u8)
        }
    };

    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?;
    Some((time, digits))
}

fn fixed_width(s: &str, width: usize) -> Option<u32> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Writes `hh:mm:ss` plus the carried fraction digits.
pub(crate) fn format_hms(
    f: &mut fmt::Formatter<'_>,
    time: &NaiveTime,
    subsec_digits: u8,
) -> fmt::Result {
    write!(
        f,
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )?;
    if subsec_digits > 0 {
        let frac = time.nanosecond() / 10u32.pow(9 - u32::from(subsec_digits));
        write!(f, ".{frac:0width$}", width = subsec_digits as usize)?;
    }
    Ok(())
}

impl FromStr for DateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse(s)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTime::Year(year) => write!(f, "{year:04}"),
            DateTime::Month { year, month } => write!(f, "{year:04}-{month:02}"),
            DateTime::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DateTime::Second {
                date,
                time,
                offset,
                subsec_digits,
            } => {
                write!(f, "{}T", date.format("%Y-%m-%d"))?;
                format_hms(f, time, *subsec_digits)?;
                write!(f, "{offset}")
            }
        }
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layered_precision() {
        assert_eq!(DateTime::parse("2016").unwrap().precision(), Precision::Year);
        assert_eq!(
            DateTime::parse("2016-07").unwrap().precision(),
            Precision::Month
        );
        assert_eq!(
            DateTime::parse("2016-07-15").unwrap().precision(),
            Precision::Day
        );
        assert_eq!(
            DateTime::parse("2016-07-15T10:20:30Z").unwrap().precision(),
            Precision::Second
        );
    }

    #[test]
    fn round_trips_each_layout() {
        for literal in [
            "2016",
            "2016-07",
            "2016-07-15",
            "2016-07-15T10:20:30Z",
            "2016-07-15T10:20:30+02:00",
            "2016-07-15T10:20:30.123-05:30",
            "2013-06-08T09:57:34.2112Z",
        ] {
            assert_eq!(DateTime::parse(literal).unwrap().to_string(), literal);
        }
    }

    #[test]
    fn zulu_and_numeric_offsets_stay_distinct() {
        let z = DateTime::parse("2016-07-15T10:20:30Z").unwrap();
        let plus = DateTime::parse("2016-07-15T10:20:30+00:00").unwrap();
        assert_ne!(z, plus);
        assert_eq!(plus.to_string(), "2016-07-15T10:20:30+00:00");
    }

    #[test]
    fn rejects_partial_times_and_missing_offsets() {
        for bad in [
            "2016-07-15T10",
            "2016-07-15T10:20",
            "2016-07-15T10:20:30",
            "2016-07T10:20:30Z",
            "2016-07-15T10:20:30+0200",
            "T10:20:30Z",
            "",
        ] {
            assert!(DateTime::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn parse_then_serialize_preserves_precision() {
        let v = DateTime::parse("2016-07").unwrap();
        let back = DateTime::parse(&v.to_string()).unwrap();
        assert_eq!(back.precision(), v.precision());
        assert_eq!(back, v);
    }
}
