//! Partial-precision FHIR `date`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// Granularity of a [`Date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

/// A FHIR `date`: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
///
/// The variant is the precision, so a value can never be serialized with
/// more detail than it was parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Date {
    Year(i32),
    Month { year: i32, month: u32 },
    Day(NaiveDate),
}

impl Date {
    /// Parse a date literal, trying layouts in decreasing precision.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let s = input.trim();
        match s.len() {
            10 => parse_full_date(s)
                .map(Date::Day)
                .ok_or_else(|| ParseError::Date(s.to_string())),
            7 => parse_year_month(s)
                .map(|(year, month)| Date::Month { year, month })
                .ok_or_else(|| ParseError::Date(s.to_string())),
            4 => parse_year(s)
                .map(Date::Year)
                .ok_or_else(|| ParseError::Date(s.to_string())),
            _ => Err(ParseError::Date(s.to_string())),
        }
    }

    pub fn precision(&self) -> DatePrecision {
        match self {
            Date::Year(_) => DatePrecision::Year,
            Date::Month { .. } => DatePrecision::Month,
            Date::Day(_) => DatePrecision::Day,
        }
    }

    pub fn year(&self) -> i32 {
        match self {
            Date::Year(year) => *year,
            Date::Month { year, .. } => *year,
            Date::Day(date) => date.year(),
        }
    }

    /// The month, when the precision reaches it.
    pub fn month(&self) -> Option<u32> {
        match self {
            Date::Year(_) => None,
            Date::Month { month, .. } => Some(*month),
            Date::Day(date) => Some(date.month()),
        }
    }

    /// The day of month, when the precision reaches it.
    pub fn day(&self) -> Option<u32> {
        match self {
            Date::Day(date) => Some(date.day()),
            _ => None,
        }
    }
}

/// `YYYY-MM-DD`, digits and hyphens checked positionally.
pub(crate) fn parse_full_date(s: &str) -> Option<NaiveDate> {
    if !well_formed(s, &[4, 2, 2]) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub(crate) fn parse_year_month(s: &str) -> Option<(i32, u32)> {
    if !well_formed(s, &[4, 2]) {
        return None;
    }
    let (y, m) = s.split_once('-')?;
    let year = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

pub(crate) fn parse_year(s: &str) -> Option<i32> {
    if !well_formed(s, &[4]) {
        return None;
    }
    s.parse().ok()
}

/// Checks a hyphen-separated layout of fixed-width digit groups.
fn well_formed(s: &str, widths: &[usize]) -> bool {
    let mut groups = s.split('-');
    for width in widths {
        match groups.next() {
            Some(g) if g.len() == *width && g.bytes().all(|b| b.is_ascii_digit()) => {}
            _ => return false,
        }
    }
    groups.next().is_none()
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Date::Year(year) => write!(f, "{year:04}"),
            Date::Month { year, month } => write!(f, "{year:04}-{month:02}"),
            Date::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_precision() {
        assert_eq!(Date::parse("1985").unwrap().precision(), DatePrecision::Year);
        assert_eq!(
            Date::parse("1985-03").unwrap().precision(),
            DatePrecision::Month
        );
        assert_eq!(
            Date::parse("1985-03-15").unwrap().precision(),
            DatePrecision::Day
        );
    }

    #[test]
    fn serializes_at_parsed_precision() {
        for literal in ["1985", "1985-03", "1985-03-15"] {
            assert_eq!(Date::parse(literal).unwrap().to_string(), literal);
        }
    }

    #[test]
    fn rejects_malformed_literals() {
        for bad in ["85", "1985-3", "1985-13", "1985-02-30", "19850315", ""] {
            assert!(Date::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(Date::parse(" 1985-03 ").unwrap().to_string(), "1985-03");
    }
}
