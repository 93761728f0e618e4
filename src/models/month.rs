//! Month keys
//!
//! A `MonthKey` is the zero-padded `YYYY-MM` key every monthly report is
//! computed for. Membership is a textual prefix test against the ISO date of
//! a transaction, so a key only ever matches dates written as `YYYY-MM-DD`.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month identified by its `YYYY-MM` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, returning `None` for an out-of-range month or a
    /// year that does not render as four digits
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current local month
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// Parse a `YYYY-MM` key
    ///
    /// Only the exact zero-padded form is accepted: "2024-03" parses,
    /// "2024-3" and "2024-03-01" do not.
    pub fn parse(s: &str) -> Result<Self, MonthKeyParseError> {
        let s = s.trim();
        let invalid = || MonthKeyParseError::InvalidFormat(s.to_string());

        let (year_part, month_part) = s.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4
            || month_part.len() != 2
            || !year_part.chars().all(|c| c.is_ascii_digit())
            || !month_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;

        Self::new(year, month).ok_or(MonthKeyParseError::InvalidMonth(month))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The textual key, e.g. "2024-03"
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Check whether an ISO date string belongs to this month (prefix match)
    pub fn matches(&self, iso_date: &str) -> bool {
        iso_date.starts_with(&self.key())
    }

    /// Check whether a date belongs to this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.matches(&date.format("%Y-%m-%d").to_string())
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Number of days in the month
    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first_day();
        let last = next - Duration::days(1);
        last.day()
    }

    /// The following month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Human-friendly name, e.g. "March 2024"
    pub fn friendly_name(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for MonthKey {
    type Err = MonthKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.key()
    }
}

/// Error type for month key parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthKeyParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthKeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => {
                write!(f, "Invalid month '{}': use the zero-padded form YYYY-MM", s)
            }
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthKeyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let key = MonthKey::parse("2024-03").unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 3);
        assert_eq!(key.to_string(), "2024-03");
    }

    #[test]
    fn test_parse_requires_zero_padding() {
        assert!(matches!(
            MonthKey::parse("2024-3"),
            Err(MonthKeyParseError::InvalidFormat(_))
        ));
        assert!(MonthKey::parse("2024-03-01").is_err());
        assert!(MonthKey::parse("24-03").is_err());
        assert_eq!(
            MonthKey::parse("2024-13"),
            Err(MonthKeyParseError::InvalidMonth(13))
        );
    }

    #[test]
    fn test_prefix_matching() {
        let key = MonthKey::parse("2024-03").unwrap();
        assert!(key.matches("2024-03-31"));
        assert!(!key.matches("2024-04-01"));
        assert!(!key.matches("2023-03-15"));
        assert!(key.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_navigation() {
        let jan = MonthKey::parse("2025-01").unwrap();
        assert_eq!(jan.prev().to_string(), "2024-12");
        assert_eq!(jan.next().to_string(), "2025-02");
        assert_eq!(MonthKey::parse("2024-12").unwrap().next(), jan);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(MonthKey::parse("2024-02").unwrap().days_in_month(), 29);
        assert_eq!(MonthKey::parse("2023-02").unwrap().days_in_month(), 28);
        assert_eq!(MonthKey::parse("2024-12").unwrap().days_in_month(), 31);
        assert_eq!(MonthKey::parse("2024-04").unwrap().days_in_month(), 30);
    }

    #[test]
    fn test_friendly_name() {
        assert_eq!(MonthKey::parse("2024-03").unwrap().friendly_name(), "March 2024");
    }

    #[test]
    fn test_serialization() {
        let key = MonthKey::parse("2024-03").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
