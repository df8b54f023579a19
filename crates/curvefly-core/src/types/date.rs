//! Date type for yield observations.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A calendar date keying one row of a yield table.
///
/// Newtype wrapper around `chrono::NaiveDate`.
///
/// # Example
///
/// ```rust
/// use curvefly_core::types::Date;
///
/// let date = Date::parse("2024-03-01").unwrap();
/// assert_eq!(date.add_business_days(-1), Date::from_ymd(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds (or with a negative argument, subtracts) whole years.
    ///
    /// Feb 29 rolls back to Feb 28 in non-leap target years.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        let months = Months::new(years.unsigned_abs() * 12);
        let shifted = if years >= 0 {
            self.0.checked_add_months(months)
        } else {
            self.0.checked_sub_months(months)
        };
        shifted
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{self} shifted by {years} years")))
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Adds business days (weekdays only) to the date.
    ///
    /// Positive values move forward, negative values move backward.
    #[must_use]
    pub fn add_business_days(&self, days: i32) -> Self {
        let direction = if days >= 0 { 1i64 } else { -1i64 };
        let mut remaining = days.unsigned_abs();
        let mut current = *self;

        while remaining > 0 {
            current = current.add_days(direction);
            if !current.is_weekend() {
                remaining -= 1;
            }
        }

        current
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::parse("2025-13-01").is_err());
        assert!("not-a-date".parse::<Date>().is_err());
    }

    #[test]
    fn test_add_years_clamps_leap_day() {
        let leap = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(leap.add_years(-20).unwrap(), Date::from_ymd(2004, 2, 29).unwrap());
        assert_eq!(leap.add_years(1).unwrap(), Date::from_ymd(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_business_days_skip_weekend() {
        // Friday
        let friday = Date::from_ymd(2024, 1, 5).unwrap();
        assert_eq!(friday.add_business_days(1), Date::from_ymd(2024, 1, 8).unwrap());
        assert_eq!(
            Date::from_ymd(2024, 1, 8).unwrap().add_business_days(-1),
            friday
        );
        assert_eq!(friday.add_business_days(0), friday);
    }

    #[test]
    fn test_display_round_trip() {
        let date = Date::from_ymd(2024, 7, 4).unwrap();
        assert_eq!(date.to_string(), "2024-07-04");
        assert_eq!(date.to_string().parse::<Date>().unwrap(), date);
    }
}
