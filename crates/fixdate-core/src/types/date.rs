//! Date type for calendar arithmetic.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{DateError, DateResult};

/// A calendar date (proleptic Gregorian, no time of day).
///
/// This is a newtype wrapper around `chrono::NaiveDate` providing the
/// month-end aware operations used by calendars, day counts and schedules.
///
/// # Example
///
/// ```rust
/// use fixdate_core::types::Date;
///
/// let date = Date::from_ymd(2024, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> DateResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| DateError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> DateResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| DateError::invalid_date(format!("Cannot parse: {s}")))
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

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Adds a number of days to the date.
    ///
    /// # Panics
    ///
    /// Panics if the result is outside the supported date range. Use
    /// [`Date::checked_add_days`] for caller-supplied amounts.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of days to the date.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDate` if the result is out of range.
    pub fn checked_add_days(&self, days: i64) -> DateResult<Self> {
        chrono::Duration::try_days(days)
            .and_then(|duration| self.0.checked_add_signed(duration))
            .map(Date)
            .ok_or_else(|| DateError::invalid_date(format!("{self} + {days} days")))
    }

    /// Adds a number of months to the date.
    ///
    /// The day of month is kept; if it does not exist in the target month
    /// (e.g., Jan 31 + 1 month) the target month's last day is used.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> DateResult<Self> {
        let total_months = i64::from(self.year()) * 12 + i64::from(self.month()) - 1
            + i64::from(months);
        let new_year = i32::try_from(total_months.div_euclid(12))
            .map_err(|_| DateError::invalid_date(format!("{self} + {months} months")))?;
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let max_day = days_in_month(new_year, new_month);
        Self::from_ymd(new_year, new_month, self.day().min(max_day))
    }

    /// Adds a number of years to the date.
    ///
    /// Feb 29 maps to Feb 28 when the target year is not a leap year.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDate` if the result is out of range.
    pub fn add_years(&self, years: i32) -> DateResult<Self> {
        let new_year = self
            .year()
            .checked_add(years)
            .ok_or_else(|| DateError::invalid_date(format!("{self} + {years} years")))?;
        let max_day = days_in_month(new_year, self.month());

        Self::from_ymd(new_year, self.month(), self.day().min(max_day))
    }

    /// Calculates the number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the first day of the month.
    #[must_use]
    pub fn start_of_month(&self) -> Self {
        Date(
            NaiveDate::from_ymd_opt(self.year(), self.month(), 1)
                .expect("first of month should always be valid"),
        )
    }

    /// Returns the end of month for the current date.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        Date(
            NaiveDate::from_ymd_opt(self.year(), self.month(), self.days_in_month())
                .expect("end of month should always be valid"),
        )
    }

    /// Checks if the date is the end of month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Checks if the date is the last day of February (28th or 29th).
    #[must_use]
    pub fn is_last_day_of_february(&self) -> bool {
        self.month() == 2 && self.is_end_of_month()
    }

    /// Returns the first day of the year.
    #[must_use]
    pub fn start_of_year(&self) -> Self {
        Date(
            NaiveDate::from_ymd_opt(self.year(), 1, 1)
                .expect("first of year should always be valid"),
        )
    }

    /// Returns the IMM date of the month: its third Wednesday.
    #[must_use]
    pub fn imm_date(&self) -> Self {
        let first = self.start_of_month();
        let offset = (7 + Weekday::Wed.num_days_from_monday()
            - first.weekday().num_days_from_monday())
            % 7;
        first.add_days(i64::from(offset) + 14)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

/// Number of days in `month` (1-12) of `year`.
///
/// The day before the first of the following month; December, which has
/// no following month in the last supported year, is always 31.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year.saturating_add(1), 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

/// Gregorian leap year rule.
pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
