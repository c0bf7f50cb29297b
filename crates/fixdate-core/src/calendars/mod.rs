//! Business day calendars and roll conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait with business day stepping and adjustment
//! - [`WeekendCalendar`], the Saturday/Sunday calendar used as a default
//! - [`HolidayCalendar`], a named holiday set with a configurable [`Weekend`]
//! - [`RollConvention`] for rolling dates onto business days

use chrono::Weekday;

mod conventions;
mod data;
mod holiday;

pub use conventions::RollConvention;
pub use data::CalendarData;
pub use holiday::{HolidayCalendar, Weekend};

use crate::types::Date;

/// Trait for business day calendars.
///
/// A date is a business day when it is neither a weekend day nor a
/// holiday. Implementors supply the two predicates; stepping and
/// adjustment are provided.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date falls on one of the calendar's weekend days.
    fn is_weekend(&self, date: Date) -> bool;

    /// Returns true if the date is listed as a holiday.
    fn is_holiday(&self, date: Date) -> bool;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// Returns the first business day on or after the given date.
    fn adjust_up(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Returns the last business day on or before the given date.
    fn adjust_down(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Advances a date by a number of business days.
    ///
    /// A start date that is not a business day is first adjusted up or
    /// down according to `adjust_up`. The adjusted date is then stepped one
    /// calendar day at a time in the direction of `days`, counting only
    /// business days. Zero returns the adjusted start.
    fn add_business_days(&self, date: Date, days: i32, adjust_up: bool) -> Date {
        let mut result = if adjust_up {
            self.adjust_up(date)
        } else {
            self.adjust_down(date)
        };
        let mut remaining = days.unsigned_abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Counts business days from `start` to `end`, both inclusive.
    ///
    /// Returns zero when `end` precedes `start`.
    fn business_days_between(&self, start: Date, end: Date) -> i64 {
        let mut count = 0;
        let mut current = start;

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

/// A weekend-only calendar (Saturday and Sunday, no holidays).
///
/// Stands in wherever a calendar is optional and none was supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "WeekendOnly"
    }

    fn is_weekend(&self, date: Date) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    fn is_holiday(&self, _date: Date) -> bool {
        false
    }
}
