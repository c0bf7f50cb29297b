//! Holiday calendars with configurable weekends.
//!
//! # Example
//!
//! ```
//! use fixdate_core::calendars::{Calendar, HolidayCalendar, Weekend};
//! use fixdate_core::types::Date;
//!
//! let holidays = vec![
//!     Date::from_ymd(2024, 1, 1).unwrap(),
//!     Date::from_ymd(2024, 12, 25).unwrap(),
//! ];
//! let cal = HolidayCalendar::new("Custom", holidays, Weekend::saturday_sunday()).unwrap();
//!
//! assert!(!cal.is_business_day(Date::from_ymd(2024, 1, 1).unwrap()));
//! assert!(cal.is_business_day(Date::from_ymd(2024, 1, 2).unwrap()));
//! ```

use chrono::Weekday;
use std::collections::HashSet;
use std::fmt;
use std::ops::Add;

use super::Calendar;
use crate::error::{DateError, DateResult};
use crate::types::Date;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const EVERY_DAY: u8 = 0b111_1111;

/// Set of weekdays treated as weekend days.
///
/// Stored as a bit set indexed by `Weekday::num_days_from_monday`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Weekend {
    bits: u8,
}

impl Weekend {
    /// No weekend days.
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    /// Saturday and Sunday (most markets).
    #[must_use]
    pub const fn saturday_sunday() -> Self {
        Self {
            bits: (1 << 5) | (1 << 6),
        }
    }

    /// Friday and Saturday (Middle East markets).
    #[must_use]
    pub const fn friday_saturday() -> Self {
        Self {
            bits: (1 << 4) | (1 << 5),
        }
    }

    /// Builds a weekend from a list of days.
    #[must_use]
    pub fn from_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut weekend = Self::none();
        for day in days {
            weekend.insert(day);
        }
        weekend
    }

    #[inline]
    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    /// Returns true if the day is a weekend day.
    #[inline]
    #[must_use]
    pub fn contains(&self, day: Weekday) -> bool {
        self.bits & Self::bit(day) != 0
    }

    /// Adds a weekend day.
    pub fn insert(&mut self, day: Weekday) {
        self.bits |= Self::bit(day);
    }

    /// Returns the union of both weekends.
    #[must_use]
    pub const fn union(self, other: Weekend) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns true if all seven days are weekend days.
    #[must_use]
    pub const fn is_every_day(&self) -> bool {
        self.bits & EVERY_DAY == EVERY_DAY
    }

    /// Number of weekend days.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Returns true if no day is a weekend day.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Weekend days from Monday to Sunday.
    #[must_use]
    pub fn days(&self) -> Vec<Weekday> {
        WEEKDAYS
            .iter()
            .copied()
            .filter(|day| self.contains(*day))
            .collect()
    }
}

impl Default for Weekend {
    fn default() -> Self {
        Self::saturday_sunday()
    }
}

impl fmt::Debug for Weekend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.days()).finish()
    }
}

/// A named calendar of holidays on top of a [`Weekend`].
///
/// Holidays can be added or removed through `&mut self`; share the
/// calendar across threads only once it is fully built.
#[derive(Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    name: String,
    holidays: HashSet<Date>,
    weekend: Weekend,
}

impl fmt::Debug for HolidayCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HolidayCalendar")
            .field("name", &self.name)
            .field("weekend", &self.weekend)
            .field("holiday_count", &self.holidays.len())
            .finish()
    }
}

impl HolidayCalendar {
    /// Creates a calendar from a holiday list and weekend.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidCalendar` if every day of the week is a
    /// weekend day.
    pub fn new(
        name: impl Into<String>,
        holidays: impl IntoIterator<Item = Date>,
        weekend: Weekend,
    ) -> DateResult<Self> {
        let name = name.into();
        if weekend.is_every_day() {
            return Err(DateError::InvalidCalendar { name });
        }
        let holidays: HashSet<Date> = holidays.into_iter().collect();
        log::debug!(
            "calendar '{}' built with {} holidays, weekend {:?}",
            name,
            holidays.len(),
            weekend
        );
        Ok(Self {
            name,
            holidays,
            weekend,
        })
    }

    /// Creates a Saturday/Sunday calendar without holidays.
    #[must_use]
    pub fn weekend_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holidays: HashSet::new(),
            weekend: Weekend::saturday_sunday(),
        }
    }

    /// Returns the weekend days.
    #[must_use]
    pub fn weekend(&self) -> Weekend {
        self.weekend
    }

    /// Returns the holiday set.
    #[must_use]
    pub fn holidays(&self) -> &HashSet<Date> {
        &self.holidays
    }

    /// Returns the holidays in ascending order.
    #[must_use]
    pub fn sorted_holidays(&self) -> Vec<Date> {
        let mut dates: Vec<Date> = self.holidays.iter().copied().collect();
        dates.sort_unstable();
        dates
    }

    /// Number of holidays.
    #[must_use]
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }

    /// Adds a holiday. Returns false if it was already present.
    pub fn add_holiday(&mut self, date: Date) -> bool {
        self.holidays.insert(date)
    }

    /// Removes a holiday. Returns false if it was not present.
    pub fn remove_holiday(&mut self, date: Date) -> bool {
        self.holidays.remove(&date)
    }

    /// Combines two calendars: a date is a business day only if it is one
    /// in both.
    ///
    /// Holidays and weekends are merged; the name is `"<self>+<other>"`.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidCalendar` if the merged weekend covers
    /// the whole week.
    pub fn combine(&self, other: &HolidayCalendar) -> DateResult<Self> {
        let name = format!("{}+{}", self.name, other.name);
        log::debug!("combining calendars into '{name}'");
        Self::new(
            name,
            self.holidays.union(&other.holidays).copied(),
            self.weekend.union(other.weekend),
        )
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_weekend(&self, date: Date) -> bool {
        self.weekend.contains(date.weekday())
    }

    fn is_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }
}

impl Add for &HolidayCalendar {
    type Output = DateResult<HolidayCalendar>;

    fn add(self, other: Self) -> Self::Output {
        self.combine(other)
    }
}

impl Add for HolidayCalendar {
    type Output = DateResult<HolidayCalendar>;

    fn add(self, other: HolidayCalendar) -> Self::Output {
        self.combine(&other)
    }
}
