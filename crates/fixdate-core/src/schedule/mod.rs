//! Tenor arithmetic on dates and roll date schedules.
//!
//! # Example
//!
//! ```rust
//! use fixdate_core::schedule::generate_dates;
//! use fixdate_core::types::{Date, Frequency};
//!
//! let dates = generate_dates(
//!     Date::from_ymd(2024, 1, 1).unwrap(),
//!     Date::from_ymd(2024, 1, 15).unwrap(),
//!     Date::from_ymd(2024, 12, 15).unwrap(),
//!     Some(Frequency::Quarterly),
//!     None,
//!     false,
//!     None,
//! )
//! .unwrap();
//!
//! // Maturity falls on a Sunday and is rolled to Monday
//! assert_eq!(dates.last(), Some(&Date::from_ymd(2024, 12, 16).unwrap()));
//! ```

use std::collections::VecDeque;

use crate::calendars::{Calendar, RollConvention, WeekendCalendar};
use crate::error::{DateError, DateResult};
use crate::types::{Date, Frequency, Tenor, TenorUnit};

/// Adds `amount` units to a date.
///
/// Year and month steps keep the day of month, falling back to the last
/// day of the target month. Week and day steps are exact. The result is
/// rolled only when both `roll` and `calendar` are supplied.
///
/// Month steps are not always invertible: Jan 31 + 1M - 1M is Jan 29 in a
/// leap year.
///
/// # Errors
///
/// Returns `DateError::InvalidDate` if the result is out of range.
pub fn add_tenor(
    date: Date,
    amount: i32,
    unit: TenorUnit,
    roll: Option<RollConvention>,
    calendar: Option<&dyn Calendar>,
) -> DateResult<Date> {
    if amount == 0 {
        return Ok(date);
    }

    let result = match unit {
        TenorUnit::Year => date.add_years(amount)?,
        TenorUnit::Month => date.add_months(amount)?,
        TenorUnit::Week => date.checked_add_days(i64::from(amount) * 7)?,
        TenorUnit::Day => date.checked_add_days(i64::from(amount))?,
    };

    match (roll, calendar) {
        (Some(roll), Some(calendar)) => Ok(roll.roll(result, Some(calendar))),
        _ => Ok(result),
    }
}

/// Adds a [`Tenor`] to a date. See [`add_tenor`].
///
/// # Errors
///
/// Returns `DateError::InvalidDate` if the result is out of range.
pub fn add_tenor_value(
    date: Date,
    tenor: Tenor,
    roll: Option<RollConvention>,
    calendar: Option<&dyn Calendar>,
) -> DateResult<Date> {
    add_tenor(date, tenor.amount(), tenor.unit(), roll, calendar)
}

/// Generates the ordered roll dates between `roll` and `maturity`.
///
/// Forward generation steps from `roll`, reverse generation steps back from
/// `maturity`; each date is offset from its anchor by a whole number of
/// periods and then rolled. The rolled maturity always ends the schedule
/// and no date appears twice.
///
/// A forward schedule always starts with the rolled `roll` date. A reverse
/// schedule starts with it only when `start < roll < maturity`.
///
/// Defaults: quarterly, modified following, Saturday/Sunday calendar.
///
/// # Errors
///
/// - `DateError::InvalidDateOrder` unless `start <= roll <= maturity`
/// - `DateError::InvalidFrequency` for Once, Continuous and Other
pub fn generate_dates(
    start: Date,
    roll: Date,
    maturity: Date,
    frequency: Option<Frequency>,
    roll_convention: Option<RollConvention>,
    reverse: bool,
    calendar: Option<&dyn Calendar>,
) -> DateResult<Vec<Date>> {
    if start > roll || roll > maturity {
        return Err(DateError::InvalidDateOrder {
            start: start.to_string(),
            roll: roll.to_string(),
            maturity: maturity.to_string(),
        });
    }

    let frequency = frequency.unwrap_or_default();
    let step = schedule_step(frequency)?;
    let convention = roll_convention.unwrap_or_default();
    let calendar = calendar.unwrap_or(&WeekendCalendar);

    log::debug!(
        "generating {} schedule {start} / {roll} -> {maturity}, step {step}, {convention} on '{}'",
        if reverse { "reverse" } else { "forward" },
        calendar.name()
    );

    let walker = Walker {
        step,
        convention,
        calendar,
    };
    let dates = if reverse {
        walker.reverse(start, roll, maturity)?
    } else {
        walker.forward(roll, maturity)?
    };

    log::debug!("generated {} dates", dates.len());
    Ok(dates)
}

/// Period length used between generated dates.
///
/// # Errors
///
/// Returns `DateError::InvalidFrequency` for Once, Continuous and Other.
pub fn schedule_step(frequency: Frequency) -> DateResult<Tenor> {
    match frequency {
        Frequency::Once | Frequency::Continuous | Frequency::Other => {
            Err(DateError::invalid_frequency(
                frequency,
                "date generation needs a periodic frequency (not Once, Continuous or Other)",
            ))
        }
        periodic => Tenor::from_frequency(periodic),
    }
}

struct Walker<'a> {
    step: Tenor,
    convention: RollConvention,
    calendar: &'a dyn Calendar,
}

impl Walker<'_> {
    fn roll(&self, date: Date) -> Date {
        self.convention.roll(date, Some(self.calendar))
    }

    /// `anchor + periods * step`, rolled.
    fn offset(&self, anchor: Date, periods: i32) -> DateResult<Date> {
        let shifted = add_tenor(anchor, self.step.amount() * periods, self.step.unit(), None, None)?;
        Ok(self.roll(shifted))
    }

    fn forward(&self, roll: Date, maturity: Date) -> DateResult<Vec<Date>> {
        let mut dates = vec![self.roll(roll)];

        let mut periods = 1;
        loop {
            let current = self.offset(roll, periods)?;
            if current >= maturity {
                break;
            }
            log::trace!("forward period {periods}: {current}");
            dates.push(current);
            periods += 1;
        }

        if maturity > roll {
            dates.push(self.roll(maturity));
        }
        Ok(dates)
    }

    fn reverse(&self, start: Date, roll: Date, maturity: Date) -> DateResult<Vec<Date>> {
        let mut dates = VecDeque::from([self.roll(maturity)]);

        let mut periods = 1;
        loop {
            let current = self.offset(maturity, -periods)?;
            if current <= roll {
                break;
            }
            log::trace!("reverse period {periods}: {current}");
            dates.push_front(current);
            periods += 1;
        }

        if roll > start && roll < maturity {
            dates.push_front(self.roll(roll));
        }
        Ok(dates.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{HolidayCalendar, Weekend};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_add_tenor_units() {
        let date = d(2024, 1, 31);
        assert_eq!(add_tenor(date, 0, TenorUnit::Month, None, None).unwrap(), date);
        assert_eq!(add_tenor(date, 1, TenorUnit::Month, None, None).unwrap(), d(2024, 2, 29));
        assert_eq!(add_tenor(d(2025, 1, 31), 1, TenorUnit::Month, None, None).unwrap(), d(2025, 2, 28));
        assert_eq!(add_tenor(date, 1, TenorUnit::Year, None, None).unwrap(), d(2025, 1, 31));
        assert_eq!(add_tenor(date, 2, TenorUnit::Week, None, None).unwrap(), d(2024, 2, 14));
        assert_eq!(add_tenor(date, -31, TenorUnit::Day, None, None).unwrap(), d(2023, 12, 31));
        assert_eq!(add_tenor(d(2024, 2, 29), 1, TenorUnit::Year, None, None).unwrap(), d(2025, 2, 28));
    }

    #[test]
    fn test_add_tenor_rolls_only_with_both() {
        let cal = WeekendCalendar;
        // 2024-01-06 is a Saturday
        let date = d(2024, 1, 5);
        let following = Some(RollConvention::Following);

        assert_eq!(add_tenor(date, 1, TenorUnit::Day, following, None).unwrap(), d(2024, 1, 6));
        assert_eq!(add_tenor(date, 1, TenorUnit::Day, None, Some(&cal)).unwrap(), d(2024, 1, 6));
        assert_eq!(add_tenor(date, 1, TenorUnit::Day, following, Some(&cal)).unwrap(), d(2024, 1, 8));
    }

    #[test]
    fn test_add_tenor_value() {
        let tenor: Tenor = "-3M".parse().unwrap();
        assert_eq!(add_tenor_value(d(2024, 5, 31), tenor, None, None).unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn test_forward_schedule() {
        let dates = generate_dates(
            d(2024, 1, 1),
            d(2024, 1, 15),
            d(2024, 12, 15),
            Some(Frequency::Quarterly),
            None,
            false,
            None,
        )
        .unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 1, 15), d(2024, 4, 15), d(2024, 7, 15), d(2024, 10, 15), d(2024, 12, 16)]
        );
    }

    #[test]
    fn test_reverse_schedule() {
        let dates = generate_dates(
            d(2024, 1, 1),
            d(2024, 1, 15),
            d(2024, 12, 15),
            Some(Frequency::Quarterly),
            None,
            true,
            None,
        )
        .unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 1, 15), d(2024, 3, 15), d(2024, 6, 17), d(2024, 9, 16), d(2024, 12, 16)]
        );
    }

    #[test]
    fn test_roll_equal_to_start_leads_forward_schedule() {
        let dates = generate_dates(
            d(2024, 1, 15),
            d(2024, 1, 15),
            d(2024, 7, 15),
            Some(Frequency::Quarterly),
            None,
            false,
            None,
        )
        .unwrap();
        assert_eq!(dates, vec![d(2024, 1, 15), d(2024, 4, 15), d(2024, 7, 15)]);

        // Reverse generation stops before the roll date
        let dates = generate_dates(
            d(2024, 1, 15),
            d(2024, 1, 15),
            d(2024, 7, 15),
            Some(Frequency::Quarterly),
            None,
            true,
            None,
        )
        .unwrap();
        assert_eq!(dates, vec![d(2024, 4, 15), d(2024, 7, 15)]);
    }

    #[test]
    fn test_roll_equal_to_maturity_is_not_repeated() {
        // 2024-12-15 is a Sunday
        for reverse in [false, true] {
            let dates = generate_dates(
                d(2024, 1, 1),
                d(2024, 12, 15),
                d(2024, 12, 15),
                Some(Frequency::Quarterly),
                None,
                reverse,
                None,
            )
            .unwrap();
            assert_eq!(dates, vec![d(2024, 12, 16)], "reverse = {reverse}");
        }

        let same = d(2024, 6, 3);
        for reverse in [false, true] {
            let dates = generate_dates(same, same, same, None, None, reverse, None).unwrap();
            assert_eq!(dates, vec![same], "reverse = {reverse}");
        }
    }

    #[test]
    fn test_add_tenor_out_of_range() {
        let date = d(2024, 1, 1);
        for unit in [TenorUnit::Day, TenorUnit::Week, TenorUnit::Month, TenorUnit::Year] {
            assert!(
                matches!(
                    add_tenor(date, i32::MAX, unit, None, None),
                    Err(DateError::InvalidDate { .. })
                ),
                "{unit}"
            );
            assert!(add_tenor(date, i32::MIN, unit, None, None).is_err(), "{unit}");
        }
    }

    #[test]
    fn test_month_end_anchor_does_not_drift() {
        let dates = generate_dates(
            d(2024, 1, 31),
            d(2024, 1, 31),
            d(2024, 5, 31),
            Some(Frequency::Monthly),
            Some(RollConvention::Unadjusted),
            false,
            None,
        )
        .unwrap();
        assert_eq!(
            dates,
            vec![
                d(2024, 1, 31),
                d(2024, 2, 29),
                d(2024, 3, 31),
                d(2024, 4, 30),
                d(2024, 5, 31)
            ]
        );
    }

    #[test]
    fn test_weekly_schedule() {
        let dates = generate_dates(
            d(2024, 1, 1),
            d(2024, 1, 1),
            d(2024, 1, 29),
            Some(Frequency::Weekly),
            None,
            false,
            None,
        )
        .unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 1, 1), d(2024, 1, 8), d(2024, 1, 15), d(2024, 1, 22), d(2024, 1, 29)]
        );
    }

    #[test]
    fn test_schedule_with_holidays() {
        let cal = HolidayCalendar::new("Sample", [d(2024, 4, 15)], Weekend::saturday_sunday()).unwrap();
        let dates = generate_dates(
            d(2024, 1, 1),
            d(2024, 1, 15),
            d(2024, 7, 15),
            Some(Frequency::Quarterly),
            Some(RollConvention::Following),
            false,
            Some(&cal),
        )
        .unwrap();
        assert_eq!(dates, vec![d(2024, 1, 15), d(2024, 4, 16), d(2024, 7, 15)]);
    }

    #[test]
    fn test_invalid_inputs() {
        let start = d(2024, 1, 1);
        let maturity = d(2024, 12, 15);

        assert!(matches!(
            generate_dates(maturity, start, maturity, None, None, false, None),
            Err(DateError::InvalidDateOrder { .. })
        ));
        assert!(matches!(
            generate_dates(start, maturity, start, None, None, false, None),
            Err(DateError::InvalidDateOrder { .. })
        ));
        for frequency in [Frequency::Once, Frequency::Continuous, Frequency::Other] {
            assert!(matches!(
                generate_dates(start, start, maturity, Some(frequency), None, false, None),
                Err(DateError::InvalidFrequency { .. })
            ));
        }
    }

    #[test]
    fn test_schedule_step() {
        assert_eq!(schedule_step(Frequency::Semiannual).unwrap().to_string(), "6M");
        assert_eq!(schedule_step(Frequency::Biannual).unwrap().to_string(), "2Y");
        assert_eq!(schedule_step(Frequency::Daily).unwrap().to_string(), "1D");
        assert!(schedule_step(Frequency::Once).is_err());
    }
}
