//! Actual day count conventions.
//!
//! The numerator is the actual number of calendar days in the period.

use crate::types::{is_leap_year, Date};

// =============================================================================
// ACT/360 and ACT/365
// =============================================================================

/// Actual days divided by 360.
pub(crate) fn act_360(start: Date, end: Date) -> f64 {
    start.days_between(&end) as f64 / 360.0
}

/// Actual days divided by 365.
pub(crate) fn act_365(start: Date, end: Date) -> f64 {
    start.days_between(&end) as f64 / 365.0
}

/// Days of `[start, end)` that are not Feb 29, divided by 365.
pub(crate) fn act_365_no_leap(start: Date, end: Date) -> f64 {
    let mut days = 0_i64;
    let mut current = start;

    while current < end {
        if !(current.month() == 2 && current.day() == 29) {
            days += 1;
        }
        current = current.add_days(1);
    }

    days as f64 / 365.0
}

// =============================================================================
// ACT/ACT ISDA
// =============================================================================

/// Actual/Actual ISDA.
///
/// Whole years between the start and end years, corrected by the day of
/// year of each endpoint over its own year length.
///
/// $$YF = (Y_2 - Y_1) + \frac{doy(end)}{days(Y_2)} - \frac{doy(start)}{days(Y_1)}$$
pub(crate) fn act_act_isda(start: Date, end: Date) -> f64 {
    let end_part = start_of_year_offset(end) as f64 / f64::from(end.days_in_year());
    let start_part = start_of_year_offset(start) as f64 / f64::from(start.days_in_year());

    f64::from(end.year() - start.year()) + end_part - start_part
}

fn start_of_year_offset(date: Date) -> i64 {
    date.start_of_year().days_between(&date)
}

// =============================================================================
// ACT/ACT AFB
// =============================================================================

/// Actual/Actual AFB (French Bond Market Association).
///
/// Periods up to a year use 366 when a Feb 29 falls inside, 365 otherwise.
/// Longer periods are split one year back from `end` and summed.
pub(crate) fn act_act_afb(start: Date, end: Date) -> f64 {
    let days = start.days_between(&end);
    let mut denominator = 365.0;
    let mut multi_year = days > 366;

    if !multi_year {
        if !start.is_leap_year() && !end.is_leap_year() {
            multi_year = days > 365;
        } else {
            let leap_year = if start.is_leap_year() {
                start.year()
            } else {
                end.year()
            };
            let contains_leap_day = Date::from_ymd(leap_year, 2, 29)
                .is_ok_and(|leap_day| start <= leap_day && leap_day <= end);

            if contains_leap_day {
                denominator = 366.0;
            } else {
                multi_year = days > 365;
            }
        }
    }

    if !multi_year {
        return days as f64 / denominator;
    }

    let previous = one_year_before(end);
    log::trace!("AFB split {start} -> {previous} -> {end}");
    act_act_afb(start, previous) + act_act_afb(previous, end)
}

/// Same month and day one year earlier, keeping February month-ends aligned.
fn one_year_before(date: Date) -> Date {
    let year = date.year() - 1;
    let day = match (date.month(), date.day()) {
        (2, 29) => 28,
        (2, 28) if is_leap_year(year) => 29,
        (_, day) => day,
    };
    Date::from_ymd(year, date.month(), day).unwrap_or_else(|_| date.add_days(-365))
}
