//! Business/252 day count (Brazilian convention).

use crate::calendars::Calendar;
use crate::types::Date;

/// Trading days per year.
const BUSINESS_DAYS_PER_YEAR: f64 = 252.0;

/// Business days in `[start, end]`, both inclusive, divided by 252.
pub(crate) fn business_252(start: Date, end: Date, calendar: &dyn Calendar) -> f64 {
    let days = calendar.business_days_between(start, end);
    log::trace!(
        "Business/252 counted {days} business days from {start} to {end} on '{}'",
        calendar.name()
    );
    days as f64 / BUSINESS_DAYS_PER_YEAR
}
