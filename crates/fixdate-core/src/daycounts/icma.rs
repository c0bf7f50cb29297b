//! ICMA period-based day counts.
//!
//! The year fraction is measured in coupon periods and divided by the
//! coupon frequency. Regular periods use a closed form; stub periods are
//! split into notional coupon periods which each contribute their share.

use crate::error::{DateError, DateResult};
use crate::types::{Date, Frequency};

/// Denominator used inside each coupon period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IcmaBasis {
    /// Actual length of the coupon period (ACT/ACT ICMA)
    Actual,
    /// Nominal 365-day year split by frequency (ACT/365 ICMA)
    Fixed365,
}

/// Coupon period inputs shared by both ICMA conventions.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IcmaPeriod {
    pub start: Date,
    pub end: Date,
    pub maturity: Date,
    pub payment: Date,
    pub frequency: Frequency,
}

/// Computes an ICMA year fraction.
///
/// # Errors
///
/// Returns `DateError::InvalidFrequency` for frequencies without a whole
/// number of months per period (Once, Biweekly, Weekly, Daily, Continuous,
/// Other).
pub(crate) fn icma_fraction(period: &IcmaPeriod, basis: IcmaBasis) -> DateResult<f64> {
    let months = period.frequency.months_per_period().ok_or_else(|| {
        DateError::invalid_frequency(
            period.frequency,
            "ICMA day counts need a frequency of at least one coupon per two years and at most one per month",
        )
    })?;
    let factor = period.frequency.annual_frequency();

    if is_regular_period(period.start, period.payment, months) {
        return Ok(regular_fraction(period, factor, basis));
    }
    stub_fraction(period, months, factor, basis)
}

/// True when `payment` is exactly one coupon period after `start`.
///
/// Days of month align when equal, or when one date is a month end and the
/// other's day does not exist in its month.
fn is_regular_period(start: Date, payment: Date, months: i32) -> bool {
    let month_distance = (payment.year() - start.year()) * 12 + payment.month() as i32
        - start.month() as i32;
    if month_distance != months {
        return false;
    }

    start.day() == payment.day()
        || (start.is_end_of_month() && payment.day() > start.days_in_month())
        || (payment.is_end_of_month() && start.day() > payment.days_in_month())
}

fn regular_fraction(period: &IcmaPeriod, factor: f64, basis: IcmaBasis) -> f64 {
    let days = period.start.days_between(&period.end) as f64;

    match basis {
        IcmaBasis::Actual => {
            let period_days = period.start.days_between(&period.payment) as f64;
            days / (period_days * factor)
        }
        IcmaBasis::Fixed365 => {
            if days > 365.0 / factor && period.end != period.payment {
                1.0 / factor - 1.0 / 365.0
            } else {
                days / 365.0
            }
        }
    }
}

/// Splits an irregular period into notional coupon periods.
///
/// With `payment == maturity` the stub is at the back and notional periods
/// run forward from `start`. Otherwise they run backward from `payment`.
/// Boundaries are always offset from the anchor so month-end clamping does
/// not accumulate.
fn stub_fraction(
    period: &IcmaPeriod,
    months: i32,
    factor: f64,
    basis: IcmaBasis,
) -> DateResult<f64> {
    let IcmaPeriod {
        start,
        end,
        payment,
        maturity,
        ..
    } = *period;
    let mut total = 0.0;

    if payment == maturity {
        let mut step = 0;
        loop {
            let lo = start.add_months(step * months)?;
            let hi = start.add_months((step + 1) * months)?;
            let overlap = start.max(lo).days_between(&end.min(hi));
            total += contribution(overlap, lo.days_between(&hi), factor, basis);
            log::trace!("ICMA back stub period {lo} -> {hi}: overlap {overlap}");

            if hi >= end {
                break;
            }
            step += 1;
        }
    } else {
        let mut step = 0;
        loop {
            let hi = payment.add_months(-step * months)?;
            let lo = payment.add_months(-(step + 1) * months)?;
            if end > lo {
                let overlap = start.max(lo).days_between(&end.min(hi));
                total += contribution(overlap, lo.days_between(&hi), factor, basis);
                log::trace!("ICMA front stub period {lo} -> {hi}: overlap {overlap}");
            }

            if lo <= start {
                break;
            }
            step += 1;
        }
    }

    Ok(total / factor)
}

fn contribution(overlap: i64, length: i64, factor: f64, basis: IcmaBasis) -> f64 {
    match basis {
        IcmaBasis::Actual => overlap as f64 / length as f64,
        IcmaBasis::Fixed365 if overlap == length => 1.0,
        IcmaBasis::Fixed365 => overlap as f64 / (365.0 / factor),
    }
}
