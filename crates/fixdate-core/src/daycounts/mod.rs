//! Day count conventions for fixed income calculations.
//!
//! Day count conventions determine how accrued interest is calculated
//! by turning the span between two dates into a fraction of a year.
//!
//! # Supported Conventions
//!
//! ## ACT Family (Actual numerator)
//!
//! - `Act360`: Actual/360 - Money market convention
//! - `Act365`: Actual/365 Fixed
//! - `Act365NoLeap`: Actual/365 skipping Feb 29
//! - `ActActIsda`: Actual/Actual ISDA - Year-based split
//! - `ActActAfb`: Actual/Actual AFB - French convention
//! - `ActActIcma`, `Act365Icma`: Period-based (government bonds)
//!
//! ## 30/360 Family (Assumes 30-day months, 360-day years)
//!
//! - `Thirty360`, `Thirty360E`, `Thirty360Isda`, `Thirty360US`
//!
//! ## Business days
//!
//! - `Business252`: Business days over 252
//!
//! # Usage
//!
//! ```rust
//! use fixdate_core::daycounts::{AccrualContext, DayCountConvention};
//! use fixdate_core::types::Date;
//!
//! let start = Date::from_ymd(2024, 2, 29).unwrap();
//! let end = Date::from_ymd(2025, 2, 28).unwrap();
//! let maturity = Date::from_ymd(2026, 2, 28).unwrap();
//!
//! let ctx = AccrualContext::new().with_maturity(maturity);
//! let yf = DayCountConvention::Thirty360Isda.fraction(start, end, &ctx).unwrap();
//! assert!((yf - 361.0 / 360.0).abs() < 1e-12);
//! ```

mod actual;
mod business252;
mod icma;
mod thirty360;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendars::Calendar;
use crate::error::{DateError, DateResult};
use crate::types::{Date, Frequency};
use icma::{IcmaBasis, IcmaPeriod};

/// Auxiliary inputs some conventions need on top of the period bounds.
///
/// # Example
///
/// ```rust
/// use fixdate_core::calendars::WeekendCalendar;
/// use fixdate_core::daycounts::AccrualContext;
/// use fixdate_core::types::{Date, Frequency};
///
/// let ctx = AccrualContext::new()
///     .with_maturity(Date::from_ymd(2026, 1, 1).unwrap())
///     .with_payment(Date::from_ymd(2025, 1, 1).unwrap())
///     .with_frequency(Frequency::Annual)
///     .with_calendar(&WeekendCalendar);
/// assert!(ctx.calendar.is_some());
/// ```
#[derive(Clone, Copy, Default)]
pub struct AccrualContext<'a> {
    /// Maturity date of the instrument
    pub maturity: Option<Date>,
    /// Calendar for business day counting
    pub calendar: Option<&'a dyn Calendar>,
    /// Next payment date (end of the current coupon period)
    pub payment: Option<Date>,
    /// Coupon frequency
    pub frequency: Option<Frequency>,
}

impl<'a> AccrualContext<'a> {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn with_maturity(mut self, maturity: Date) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: &'a dyn Calendar) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Sets the next payment date.
    #[must_use]
    pub fn with_payment(mut self, payment: Date) -> Self {
        self.payment = Some(payment);
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }
}

impl fmt::Debug for AccrualContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccrualContext")
            .field("maturity", &self.maturity)
            .field("calendar", &self.calendar.map(|c| c.name()))
            .field("payment", &self.payment)
            .field("frequency", &self.frequency)
            .finish()
    }
}

/// Enumeration of all supported day count conventions.
///
/// # Example
///
/// ```rust
/// use fixdate_core::daycounts::DayCountConvention;
/// use fixdate_core::types::Date;
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 2, 1).unwrap();
/// let yf = DayCountConvention::Act360.year_fraction(start, end).unwrap();
/// assert!((yf - 31.0 / 360.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    // =========================================================================
    // ACT Family
    // =========================================================================
    /// Actual/360 - Money market instruments, FRNs
    Act360,

    /// Actual/365 Fixed
    Act365,

    /// Actual/365 No Leap - Feb 29 is not counted
    Act365NoLeap,

    /// Actual/Actual ISDA - Year-based calculation for swaps
    ActActIsda,

    /// Actual/Actual AFB - French convention
    ActActAfb,

    /// Actual/Actual ICMA - Period-based calculation for bonds
    ActActIcma,

    /// Actual/365 ICMA - Period-based with a nominal 365-day year
    Act365Icma,

    // =========================================================================
    // 30/360 Family
    // =========================================================================
    /// 30/360
    Thirty360,

    /// 30E/360 (Eurobond Basis)
    Thirty360E,

    /// 30E/360 ISDA - needs the maturity date
    Thirty360Isda,

    /// 30/360 US (Bond Basis) with February end-of-month rules
    Thirty360US,

    // =========================================================================
    // Business days
    // =========================================================================
    /// Business/252 - needs a calendar
    Business252,
}

impl DayCountConvention {
    /// Calculates the year fraction between two dates.
    ///
    /// # Errors
    ///
    /// - `DateError::InvalidPeriod` if `end` is before `start`
    /// - `DateError::MissingMaturity` for `Thirty360Isda` without maturity
    /// - `DateError::MissingCalendar` for `Business252` without calendar
    /// - `DateError::MissingIcmaContext` for the ICMA conventions without
    ///   maturity, payment and frequency
    /// - `DateError::InvalidFrequency` for the ICMA conventions with a
    ///   frequency that has no whole number of months per period
    pub fn fraction(&self, start: Date, end: Date, ctx: &AccrualContext<'_>) -> DateResult<f64> {
        if end < start {
            return Err(DateError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        match self {
            DayCountConvention::Act360 => Ok(actual::act_360(start, end)),
            DayCountConvention::Act365 => Ok(actual::act_365(start, end)),
            DayCountConvention::Act365NoLeap => Ok(actual::act_365_no_leap(start, end)),
            DayCountConvention::ActActIsda => Ok(actual::act_act_isda(start, end)),
            DayCountConvention::ActActAfb => Ok(actual::act_act_afb(start, end)),

            DayCountConvention::ActActIcma => {
                icma::icma_fraction(&self.icma_period(start, end, ctx)?, IcmaBasis::Actual)
            }
            DayCountConvention::Act365Icma => {
                icma::icma_fraction(&self.icma_period(start, end, ctx)?, IcmaBasis::Fixed365)
            }

            DayCountConvention::Thirty360 => Ok(thirty360::thirty_360(start, end)),
            DayCountConvention::Thirty360E => Ok(thirty360::thirty_360_e(start, end)),
            DayCountConvention::Thirty360Isda => {
                let maturity = ctx.maturity.ok_or(DateError::MissingMaturity {
                    convention: self.name(),
                })?;
                Ok(thirty360::thirty_360_isda(start, end, maturity))
            }
            DayCountConvention::Thirty360US => Ok(thirty360::thirty_360_us(start, end)),

            DayCountConvention::Business252 => {
                let calendar = ctx.calendar.ok_or(DateError::MissingCalendar {
                    convention: self.name(),
                })?;
                Ok(business252::business_252(start, end, calendar))
            }
        }
    }

    /// Calculates the year fraction with no auxiliary inputs.
    ///
    /// # Errors
    ///
    /// Same as [`DayCountConvention::fraction`]; conventions needing a
    /// maturity, calendar or ICMA context always fail.
    pub fn year_fraction(&self, start: Date, end: Date) -> DateResult<f64> {
        self.fraction(start, end, &AccrualContext::default())
    }

    fn icma_period(&self, start: Date, end: Date, ctx: &AccrualContext<'_>) -> DateResult<IcmaPeriod> {
        match (ctx.maturity, ctx.payment, ctx.frequency) {
            (Some(maturity), Some(payment), Some(frequency)) => Ok(IcmaPeriod {
                start,
                end,
                maturity,
                payment,
                frequency,
            }),
            _ => Err(DateError::MissingIcmaContext {
                convention: self.name(),
            }),
        }
    }

    /// Returns true if the convention needs `AccrualContext::maturity`.
    #[must_use]
    pub const fn requires_maturity(&self) -> bool {
        matches!(
            self,
            DayCountConvention::Thirty360Isda
                | DayCountConvention::ActActIcma
                | DayCountConvention::Act365Icma
        )
    }

    /// Returns true if the convention needs `AccrualContext::calendar`.
    #[must_use]
    pub const fn requires_calendar(&self) -> bool {
        matches!(self, DayCountConvention::Business252)
    }

    /// Returns true for the ICMA conventions, which need maturity, payment
    /// date and frequency.
    #[must_use]
    pub const fn is_icma(&self) -> bool {
        matches!(
            self,
            DayCountConvention::ActActIcma | DayCountConvention::Act365Icma
        )
    }

    /// Returns the nominal year basis (denominator).
    ///
    /// # Returns
    ///
    /// - 360 for ACT/360 and all 30/360 variants
    /// - 252 for Business/252
    /// - 365 for the others (approximation for the ACT/ACT variants)
    #[must_use]
    pub const fn basis(&self) -> u32 {
        match self {
            DayCountConvention::Act360
            | DayCountConvention::Thirty360
            | DayCountConvention::Thirty360E
            | DayCountConvention::Thirty360Isda
            | DayCountConvention::Thirty360US => 360,

            DayCountConvention::Business252 => 252,

            DayCountConvention::Act365
            | DayCountConvention::Act365NoLeap
            | DayCountConvention::ActActIsda
            | DayCountConvention::ActActAfb
            | DayCountConvention::ActActIcma
            | DayCountConvention::Act365Icma => 365,
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365 => "ACT/365",
            DayCountConvention::Act365NoLeap => "ACT/365 NL",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
            DayCountConvention::ActActAfb => "ACT/ACT AFB",
            DayCountConvention::ActActIcma => "ACT/ACT ICMA",
            DayCountConvention::Act365Icma => "ACT/365 ICMA",
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::Thirty360E => "30E/360",
            DayCountConvention::Thirty360Isda => "30E/360 ISDA",
            DayCountConvention::Thirty360US => "30/360 US",
            DayCountConvention::Business252 => "Business/252",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365,
            DayCountConvention::Act365NoLeap,
            DayCountConvention::ActActIsda,
            DayCountConvention::ActActAfb,
            DayCountConvention::ActActIcma,
            DayCountConvention::Act365Icma,
            DayCountConvention::Thirty360,
            DayCountConvention::Thirty360E,
            DayCountConvention::Thirty360Isda,
            DayCountConvention::Thirty360US,
            DayCountConvention::Business252,
        ]
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = DateError;

    /// Parses a day count convention from a string.
    ///
    /// Supports multiple formats:
    /// - Market style: "ACT/360", "30E/360 ISDA", "ACT/ACT ICMA"
    /// - Tag style: "ACT_360", "THIRTY_360_ISDA", "BUSINESS_252"
    /// - Rust enum style: "Act360", "Thirty360US"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_uppercase()
            .replace(['/', '_', '-', ' '], "")
            .replace("ACTUAL", "ACT")
            .replace("THIRTY", "30");

        match normalized.as_str() {
            "ACT360" => Ok(DayCountConvention::Act360),
            "ACT365" | "ACT365F" | "ACT365FIXED" => Ok(DayCountConvention::Act365),
            "ACT365NL" | "ACT365L" | "ACT365NOLEAP" => Ok(DayCountConvention::Act365NoLeap),
            "ACTACT" | "ACTACTISDA" => Ok(DayCountConvention::ActActIsda),
            "ACTACTAFB" | "AFB" => Ok(DayCountConvention::ActActAfb),
            "ACTACTICMA" | "ISMA" => Ok(DayCountConvention::ActActIcma),
            "ACT365ICMA" => Ok(DayCountConvention::Act365Icma),
            "30360" => Ok(DayCountConvention::Thirty360),
            "30E360" | "30360E" | "EUROBOND" => Ok(DayCountConvention::Thirty360E),
            "30E360ISDA" | "30360ISDA" => Ok(DayCountConvention::Thirty360Isda),
            "30360US" | "30U360" | "BOND" => Ok(DayCountConvention::Thirty360US),
            "BUSINESS252" | "BUS252" => Ok(DayCountConvention::Business252),
            _ => Err(DateError::UnknownConvention(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_invalid_period() {
        for convention in DayCountConvention::all() {
            let result = convention.year_fraction(d(2024, 2, 1), d(2024, 1, 1));
            assert!(
                matches!(result, Err(DateError::InvalidPeriod { .. })),
                "{convention}"
            );
        }
    }

    #[test]
    fn test_missing_context() {
        let start = d(2024, 1, 1);
        let end = d(2024, 7, 1);

        assert_eq!(
            DayCountConvention::Thirty360Isda.year_fraction(start, end),
            Err(DateError::MissingMaturity {
                convention: "30E/360 ISDA"
            })
        );
        assert_eq!(
            DayCountConvention::Business252.year_fraction(start, end),
            Err(DateError::MissingCalendar {
                convention: "Business/252"
            })
        );

        let partial = AccrualContext::new()
            .with_maturity(d(2026, 1, 1))
            .with_payment(d(2024, 7, 1));
        for convention in [DayCountConvention::ActActIcma, DayCountConvention::Act365Icma] {
            assert!(matches!(
                convention.fraction(start, end, &partial),
                Err(DateError::MissingIcmaContext { .. })
            ));
        }
    }

    #[test]
    fn test_icma_frequency_rejected_after_context() {
        let ctx = AccrualContext::new()
            .with_maturity(d(2026, 1, 1))
            .with_payment(d(2024, 7, 1));
        for frequency in [
            Frequency::Once,
            Frequency::Biweekly,
            Frequency::Weekly,
            Frequency::Daily,
            Frequency::Continuous,
            Frequency::Other,
        ] {
            let result = DayCountConvention::ActActIcma.fraction(
                d(2024, 1, 1),
                d(2024, 7, 1),
                &ctx.with_frequency(frequency),
            );
            assert!(
                matches!(result, Err(DateError::InvalidFrequency { .. })),
                "{frequency}"
            );
        }
    }

    #[test]
    fn test_zero_length_period() {
        let date = d(2024, 5, 15);
        let ctx = AccrualContext::new()
            .with_maturity(d(2030, 5, 15))
            .with_calendar(&WeekendCalendar);
        for convention in DayCountConvention::all() {
            if convention.is_icma() || *convention == DayCountConvention::Business252 {
                continue;
            }
            assert_relative_eq!(convention.fraction(date, date, &ctx).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_convention_half_year() {
        let start = d(2025, 1, 1);
        let end = d(2025, 7, 1);
        let ctx = AccrualContext::new()
            .with_maturity(d(2030, 1, 1))
            .with_calendar(&WeekendCalendar);

        for convention in DayCountConvention::all() {
            if convention.is_icma() {
                continue;
            }
            let yf = convention.fraction(start, end, &ctx).unwrap();
            assert!(yf > 0.4 && yf < 0.6, "{convention}: {yf}");
        }
    }

    #[test]
    fn test_convention_names() {
        assert_eq!(DayCountConvention::Act360.name(), "ACT/360");
        assert_eq!(DayCountConvention::ActActIcma.name(), "ACT/ACT ICMA");
        assert_eq!(DayCountConvention::Thirty360US.name(), "30/360 US");
        assert_eq!(DayCountConvention::Thirty360E.to_string(), "30E/360");
    }

    #[test]
    fn test_from_str() {
        for convention in DayCountConvention::all() {
            assert_eq!(
                convention.name().parse::<DayCountConvention>().unwrap(),
                *convention
            );
            assert_eq!(
                format!("{convention:?}").parse::<DayCountConvention>().unwrap(),
                *convention
            );
        }
        assert_eq!(
            "THIRTY_360_ISDA".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360Isda
        );
        assert_eq!(
            "ACT_365_NL".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365NoLeap
        );
        assert_eq!(
            "ACT_ACT".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActActIsda
        );
        assert!(matches!(
            "ACT/364".parse::<DayCountConvention>(),
            Err(DateError::UnknownConvention(_))
        ));
    }

    #[test]
    fn test_basis() {
        assert_eq!(DayCountConvention::Act360.basis(), 360);
        assert_eq!(DayCountConvention::Thirty360US.basis(), 360);
        assert_eq!(DayCountConvention::Act365.basis(), 365);
        assert_eq!(DayCountConvention::Business252.basis(), 252);
    }
}
