//! Payment frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DateError;

/// Nominal frequency of a recurring event (coupon, reset, payment).
///
/// Each variant carries its conventional tag value: the number of
/// occurrences per year, `-2` for every two years, and sentinels for
/// once-only, continuous and unclassified frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Single occurrence
    Once,
    /// Every two years
    Biannual,
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year)
    Semiannual,
    /// Quarterly payments (4 per year)
    #[default]
    Quarterly,
    /// Every two months (6 per year)
    Bimonthly,
    /// Monthly payments (12 per year)
    Monthly,
    /// Every two weeks (26 per year)
    Biweekly,
    /// Weekly payments (52 per year)
    Weekly,
    /// Daily (365 per year)
    Daily,
    /// Continuous
    Continuous,
    /// Anything that fits none of the above
    Other,
}

impl Frequency {
    /// Returns the conventional tag value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        match self {
            Frequency::Once => 0,
            Frequency::Biannual => -2,
            Frequency::Annual => 1,
            Frequency::Semiannual => 2,
            Frequency::Quarterly => 4,
            Frequency::Bimonthly => 6,
            Frequency::Monthly => 12,
            Frequency::Biweekly => 26,
            Frequency::Weekly => 52,
            Frequency::Daily => 365,
            Frequency::Continuous => 999,
            Frequency::Other => 9999,
        }
    }

    /// Returns the number of occurrences per year.
    ///
    /// NaN for [`Frequency::Once`] and [`Frequency::Other`], infinity for
    /// [`Frequency::Continuous`].
    #[must_use]
    pub fn annual_frequency(&self) -> f64 {
        match self {
            Frequency::Once | Frequency::Other => f64::NAN,
            Frequency::Continuous => f64::INFINITY,
            Frequency::Biannual => 0.5,
            other => f64::from(other.value()),
        }
    }

    /// Returns the number of months between occurrences.
    ///
    /// NaN for [`Frequency::Once`] and [`Frequency::Other`], zero for
    /// [`Frequency::Continuous`]. Sub-monthly frequencies give fractions.
    #[must_use]
    pub fn period_months(&self) -> f64 {
        match self {
            Frequency::Once | Frequency::Other => f64::NAN,
            Frequency::Continuous => 0.0,
            Frequency::Biannual => 24.0,
            other => 12.0 / f64::from(other.value()),
        }
    }

    /// Returns the whole number of months per period, if there is one.
    #[must_use]
    pub fn months_per_period(&self) -> Option<i32> {
        match self {
            Frequency::Biannual => Some(24),
            Frequency::Annual => Some(12),
            Frequency::Semiannual => Some(6),
            Frequency::Quarterly => Some(3),
            Frequency::Bimonthly => Some(2),
            Frequency::Monthly => Some(1),
            _ => None,
        }
    }

    /// Returns the name used by [`fmt::Display`] and [`std::str::FromStr`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Frequency::Once => "Once",
            Frequency::Biannual => "Biannual",
            Frequency::Annual => "Annual",
            Frequency::Semiannual => "Semiannual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Monthly => "Monthly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Weekly => "Weekly",
            Frequency::Daily => "Daily",
            Frequency::Continuous => "Continuous",
            Frequency::Other => "Other",
        }
    }

    /// Returns all frequencies.
    #[must_use]
    pub fn all() -> &'static [Frequency] {
        &[
            Frequency::Once,
            Frequency::Biannual,
            Frequency::Annual,
            Frequency::Semiannual,
            Frequency::Quarterly,
            Frequency::Bimonthly,
            Frequency::Monthly,
            Frequency::Biweekly,
            Frequency::Weekly,
            Frequency::Daily,
            Frequency::Continuous,
            Frequency::Other,
        ]
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Frequency {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "ONCE" | "ZERO" => Ok(Frequency::Once),
            "BIANNUAL" => Ok(Frequency::Biannual),
            "ANNUAL" | "YEARLY" => Ok(Frequency::Annual),
            "SEMIANNUAL" => Ok(Frequency::Semiannual),
            "QUARTERLY" => Ok(Frequency::Quarterly),
            "BIMONTHLY" => Ok(Frequency::Bimonthly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "BIWEEKLY" => Ok(Frequency::Biweekly),
            "WEEKLY" => Ok(Frequency::Weekly),
            "DAILY" => Ok(Frequency::Daily),
            "CONTINUOUS" => Ok(Frequency::Continuous),
            "OTHER" | "OTHERFREQUENCY" => Ok(Frequency::Other),
            _ => Err(DateError::invalid_frequency(s, "unknown frequency")),
        }
    }
}
