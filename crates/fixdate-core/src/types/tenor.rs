//! Tenor value type: a signed amount of days, weeks, months or years.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Mul, Neg};

use super::Frequency;
use crate::error::{DateError, DateResult};

/// Approximate days per year for cross-family comparisons.
const DAYS_PER_YEAR_APPROX: f64 = 365.25;
/// Approximate days per month for cross-family comparisons.
const DAYS_PER_MONTH_APPROX: f64 = 30.4375;

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days (`D`)
    Day,
    /// Weeks of seven days (`W`)
    Week,
    /// Calendar months (`M`)
    Month,
    /// Calendar years (`Y`)
    Year,
}

impl TenorUnit {
    /// Returns the single-letter code.
    #[must_use]
    pub const fn letter(&self) -> char {
        match self {
            TenorUnit::Day => 'D',
            TenorUnit::Week => 'W',
            TenorUnit::Month => 'M',
            TenorUnit::Year => 'Y',
        }
    }

    /// Looks up a unit from its single-letter code.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'D' => Some(TenorUnit::Day),
            'W' => Some(TenorUnit::Week),
            'M' => Some(TenorUnit::Month),
            'Y' => Some(TenorUnit::Year),
            _ => None,
        }
    }

    /// Year and month tenors move by calendar months.
    #[must_use]
    pub const fn is_month_based(&self) -> bool {
        matches!(self, TenorUnit::Month | TenorUnit::Year)
    }
}

impl fmt::Display for TenorUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Exact value of a tenor used for equality and hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Canonical {
    Zero,
    Months(i64),
    Days(i64),
}

/// A signed duration expressed as an amount of a [`TenorUnit`].
///
/// Years and months convert exactly into each other, as do weeks and days.
/// Mixing the two families is rejected by arithmetic and only compared
/// approximately (365.25 days per year, 30.4375 days per month).
///
/// # Example
///
/// ```rust
/// use fixdate_core::types::{Tenor, TenorUnit};
///
/// let t: Tenor = "18M".parse().unwrap();
/// assert_eq!(t, Tenor::new(18, TenorUnit::Month));
/// assert_eq!(t.checked_add(&Tenor::new(1, TenorUnit::Year)).unwrap().to_string(), "30M");
/// assert_eq!(Tenor::new(1, TenorUnit::Year), Tenor::new(12, TenorUnit::Month));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenor {
    amount: i32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor.
    #[must_use]
    pub const fn new(amount: i32, unit: TenorUnit) -> Self {
        Self { amount, unit }
    }

    /// Creates a tenor from an unchecked amount and unit letter.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidTenor` if the amount does not fit the
    /// tenor range or the letter is not one of `D`, `W`, `M`, `Y`.
    pub fn from_parts(amount: i64, letter: char) -> DateResult<Self> {
        let unit = TenorUnit::from_letter(letter).ok_or_else(|| DateError::InvalidTenor {
            reason: format!("unit must be one of D, W, M, Y, got '{letter}'"),
        })?;
        Self::checked_new(amount, unit)
    }

    fn checked_new(amount: i64, unit: TenorUnit) -> DateResult<Self> {
        let amount = i32::try_from(amount).map_err(|_| DateError::InvalidTenor {
            reason: format!("amount {amount} is out of range"),
        })?;
        Ok(Self::new(amount, unit))
    }

    /// Returns the signed amount.
    #[must_use]
    pub const fn amount(&self) -> i32 {
        self.amount
    }

    /// Returns the unit.
    #[must_use]
    pub const fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Builds the tenor between two occurrences of `frequency`.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidFrequency` for [`Frequency::Continuous`]
    /// (no tenor representation) and [`Frequency::Other`].
    pub fn from_frequency(frequency: Frequency) -> DateResult<Self> {
        match frequency {
            Frequency::Once => Ok(Self::new(0, TenorUnit::Year)),
            Frequency::Annual => Ok(Self::new(1, TenorUnit::Year)),
            Frequency::Biannual => Ok(Self::new(2, TenorUnit::Year)),
            Frequency::Semiannual
            | Frequency::Quarterly
            | Frequency::Bimonthly
            | Frequency::Monthly => Ok(Self::new(12 / frequency.value(), TenorUnit::Month)),
            Frequency::Biweekly | Frequency::Weekly => {
                Ok(Self::new(52 / frequency.value(), TenorUnit::Week))
            }
            Frequency::Daily => Ok(Self::new(1, TenorUnit::Day)),
            Frequency::Continuous => Err(DateError::invalid_frequency(
                frequency,
                "continuous frequency has no tenor representation",
            )),
            Frequency::Other => Err(DateError::invalid_frequency(frequency, "unknown frequency")),
        }
    }

    /// Maps the tenor back onto a [`Frequency`].
    ///
    /// Zero maps to [`Frequency::Once`]; negative amounts and periods
    /// without a named frequency map to [`Frequency::Other`].
    #[must_use]
    pub fn to_frequency(&self) -> Frequency {
        if self.amount == 0 {
            return Frequency::Once;
        }
        if self.amount < 0 {
            return Frequency::Other;
        }
        match self.unit {
            TenorUnit::Year => months_to_frequency(i64::from(self.amount) * 12),
            TenorUnit::Month => months_to_frequency(i64::from(self.amount)),
            TenorUnit::Week => match self.amount {
                1 => Frequency::Weekly,
                2 => Frequency::Biweekly,
                _ => Frequency::Other,
            },
            TenorUnit::Day => match self.amount {
                1 => Frequency::Daily,
                _ => Frequency::Other,
            },
        }
    }

    /// Converts the amount into `target` units.
    ///
    /// Year to month and week to day are exact. Year or month to day is
    /// only allowed with `approx`, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns `DateError::IncompatibleTenorUnits` for any other conversion.
    pub fn convert_to(&self, target: TenorUnit, approx: bool) -> DateResult<i64> {
        let amount = i64::from(self.amount);
        match (self.unit, target) {
            (unit, target) if unit == target => Ok(amount),
            (TenorUnit::Year, TenorUnit::Month) => Ok(amount * 12),
            (TenorUnit::Week, TenorUnit::Day) => Ok(amount * 7),
            (TenorUnit::Year, TenorUnit::Day) if approx => {
                Ok((f64::from(self.amount) * DAYS_PER_YEAR_APPROX) as i64)
            }
            (TenorUnit::Month, TenorUnit::Day) if approx => {
                Ok((f64::from(self.amount) * DAYS_PER_MONTH_APPROX) as i64)
            }
            _ => Err(DateError::incompatible_units("convert", self, target)),
        }
    }

    /// Adds two tenors.
    ///
    /// A zero operand is the identity. Year/month sums are in months and
    /// week/day sums in days unless both units already agree.
    ///
    /// # Errors
    ///
    /// Returns `DateError::IncompatibleTenorUnits` when mixing month-based
    /// and day-based units.
    pub fn checked_add(&self, other: &Tenor) -> DateResult<Tenor> {
        if self.amount == 0 {
            return Ok(*other);
        }
        if other.amount == 0 {
            return Ok(*self);
        }
        match (self.unit, other.unit) {
            (lhs, rhs) if lhs == rhs => {
                Self::checked_new(i64::from(self.amount) + i64::from(other.amount), lhs)
            }
            (lhs, rhs) if lhs.is_month_based() && rhs.is_month_based() => {
                let months = self.convert_to(TenorUnit::Month, false)?
                    + other.convert_to(TenorUnit::Month, false)?;
                Self::checked_new(months, TenorUnit::Month)
            }
            (lhs, rhs) if !lhs.is_month_based() && !rhs.is_month_based() => {
                let days = self.convert_to(TenorUnit::Day, false)?
                    + other.convert_to(TenorUnit::Day, false)?;
                Self::checked_new(days, TenorUnit::Day)
            }
            _ => Err(DateError::incompatible_units("add", self, other)),
        }
    }

    /// Subtracts `other` from this tenor.
    ///
    /// # Errors
    ///
    /// Same as [`Tenor::checked_add`].
    pub fn checked_sub(&self, other: &Tenor) -> DateResult<Tenor> {
        self.checked_add(&-*other)
    }

    /// Divides the tenor by an integer.
    ///
    /// Years fall back to months and weeks to days when that makes the
    /// division exact.
    ///
    /// # Errors
    ///
    /// Returns `DateError::NotDivisible` if no exact result exists or the
    /// divisor is zero.
    pub fn checked_div(&self, divisor: i32) -> DateResult<Tenor> {
        let not_divisible = || DateError::NotDivisible {
            tenor: self.to_string(),
            divisor,
        };
        if divisor == 0 {
            return Err(not_divisible());
        }
        // i32::MIN / -1 has no i32 result
        if self.amount.checked_rem(divisor) == Some(0) {
            if let Some(amount) = self.amount.checked_div(divisor) {
                return Ok(Self::new(amount, self.unit));
            }
        }
        let fallback = match self.unit {
            TenorUnit::Year => Some(TenorUnit::Month),
            TenorUnit::Week => Some(TenorUnit::Day),
            TenorUnit::Month | TenorUnit::Day => None,
        };
        if let Some(unit) = fallback {
            let amount = self.convert_to(unit, false)?;
            if amount % i64::from(divisor) == 0 {
                return Self::checked_new(amount / i64::from(divisor), unit);
            }
        }
        Err(not_divisible())
    }

    /// Multiplies the amount by an integer, keeping the unit.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidTenor` if the amount overflows.
    pub fn checked_mul(&self, n: i32) -> DateResult<Tenor> {
        Self::checked_new(i64::from(self.amount) * i64::from(n), self.unit)
    }

    fn canonical(&self) -> Canonical {
        let amount = i64::from(self.amount);
        match self.unit {
            _ if self.amount == 0 => Canonical::Zero,
            TenorUnit::Year => Canonical::Months(amount * 12),
            TenorUnit::Month => Canonical::Months(amount),
            TenorUnit::Week => Canonical::Days(amount * 7),
            TenorUnit::Day => Canonical::Days(amount),
        }
    }

    fn approx_days(&self) -> i64 {
        // Every unit converts to days once approximation is allowed.
        self.convert_to(TenorUnit::Day, true).unwrap_or_default()
    }
}

fn months_to_frequency(months: i64) -> Frequency {
    match months {
        1 => Frequency::Monthly,
        2 => Frequency::Bimonthly,
        3 => Frequency::Quarterly,
        6 => Frequency::Semiannual,
        12 => Frequency::Annual,
        _ => Frequency::Other,
    }
}

impl PartialEq for Tenor {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Tenor {}

impl Hash for Tenor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl PartialOrd for Tenor {
    /// Exact within a unit family, approximate across families.
    ///
    /// Cross-family tenors whose approximate day counts tie are neither
    /// equal nor ordered and return `None`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.canonical(), other.canonical()) {
            (Canonical::Zero, Canonical::Zero) => Some(Ordering::Equal),
            (Canonical::Months(lhs), Canonical::Months(rhs))
            | (Canonical::Days(lhs), Canonical::Days(rhs)) => Some(lhs.cmp(&rhs)),
            _ => match self.approx_days().cmp(&other.approx_days()) {
                Ordering::Equal => None,
                ordering => Some(ordering),
            },
        }
    }
}

impl Neg for Tenor {
    type Output = Tenor;

    fn neg(self) -> Self::Output {
        Tenor::new(self.amount.saturating_neg(), self.unit)
    }
}

/// Saturates at the `i32` bounds like negation; use
/// [`Tenor::checked_mul`] to detect overflow.
impl Mul<i32> for Tenor {
    type Output = Tenor;

    fn mul(self, n: i32) -> Self::Output {
        Tenor::new(self.amount.saturating_mul(n), self.unit)
    }
}

impl Mul<Tenor> for i32 {
    type Output = Tenor;

    fn mul(self, tenor: Tenor) -> Self::Output {
        tenor * self
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit)
    }
}

impl std::str::FromStr for Tenor {
    type Err = DateError;

    /// Parses `"<signed-int><unit-letter>"`, e.g. `"3M"`, `"-2W"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateError::InvalidTenorFormat {
            input: s.to_string(),
        };
        let trimmed = s.trim();
        let letter = trimmed.chars().last().ok_or_else(invalid)?;
        let unit = TenorUnit::from_letter(letter).ok_or_else(invalid)?;
        let amount = trimmed[..trimmed.len() - letter.len_utf8()]
            .parse::<i32>()
            .map_err(|_| invalid())?;
        Ok(Tenor::new(amount, unit))
    }
}

impl TryFrom<String> for Tenor {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}

impl TryFrom<Frequency> for Tenor {
    type Error = DateError;

    fn try_from(frequency: Frequency) -> Result<Self, Self::Error> {
        Tenor::from_frequency(frequency)
    }
}

impl From<Tenor> for Frequency {
    fn from(tenor: Tenor) -> Self {
        tenor.to_frequency()
    }
}
