//! Error types for the Fixdate library.
//!
//! Every failure is a local, synchronous validation error raised before any
//! result is produced. Variants carry the offending operands so callers can
//! report them without re-deriving context.

use thiserror::Error;

/// A specialized Result type for Fixdate operations.
pub type DateResult<T> = Result<T, DateError>;

/// The main error type for Fixdate operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateError {
    /// A year/month/day triple or string that is not a valid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Calendar whose weekend covers the whole week.
    #[error("Invalid calendar '{name}': every day of the week is defined as a weekend")]
    InvalidCalendar {
        /// Name of the rejected calendar.
        name: String,
    },

    /// Accrual period whose end precedes its start.
    #[error("Invalid period: end date {end} must not be before start date {start}")]
    InvalidPeriod {
        /// Period start.
        start: String,
        /// Period end.
        end: String,
    },

    /// Maturity date required by the convention but not supplied.
    #[error("Maturity date required for {convention} calculations")]
    MissingMaturity {
        /// Convention that needs the maturity.
        convention: &'static str,
    },

    /// Calendar required by the convention but not supplied.
    #[error("Calendar required for {convention} calculations")]
    MissingCalendar {
        /// Convention that needs the calendar.
        convention: &'static str,
    },

    /// ICMA conventions need maturity, payment date and frequency together.
    #[error("Maturity, payment dates and frequency required for {convention}")]
    MissingIcmaContext {
        /// Convention that needs the context.
        convention: &'static str,
    },

    /// Frequency not supported by the requested operation.
    #[error("Invalid frequency {frequency}: {reason}")]
    InvalidFrequency {
        /// The rejected frequency.
        frequency: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Tenor built from an out-of-range amount or unknown unit.
    #[error("Invalid tenor: {reason}")]
    InvalidTenor {
        /// Description of the problem.
        reason: String,
    },

    /// Tenor string that does not match `<signed-int><D|W|M|Y>`.
    #[error("Invalid tenor string format: '{input}'")]
    InvalidTenorFormat {
        /// The string that failed to parse.
        input: String,
    },

    /// Arithmetic or conversion between unit families that do not mix.
    #[error("Incompatible tenor units: cannot {operation} {lhs} and {rhs}")]
    IncompatibleTenorUnits {
        /// The attempted operation.
        operation: &'static str,
        /// Left operand.
        lhs: String,
        /// Right operand (or target unit).
        rhs: String,
    },

    /// Tenor division that does not produce a whole amount.
    #[error("{tenor} cannot be divided by {divisor}")]
    NotDivisible {
        /// The dividend tenor.
        tenor: String,
        /// The divisor.
        divisor: i32,
    },

    /// Schedule dates not ordered `start <= roll <= maturity`.
    #[error("Dates must be in order: start <= roll <= maturity (got {start}, {roll}, {maturity})")]
    InvalidDateOrder {
        /// Schedule start.
        start: String,
        /// First roll date.
        roll: String,
        /// Maturity.
        maturity: String,
    },

    /// Unrecognized roll convention name.
    #[error("Unknown roll type: '{0}'")]
    UnknownRollType(String),

    /// Unrecognized day count convention name.
    #[error("Unknown day count convention: '{0}'")]
    UnknownConvention(String),

    /// Configuration could not be parsed or failed validation.
    #[error("Configuration error: {reason}")]
    ConfigError {
        /// Description of the configuration error.
        reason: String,
    },
}

impl DateError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid frequency error.
    #[must_use]
    pub fn invalid_frequency(frequency: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidFrequency {
            frequency: frequency.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates an incompatible units error.
    #[must_use]
    pub fn incompatible_units(
        operation: &'static str,
        lhs: impl ToString,
        rhs: impl ToString,
    ) -> Self {
        Self::IncompatibleTenorUnits {
            operation,
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DateError::invalid_date("2024-02-30");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_missing_context_display() {
        let err = DateError::MissingIcmaContext {
            convention: "ACT/ACT ICMA",
        };
        assert_eq!(
            err.to_string(),
            "Maturity, payment dates and frequency required for ACT/ACT ICMA"
        );
    }

    #[test]
    fn test_not_divisible_display() {
        let err = DateError::NotDivisible {
            tenor: "5D".to_string(),
            divisor: 2,
        };
        assert_eq!(err.to_string(), "5D cannot be divided by 2");
    }
}
