//! Roll conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Calendar, WeekendCalendar};
use crate::error::DateError;
use crate::types::Date;

/// Roll conventions.
///
/// These conventions specify how to move a date onto a business day, or
/// onto a reference date of its month (end of month, IMM date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RollConvention {
    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    #[default]
    ModifiedFollowing,

    /// Move to the following business day.
    Following,

    /// Move to the preceding business day, unless it crosses a month boundary,
    /// in which case move to the following business day.
    ModifiedPrevious,

    /// Move to the preceding business day.
    Previous,

    /// No adjustment - use the date as-is even if not a business day.
    Unadjusted,

    /// Last business day of the date's month.
    ModifiedFollowingEom,

    /// Third Wednesday of the date's month.
    Imm,

    /// Two days before the IMM date (Canadian IMM).
    CadImm,

    /// Last calendar day of the date's month, not adjusted.
    UnadjustedEom,
}

impl RollConvention {
    /// Rolls a date according to the convention.
    ///
    /// Without a calendar, Saturday/Sunday with no holidays is used.
    /// `Unadjusted`, `UnadjustedEom`, `Imm` and `CadImm` ignore the calendar.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fixdate_core::calendars::RollConvention;
    /// use fixdate_core::types::Date;
    ///
    /// let saturday = Date::from_ymd(2024, 3, 30).unwrap();
    /// assert_eq!(
    ///     RollConvention::ModifiedFollowing.roll(saturday, None),
    ///     Date::from_ymd(2024, 3, 29).unwrap()
    /// );
    /// ```
    #[must_use]
    pub fn roll(&self, date: Date, calendar: Option<&dyn Calendar>) -> Date {
        let calendar = calendar.unwrap_or(&WeekendCalendar);

        match self {
            RollConvention::Unadjusted => date,

            RollConvention::Following => calendar.adjust_up(date),

            RollConvention::ModifiedFollowing => {
                let adjusted = calendar.adjust_up(date);
                if adjusted.month() != date.month() {
                    // Crossed month boundary, go preceding instead
                    calendar.adjust_down(date)
                } else {
                    adjusted
                }
            }

            RollConvention::Previous => calendar.adjust_down(date),

            RollConvention::ModifiedPrevious => {
                let adjusted = calendar.adjust_down(date);
                if adjusted.month() != date.month() {
                    // Crossed month boundary, go following instead
                    calendar.adjust_up(date)
                } else {
                    adjusted
                }
            }

            RollConvention::ModifiedFollowingEom => calendar.adjust_down(date.end_of_month()),

            RollConvention::UnadjustedEom => date.end_of_month(),

            RollConvention::Imm => date.imm_date(),

            RollConvention::CadImm => date.imm_date().add_days(-2),
        }
    }

    /// Returns true if the result depends on the calendar.
    #[must_use]
    pub const fn uses_calendar(&self) -> bool {
        !matches!(
            self,
            RollConvention::Unadjusted
                | RollConvention::UnadjustedEom
                | RollConvention::Imm
                | RollConvention::CadImm
        )
    }

    /// Returns the tag name, as accepted by [`std::str::FromStr`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            RollConvention::ModifiedFollowing => "MODIFIED_FOLLOWING",
            RollConvention::Following => "FOLLOWING",
            RollConvention::ModifiedPrevious => "MODIFIED_PREVIOUS",
            RollConvention::Previous => "PREVIOUS",
            RollConvention::Unadjusted => "NONE",
            RollConvention::ModifiedFollowingEom => "MODIFIED_FOLLOWING_EOM",
            RollConvention::Imm => "IMM",
            RollConvention::CadImm => "CAD_IMM",
            RollConvention::UnadjustedEom => "UNADJUSTED_EOM",
        }
    }

    /// Returns all roll conventions.
    #[must_use]
    pub fn all() -> &'static [RollConvention] {
        &[
            RollConvention::ModifiedFollowing,
            RollConvention::Following,
            RollConvention::ModifiedPrevious,
            RollConvention::Previous,
            RollConvention::Unadjusted,
            RollConvention::ModifiedFollowingEom,
            RollConvention::Imm,
            RollConvention::CadImm,
            RollConvention::UnadjustedEom,
        ]
    }
}

impl fmt::Display for RollConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for RollConvention {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "MODIFIED_FOLLOWING" | "MF" => Ok(RollConvention::ModifiedFollowing),
            "FOLLOWING" | "F" => Ok(RollConvention::Following),
            "MODIFIED_PREVIOUS" | "MODIFIED_PRECEDING" | "MP" => {
                Ok(RollConvention::ModifiedPrevious)
            }
            "PREVIOUS" | "PRECEDING" | "P" => Ok(RollConvention::Previous),
            "NONE" | "UNADJUSTED" => Ok(RollConvention::Unadjusted),
            "MODIFIED_FOLLOWING_EOM" => Ok(RollConvention::ModifiedFollowingEom),
            "IMM" => Ok(RollConvention::Imm),
            "CAD_IMM" => Ok(RollConvention::CadImm),
            "UNADJUSTED_EOM" => Ok(RollConvention::UnadjustedEom),
            _ => Err(DateError::UnknownRollType(s.to_string())),
        }
    }
}
