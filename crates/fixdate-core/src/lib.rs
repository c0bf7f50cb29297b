//! # Fixdate Core
//!
//! Calendar-aware date arithmetic for fixed income.
//!
//! - **Calendars**: Weekend sets, holiday calendars and business day stepping
//! - **Roll Conventions**: Business day adjustment including IMM rolls
//! - **Tenors**: Signed periods such as `3M` or `-2W` with unit-aware arithmetic
//! - **Day Counts**: ACT, 30/360, ICMA and Business/252 year fractions
//! - **Schedules**: Tenor addition and roll date generation
//!
//! ## Example
//!
//! ```rust
//! use fixdate_core::prelude::*;
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! let yf = DayCountConvention::Act360.year_fraction(start, end).unwrap();
//! assert!((yf - 182.0 / 360.0).abs() < 1e-12);
//!
//! let rolled = RollConvention::Following.roll(Date::from_ymd(2024, 1, 6).unwrap(), None);
//! assert_eq!(rolled, Date::from_ymd(2024, 1, 8).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::cast_possible_truncation)]

pub mod calendars;
pub mod config;
pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;


/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        Calendar, CalendarData, HolidayCalendar, RollConvention, Weekend, WeekendCalendar,
    };
    pub use crate::config::ScheduleConfig;
    pub use crate::daycounts::{AccrualContext, DayCountConvention};
    pub use crate::error::{DateError, DateResult};
    pub use crate::schedule::{add_tenor, add_tenor_value, generate_dates};
    pub use crate::types::{Date, Frequency, Tenor, TenorUnit};
}

pub use calendars::{Calendar, HolidayCalendar, RollConvention, WeekendCalendar};
pub use daycounts::{AccrualContext, DayCountConvention};
pub use error::{DateError, DateResult};
pub use types::{Date, Frequency, Tenor, TenorUnit};
