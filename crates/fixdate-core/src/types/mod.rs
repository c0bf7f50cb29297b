//! Value types for date arithmetic.
//!
//! - [`Date`]: Calendar date with month-end aware arithmetic
//! - [`Frequency`]: Nominal payment frequency
//! - [`Tenor`]: Signed amount of days, weeks, months or years

mod date;
mod frequency;
mod tenor;

pub use date::Date;
pub use frequency::Frequency;
pub use tenor::{Tenor, TenorUnit};

pub(crate) use date::is_leap_year;
