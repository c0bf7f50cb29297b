//! 30/360 day count conventions.
//!
//! Every variant uses the same combination formula and differs only in
//! how the day-of-month of each endpoint is adjusted:
//!
//! $$YF = \frac{360 (Y_2 - Y_1) + 30 (M_2 - M_1) + (D_2 - D_1)}{360}$$

use crate::types::Date;

// =============================================================================
// Helper Functions
// =============================================================================

/// Applies the 30/360 combination formula to adjusted day numbers.
#[inline]
fn fraction(start: Date, end: Date, d1: u32, d2: u32) -> f64 {
    let years = i64::from(end.year() - start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    let days = i64::from(d2) - i64::from(d1);

    (360 * years + 30 * months + days) as f64 / 360.0
}

// =============================================================================
// 30/360
// =============================================================================

/// 30/360.
///
/// - D1 is capped at 30
/// - D2 of 31 becomes 30 only when D1 was 30 or 31
pub(crate) fn thirty_360(start: Date, end: Date) -> f64 {
    let d1 = start.day().min(30);
    let d2 = match end.day() {
        31 if start.day() >= 30 => 30,
        day => day,
    };
    fraction(start, end, d1, d2)
}

// =============================================================================
// 30E/360 (Eurobond Basis)
// =============================================================================

/// 30E/360: any 31st becomes the 30th.
pub(crate) fn thirty_360_e(start: Date, end: Date) -> f64 {
    let d1 = start.day().min(30);
    let d2 = end.day().min(30);
    fraction(start, end, d1, d2)
}

// =============================================================================
// 30E/360 ISDA
// =============================================================================

/// 30E/360 ISDA.
///
/// # Rules
///
/// 1. A start date in February keeps its day; otherwise a 31st becomes 30
/// 2. An end date on the last day of February becomes 30, unless it is the
///    maturity date
/// 3. Any other end date in February keeps its day; otherwise a 31st
///    becomes 30
pub(crate) fn thirty_360_isda(start: Date, end: Date, maturity: Date) -> f64 {
    let d1 = if start.month() == 2 {
        start.day()
    } else {
        start.day().min(30)
    };

    let d2 = if end.is_last_day_of_february() {
        if end == maturity {
            end.day()
        } else {
            30
        }
    } else if end.month() == 2 {
        end.day()
    } else {
        end.day().min(30)
    };

    fraction(start, end, d1, d2)
}

// =============================================================================
// 30/360 US (Bond Basis)
// =============================================================================

/// 30/360 US with the February end-of-month rules.
///
/// # Rules (applied in order)
///
/// 1. If D1 and D2 are both the last day of February, change D2 to 30
/// 2. If D1 is the last day of February, change D1 to 30
/// 3. If D2 is 31 and D1 is 30 or 31, change D2 to 30
/// 4. If D1 is 31, change D1 to 30
pub(crate) fn thirty_360_us(start: Date, end: Date) -> f64 {
    let mut d1 = start.day();
    let mut d2 = end.day();
    let start_feb_eom = start.is_last_day_of_february();

    if start_feb_eom && end.is_last_day_of_february() {
        d2 = 30;
    }
    if start_feb_eom {
        d1 = 30;
    }
    if d2 == 31 && d1 >= 30 {
        d2 = 30;
    }
    if d1 == 31 {
        d1 = 30;
    }

    fraction(start, end, d1, d2)
}
