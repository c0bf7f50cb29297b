//! Property-based tests for calendar, day count and tenor invariants.
//!
//! These tests verify properties that should hold for any input:
//! - A business day is exactly a non-weekend, non-holiday day
//! - Adjusting up is idempotent
//! - Zero-length periods have a zero year fraction
//! - Tenors survive a string round trip
//! - Month addition is reversible unless the day of month was clamped

use chrono::Weekday;
use fixdate_core::calendars::{Calendar, HolidayCalendar, RollConvention, Weekend};
use fixdate_core::daycounts::{AccrualContext, DayCountConvention};
use fixdate_core::schedule::add_tenor;
use fixdate_core::types::{Date, Tenor, TenorUnit};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn base() -> Date {
    Date::from_ymd(2000, 1, 1).unwrap()
}

/// Dates between 2000 and roughly 2060.
fn date_strategy() -> impl Strategy<Value = Date> {
    (0i64..22_000).prop_map(|offset| base().add_days(offset))
}

fn weekday_strategy() -> impl Strategy<Value = Weekday> {
    (0u8..7).prop_map(|n| match n {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    })
}

/// Calendars with up to six weekend days and a handful of holidays.
fn calendar_strategy() -> impl Strategy<Value = HolidayCalendar> {
    (
        prop::collection::vec(weekday_strategy(), 0..=6),
        prop::collection::vec(date_strategy(), 0..40),
    )
        .prop_filter_map("weekend covers every day", |(days, holidays)| {
            HolidayCalendar::new("Generated", holidays, Weekend::from_days(days)).ok()
        })
}

fn unit_strategy() -> impl Strategy<Value = TenorUnit> {
    prop_oneof![
        Just(TenorUnit::Day),
        Just(TenorUnit::Week),
        Just(TenorUnit::Month),
        Just(TenorUnit::Year),
    ]
}

fn roll_strategy() -> impl Strategy<Value = RollConvention> {
    prop::sample::select(RollConvention::all().to_vec())
}

// =============================================================================
// CALENDAR PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_business_day_definition(cal in calendar_strategy(), date in date_strategy()) {
        let expected = !cal.is_weekend(date) && !cal.holidays().contains(&date);
        prop_assert_eq!(cal.is_business_day(date), expected);
    }

    #[test]
    fn prop_adjust_up_idempotent(cal in calendar_strategy(), date in date_strategy()) {
        let once = cal.adjust_up(date);
        prop_assert!(once >= date);
        prop_assert!(cal.is_business_day(once));
        prop_assert_eq!(cal.adjust_up(once), once);
    }

    #[test]
    fn prop_adjust_down_idempotent(cal in calendar_strategy(), date in date_strategy()) {
        let once = cal.adjust_down(date);
        prop_assert!(once <= date);
        prop_assert_eq!(cal.adjust_down(once), once);
    }

    #[test]
    fn prop_add_business_days_lands_on_business_day(
        cal in calendar_strategy(),
        date in date_strategy(),
        days in -30i32..30,
        up in any::<bool>(),
    ) {
        let result = cal.add_business_days(date, days, up);
        prop_assert!(cal.is_business_day(result));
    }

    #[test]
    fn prop_following_rolls_stay_on_business_days(
        cal in calendar_strategy(),
        date in date_strategy(),
        roll in roll_strategy(),
    ) {
        let rolled = roll.roll(date, Some(&cal));
        match roll {
            RollConvention::Following
            | RollConvention::Previous
            | RollConvention::ModifiedFollowing
            | RollConvention::ModifiedPrevious => prop_assert!(cal.is_business_day(rolled)),
            RollConvention::Unadjusted => prop_assert_eq!(rolled, date),
            _ => {}
        }
    }
}

// =============================================================================
// DAY COUNT PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_zero_length_fraction(date in date_strategy()) {
        let cal = HolidayCalendar::weekend_only("Weekend");
        let ctx = AccrualContext::new()
            .with_maturity(date.add_days(3650))
            .with_calendar(&cal);

        for convention in DayCountConvention::all() {
            if convention.is_icma()
                || *convention == DayCountConvention::ActActAfb
                || *convention == DayCountConvention::Business252
            {
                continue;
            }
            // A February start keeps its day while a February month end becomes 30
            if *convention == DayCountConvention::Thirty360Isda && date.is_last_day_of_february() {
                continue;
            }
            let yf = convention.fraction(date, date, &ctx).unwrap();
            prop_assert!(yf.abs() < 1e-12, "{} gave {}", convention, yf);
        }
    }

    #[test]
    fn prop_actual_fractions_monotonic(start in date_strategy(), a in 0i64..2000, b in 0i64..2000) {
        let (near, far) = (start.add_days(a.min(b)), start.add_days(a.max(b)));
        for convention in [
            DayCountConvention::Act360,
            DayCountConvention::Act365,
            DayCountConvention::ActActIsda,
        ] {
            let yf_near = convention.year_fraction(start, near).unwrap();
            let yf_far = convention.year_fraction(start, far).unwrap();
            prop_assert!(yf_near <= yf_far + 1e-12, "{}", convention);
        }
    }
}

// =============================================================================
// TENOR PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_tenor_string_roundtrip(amount in -10_000i32..10_000, unit in unit_strategy()) {
        let tenor = Tenor::new(amount, unit);
        let parsed: Tenor = tenor.to_string().parse().unwrap();
        prop_assert_eq!(parsed, tenor);
        prop_assert_eq!(parsed.amount(), amount);
    }

    #[test]
    fn prop_month_addition_reversible_unless_clamped(date in date_strategy(), months in -120i32..120) {
        let forward = add_tenor(date, months, TenorUnit::Month, None, None).unwrap();
        let back = add_tenor(forward, -months, TenorUnit::Month, None, None).unwrap();

        if forward.day() == date.day() {
            prop_assert_eq!(back, date);
        } else {
            // Clamped to a shorter month
            prop_assert!(forward.is_end_of_month());
            prop_assert!(back <= date);
        }
    }

    #[test]
    fn prop_day_addition_exact(date in date_strategy(), days in -5000i32..5000) {
        let forward = add_tenor(date, days, TenorUnit::Day, None, None).unwrap();
        prop_assert_eq!(date.days_between(&forward), i64::from(days));
    }
}
