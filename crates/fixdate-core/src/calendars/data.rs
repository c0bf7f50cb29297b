//! Serializable holiday calendar data.
//!
//! Holiday data comes from outside the library. [`CalendarData`] is the
//! interchange format callers hand over, typically parsed from JSON.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::{Calendar, HolidayCalendar, Weekend};
use crate::error::{DateError, DateResult};
use crate::types::Date;

/// Calendar data structure for JSON serialization.
///
/// # JSON Format
///
/// ```json
/// {
///   "name": "My Calendar",
///   "weekend": ["Sat", "Sun"],
///   "holidays": ["2025-01-01", "2025-12-25"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarData {
    /// Name of the calendar
    pub name: String,

    /// Weekend days (optional, defaults to Saturday and Sunday)
    #[serde(default)]
    pub weekend: Option<Vec<Weekday>>,

    /// List of holiday dates in YYYY-MM-DD format
    #[serde(default)]
    pub holidays: Vec<String>,
}

impl HolidayCalendar {
    /// Load a calendar from JSON data.
    ///
    /// # Errors
    ///
    /// Returns `DateError::ConfigError` if the JSON is malformed, and the
    /// errors of [`HolidayCalendar::from_calendar_data`] otherwise.
    pub fn from_json(json: &str) -> DateResult<Self> {
        let data: CalendarData = serde_json::from_str(json)
            .map_err(|e| DateError::config(format!("Failed to parse calendar JSON: {e}")))?;
        Self::from_calendar_data(data)
    }

    /// Load a calendar from a [`CalendarData`] struct.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDate` for a holiday string that is not a
    /// valid date and `DateError::InvalidCalendar` for an all-week weekend.
    pub fn from_calendar_data(data: CalendarData) -> DateResult<Self> {
        let weekend = data
            .weekend
            .map_or_else(Weekend::saturday_sunday, |days| Weekend::from_days(days));
        let holidays = data
            .holidays
            .iter()
            .map(|s| Date::parse(s))
            .collect::<DateResult<Vec<_>>>()?;

        Self::new(data.name, holidays, weekend)
    }

    /// Export calendar data to a serializable struct.
    ///
    /// Holidays are written in ascending order.
    #[must_use]
    pub fn to_calendar_data(&self) -> CalendarData {
        CalendarData {
            name: self.name().to_string(),
            weekend: Some(self.weekend().days()),
            holidays: self
                .sorted_holidays()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Export to a pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns `DateError::ConfigError` if serialization fails.
    pub fn to_json(&self) -> DateResult<String> {
        serde_json::to_string_pretty(&self.to_calendar_data())
            .map_err(|e| DateError::config(format!("Failed to serialize calendar: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let json = r#"{
            "name": "Sample",
            "holidays": ["2024-01-01", "2024-12-25"]
        }"#;
        let cal = HolidayCalendar::from_json(json).unwrap();

        assert_eq!(cal.name(), "Sample");
        assert_eq!(cal.holiday_count(), 2);
        assert_eq!(cal.weekend(), Weekend::saturday_sunday());
        assert!(!cal.is_business_day(Date::from_ymd(2024, 12, 25).unwrap()));
    }

    #[test]
    fn test_from_json_custom_weekend() {
        let json = r#"{"name": "Gulf", "weekend": ["Fri", "Sat"]}"#;
        let cal = HolidayCalendar::from_json(json).unwrap();

        assert_eq!(cal.weekend(), Weekend::friday_saturday());
        assert_eq!(cal.holiday_count(), 0);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            HolidayCalendar::from_json("{not json"),
            Err(DateError::ConfigError { .. })
        ));
        assert!(matches!(
            HolidayCalendar::from_json(r#"{"name": "Bad", "holidays": ["2024-02-30"]}"#),
            Err(DateError::InvalidDate { .. })
        ));
        let all_week = r#"{"name": "Never", "weekend": ["Mon","Tue","Wed","Thu","Fri","Sat","Sun"]}"#;
        assert!(matches!(
            HolidayCalendar::from_json(all_week),
            Err(DateError::InvalidCalendar { .. })
        ));
    }

    #[test]
    fn test_json_export_roundtrip() {
        let cal = HolidayCalendar::new(
            "Sample",
            [
                Date::from_ymd(2024, 12, 25).unwrap(),
                Date::from_ymd(2024, 1, 1).unwrap(),
            ],
            Weekend::saturday_sunday(),
        )
        .unwrap();

        let data = cal.to_calendar_data();
        assert_eq!(data.holidays, vec!["2024-01-01", "2024-12-25"]);

        let restored = HolidayCalendar::from_json(&cal.to_json().unwrap()).unwrap();
        assert_eq!(restored, cal);
    }
}
