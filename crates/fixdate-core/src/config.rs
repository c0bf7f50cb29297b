//! Schedule generation configuration.
//!
//! A [`ScheduleConfig`] bundles the defaults used when generating roll
//! dates so they can be loaded from JSON and reused across instruments.

use serde::{Deserialize, Serialize};

use crate::calendars::{Calendar, RollConvention};
use crate::error::{DateError, DateResult};
use crate::schedule::{generate_dates, schedule_step};
use crate::types::{Date, Frequency};

// =============================================================================
// SCHEDULE CONFIGURATION
// =============================================================================

/// Settings for roll date generation.
///
/// ```rust
/// use fixdate_core::config::ScheduleConfig;
/// use fixdate_core::types::Frequency;
///
/// let config = ScheduleConfig::from_json(r#"{ "frequency": "Semiannual" }"#).unwrap();
/// assert_eq!(config.frequency, Frequency::Semiannual);
/// assert!(!config.reverse);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Period between generated dates.
    #[serde(default = "default_frequency")]
    pub frequency: Frequency,

    /// Adjustment applied to every generated date.
    #[serde(default = "default_roll_convention")]
    pub roll_convention: RollConvention,

    /// Generate backward from maturity instead of forward from the roll date.
    #[serde(default)]
    pub reverse: bool,
}

fn default_frequency() -> Frequency {
    Frequency::Quarterly
}

fn default_roll_convention() -> RollConvention {
    RollConvention::ModifiedFollowing
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            roll_convention: default_roll_convention(),
            reverse: false,
        }
    }
}

impl ScheduleConfig {
    /// Creates a forward configuration.
    #[must_use]
    pub fn new(frequency: Frequency, roll_convention: RollConvention) -> Self {
        Self {
            frequency,
            roll_convention,
            reverse: false,
        }
    }

    /// Parses a configuration from JSON, filling missing fields with defaults.
    ///
    /// The result is validated before it is returned.
    pub fn from_json(json: &str) -> DateResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DateError::config(format!("invalid schedule config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> DateResult<String> {
        serde_json::to_string(self).map_err(|e| DateError::config(e.to_string()))
    }

    /// Sets the frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the roll convention.
    #[must_use]
    pub fn with_roll_convention(mut self, roll_convention: RollConvention) -> Self {
        self.roll_convention = roll_convention;
        self
    }

    /// Sets the generation direction.
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Checks that the frequency has a schedule step.
    pub fn validate(&self) -> DateResult<()> {
        schedule_step(self.frequency).map(|_| ())
    }

    /// Generates roll dates with these settings.
    ///
    /// See [`generate_dates`](crate::schedule::generate_dates).
    pub fn generate(
        &self,
        start: Date,
        roll: Date,
        maturity: Date,
        calendar: Option<&dyn Calendar>,
    ) -> DateResult<Vec<Date>> {
        generate_dates(
            start,
            roll,
            maturity,
            Some(self.frequency),
            Some(self.roll_convention),
            self.reverse,
            calendar,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = ScheduleConfig::default();
        assert_eq!(config.frequency, Frequency::Quarterly);
        assert_eq!(config.roll_convention, RollConvention::ModifiedFollowing);
        assert!(!config.reverse);

        assert_eq!(ScheduleConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ScheduleConfig::new(Frequency::Monthly, RollConvention::Following)
            .with_reverse(true);
        let json = config.to_json().unwrap();
        assert_eq!(ScheduleConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ScheduleConfig::from_json("{ \"frequency\": 4 "),
            Err(DateError::ConfigError { .. })
        ));
        assert!(matches!(
            ScheduleConfig::from_json(r#"{ "frequency": "Fortnightly" }"#),
            Err(DateError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_aperiodic() {
        assert!(matches!(
            ScheduleConfig::from_json(r#"{ "frequency": "Continuous" }"#),
            Err(DateError::InvalidFrequency { .. })
        ));
        assert!(ScheduleConfig::default()
            .with_frequency(Frequency::Once)
            .validate()
            .is_err());
    }

    #[test]
    fn test_generate() {
        let config = ScheduleConfig::default().with_reverse(true);
        let dates = config
            .generate(d(2024, 1, 1), d(2024, 1, 15), d(2024, 12, 15), None)
            .unwrap();
        assert_eq!(dates.first(), Some(&d(2024, 1, 15)));
        assert_eq!(dates[1], d(2024, 3, 15));
        assert_eq!(dates.len(), 5);
    }
}
