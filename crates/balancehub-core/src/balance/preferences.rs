//! User-configured balance limits.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schedule::protected::hhmm;

/// Daily working window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHours {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
        }
    }
}

/// Limits the conflict detector checks a schedule against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePreferences {
    #[serde(default = "default_max_consecutive_work_hours")]
    pub max_consecutive_work_hours: f64,
    #[serde(default = "default_max_events_per_day")]
    pub max_events_per_day: u32,
    /// A gap at least this long resets the consecutive-work accumulator.
    #[serde(default = "default_min_break_minutes")]
    pub min_break_minutes: f64,
    #[serde(default)]
    pub work_hours: WorkHours,
}

fn default_max_consecutive_work_hours() -> f64 {
    3.0
}
fn default_max_events_per_day() -> u32 {
    5
}
fn default_min_break_minutes() -> f64 {
    15.0
}

impl Default for BalancePreferences {
    fn default() -> Self {
        Self {
            max_consecutive_work_hours: default_max_consecutive_work_hours(),
            max_events_per_day: default_max_events_per_day(),
            min_break_minutes: default_min_break_minutes(),
            work_hours: WorkHours::default(),
        }
    }
}

impl BalancePreferences {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.max_consecutive_work_hours.is_finite() && self.max_consecutive_work_hours > 0.0) {
            return Err(invalid(
                "max_consecutive_work_hours",
                "must be a positive number",
            ));
        }
        if self.max_events_per_day == 0 {
            return Err(invalid("max_events_per_day", "must be at least 1"));
        }
        if !(self.min_break_minutes.is_finite() && self.min_break_minutes >= 0.0) {
            return Err(invalid("min_break_minutes", "must not be negative"));
        }
        if self.work_hours.end <= self.work_hours.start {
            return Err(ValidationError::InvalidTimeWindow {
                start: self.work_hours.start,
                end: self.work_hours.end,
            });
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
