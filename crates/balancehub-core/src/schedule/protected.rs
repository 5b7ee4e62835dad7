//! Protected ("no-zone") time rules and their expansion into intervals.
//!
//! A rule names a weekday and a time-of-day window. Expansion is a pure,
//! restartable iterator over concrete [`Interval`]s anchored on an explicit
//! week start, so nothing here reads the wall clock.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::interval::{Interval, IntervalCategory, RuleOrigin};
use crate::error::ValidationError;

/// Title given to every generated protected interval.
pub const PROTECTED_TITLE: &str = "No-Zone Time (Protected)";

/// Default number of weeks a recurring rule is expanded over.
pub const DEFAULT_HORIZON_WEEKS: u32 = 8;

/// A recurring or one-off protected time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedTimeRule {
    pub id: String,
    /// 0=Sun ... 6=Sat
    pub day_of_week: u8,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub recurring: bool,
}

impl ProtectedTimeRule {
    pub fn new(
        day_of_week: u8,
        start: NaiveTime,
        end: NaiveTime,
        recurring: bool,
    ) -> Result<Self, ValidationError> {
        Self::with_id(uuid::Uuid::new_v4().to_string(), day_of_week, start, end, recurring)
    }

    pub fn with_id(
        id: impl Into<String>,
        day_of_week: u8,
        start: NaiveTime,
        end: NaiveTime,
        recurring: bool,
    ) -> Result<Self, ValidationError> {
        let rule = Self {
            id: id.into(),
            day_of_week,
            start,
            end,
            recurring,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Check the weekday range and `start < end`.
    ///
    /// Deserialized rules bypass the constructors, so callers that accept
    /// rules from files should run this.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.day_of_week > 6 {
            return Err(ValidationError::InvalidValue {
                field: "day_of_week".to_string(),
                message: format!("{} is not in 0..=6", self.day_of_week),
            });
        }
        if self.end <= self.start {
            return Err(ValidationError::InvalidTimeWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Number of instances this rule yields for a horizon.
    pub fn instance_count(&self, horizon_weeks: u32) -> u32 {
        if self.recurring {
            horizon_weeks
        } else {
            1
        }
    }

    /// Expand into concrete protected intervals, one per week.
    ///
    /// `week_start` is the first day (Sunday) of week offset 0.
    pub fn expand(&self, week_start: NaiveDate, horizon_weeks: u32) -> ProtectedExpansion<'_> {
        ProtectedExpansion {
            rule: self,
            week_start,
            next_offset: 0,
            total: self.instance_count(horizon_weeks),
        }
    }

    /// Id of the instance generated for `week_offset`.
    pub fn instance_id(&self, week_offset: u32) -> String {
        format!("no-zone-{}-week-{}", self.id, week_offset)
    }

    fn instance(&self, week_start: NaiveDate, week_offset: u32) -> Interval {
        let day = week_start
            + Duration::weeks(i64::from(week_offset))
            + Duration::days(i64::from(self.day_of_week));
        Interval {
            id: self.instance_id(week_offset),
            title: PROTECTED_TITLE.to_string(),
            start: Utc.from_utc_datetime(&day.and_time(self.start)),
            end: Utc.from_utc_datetime(&day.and_time(self.end)),
            category: IntervalCategory::Protected,
            origin: Some(RuleOrigin {
                rule_id: self.id.clone(),
                week_offset,
            }),
        }
    }
}

/// Finite iterator over the instances of a rule.
///
/// Cloning yields an independent iterator at the same position.
#[derive(Debug, Clone)]
pub struct ProtectedExpansion<'a> {
    rule: &'a ProtectedTimeRule,
    week_start: NaiveDate,
    next_offset: u32,
    total: u32,
}

impl Iterator for ProtectedExpansion<'_> {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        if self.next_offset >= self.total {
            return None;
        }
        let interval = self.rule.instance(self.week_start, self.next_offset);
        self.next_offset += 1;
        Some(interval)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total - self.next_offset) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ProtectedExpansion<'_> {}

/// Expand every rule, in rule order.
pub fn expand_rules(
    rules: &[ProtectedTimeRule],
    week_start: NaiveDate,
    horizon_weeks: u32,
) -> Vec<Interval> {
    rules
        .iter()
        .flat_map(|rule| rule.expand(week_start, horizon_weeks))
        .collect()
}

/// The Sunday on or before `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// `HH:MM` serde representation for times of day.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parse `HH:MM` or `HH:MM:SS`.
    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn recurring_rule_expands_over_horizon() {
        let rule = ProtectedTimeRule::with_id("lunch", 1, t(12, 0), t(13, 0), true).unwrap();
        let instances: Vec<_> = rule.expand(sunday(), 8).collect();

        assert_eq!(instances.len(), 8);
        assert_eq!(instances[0].id, "no-zone-lunch-week-0");
        assert_eq!(instances[0].start.date_naive(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(instances[7].start.date_naive(), NaiveDate::from_ymd_opt(2026, 12, 7).unwrap());
        assert!(instances.iter().all(|i| i.category == IntervalCategory::Protected));
        assert_eq!(instances[3].origin.as_ref().unwrap().week_offset, 3);
    }

    #[test]
    fn one_off_rule_yields_exactly_one_instance() {
        let rule = ProtectedTimeRule::with_id("x", 5, t(16, 0), t(23, 59), false).unwrap();
        assert_eq!(rule.expand(sunday(), 8).count(), 1);
        assert_eq!(rule.expand(sunday(), 0).count(), 1);
    }

    #[test]
    fn recurring_rule_with_zero_horizon_is_empty() {
        let rule = ProtectedTimeRule::with_id("x", 5, t(16, 0), t(18, 0), true).unwrap();
        assert_eq!(rule.expand(sunday(), 0).count(), 0);
    }

    #[test]
    fn expansion_is_restartable() {
        let rule = ProtectedTimeRule::with_id("x", 2, t(18, 0), t(21, 0), true).unwrap();
        let mut it = rule.expand(sunday(), 3);
        let first = it.next().unwrap();
        let resumed = it.clone();
        assert_eq!(resumed.len(), 2);
        assert_eq!(rule.expand(sunday(), 3).next().unwrap(), first);
    }

    #[test]
    fn invalid_rules_are_rejected() {
        assert!(ProtectedTimeRule::new(7, t(9, 0), t(10, 0), true).is_err());
        assert!(matches!(
            ProtectedTimeRule::new(1, t(10, 0), t(10, 0), true),
            Err(ValidationError::InvalidTimeWindow { .. })
        ));
    }

    #[test]
    fn week_start_is_previous_sunday() {
        let wednesday = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
        assert_eq!(week_start_of(wednesday), sunday());
        assert_eq!(week_start_of(sunday()), sunday());
    }

    #[test]
    fn times_serialize_as_hh_mm() {
        let rule = ProtectedTimeRule::with_id("a", 1, t(12, 0), t(13, 30), true).unwrap();
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["start"], "12:00");
        assert_eq!(json["end"], "13:30");
        let back: ProtectedTimeRule = serde_json::from_value(json).unwrap();
        assert_eq!(back, rule);
    }
}
