//! Schedule health checks.
//!
//! Three independent passes over a day's intervals:
//! - consecutive work without a long enough break (first violation only)
//! - more work events than the daily limit
//! - work events overlapping protected time
//!
//! All results are advisory [`BalanceWarning`] records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::preferences::BalancePreferences;
use crate::schedule::{Interval, IntervalCategory};

/// How loudly a warning should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Alert,
}

/// Advisory finding from the conflict detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BalanceWarning {
    /// Consecutive work reached the configured limit.
    MeetingOverload {
        consecutive_hours: f64,
        /// The interval that pushed the run over the limit.
        interval_id: String,
    },
    TooManyMeetings { count: usize, limit: u32 },
    /// A work interval intersects a protected interval.
    BoundaryViolation {
        work_id: String,
        work_title: String,
        protected_id: String,
    },
}

impl BalanceWarning {
    pub fn severity(&self) -> Severity {
        match self {
            Self::MeetingOverload { .. } | Self::TooManyMeetings { .. } => Severity::Warning,
            Self::BoundaryViolation { .. } => Severity::Alert,
        }
    }

    /// User-facing notification text.
    pub fn message(&self) -> String {
        match self {
            Self::MeetingOverload {
                consecutive_hours, ..
            } => format!(
                "You will be in meetings for {} hours straight. Consider taking a break!",
                consecutive_hours.round()
            ),
            Self::TooManyMeetings { count, limit } => format!(
                "You've scheduled {count} meetings today, more than your preferred maximum of {limit}."
            ),
            Self::BoundaryViolation { work_title, .. } => format!(
                "You have a meeting scheduled during your protected No-Zone time: {work_title}"
            ),
        }
    }
}

/// Checks intervals against a set of [`BalancePreferences`].
#[derive(Debug, Clone)]
pub struct ConflictDetector {
    prefs: BalancePreferences,
}

impl ConflictDetector {
    pub fn new(prefs: BalancePreferences) -> Self {
        Self { prefs }
    }

    pub fn preferences(&self) -> &BalancePreferences {
        &self.prefs
    }

    /// Run all checks. Output order: overload, too-many, boundary violations.
    pub fn detect(&self, work: &[Interval], protected: &[Interval]) -> Vec<BalanceWarning> {
        let mut warnings = Vec::new();

        if let Some(overload) = self.consecutive_overload(work) {
            warnings.push(overload);
        }
        if let Some(too_many) = self.too_many_meetings(work) {
            warnings.push(too_many);
        }
        warnings.extend(boundary_violations(work, protected));

        for warning in &warnings {
            tracing::debug!(kind = ?warning.severity(), message = %warning.message(), "schedule warning");
        }
        warnings
    }

    /// Partition mixed intervals by category, then [`detect`](Self::detect).
    /// Personal intervals are ignored.
    pub fn check_schedule(&self, intervals: &[Interval]) -> Vec<BalanceWarning> {
        let (work, protected): (Vec<Interval>, Vec<Interval>) = intervals
            .iter()
            .filter(|i| i.category != IntervalCategory::Personal)
            .cloned()
            .partition(Interval::is_work);
        self.detect(&work, &protected)
    }

    /// Check a multi-day schedule. The overload and too-many checks run once
    /// per UTC start day, in date order; boundary violations are checked
    /// across the whole range.
    pub fn check_days(&self, intervals: &[Interval]) -> Vec<BalanceWarning> {
        let mut days: BTreeMap<NaiveDate, Vec<Interval>> = BTreeMap::new();
        let mut work = Vec::new();
        let mut protected = Vec::new();
        for interval in intervals {
            match interval.category {
                IntervalCategory::Work => {
                    days.entry(interval.start.date_naive())
                        .or_default()
                        .push(interval.clone());
                    work.push(interval.clone());
                }
                IntervalCategory::Protected => protected.push(interval.clone()),
                IntervalCategory::Personal => {}
            }
        }

        let mut warnings = Vec::new();
        for (date, day_work) in &days {
            let before = warnings.len();
            warnings.extend(self.consecutive_overload(day_work));
            warnings.extend(self.too_many_meetings(day_work));
            if warnings.len() > before {
                tracing::debug!(%date, found = warnings.len() - before, "day over limits");
            }
        }
        warnings.extend(boundary_violations(&work, &protected));
        warnings
    }

    /// Scan work intervals in start order, stopping at the first run that
    /// reaches `max_consecutive_work_hours`.
    ///
    /// The accumulator resets before an interval whose gap from the previous
    /// end is at least `min_break_minutes`. Back-to-back (0 minute gap) and
    /// overlapping (negative gap) intervals never reset it for a positive
    /// minimum break.
    pub fn consecutive_overload(&self, work: &[Interval]) -> Option<BalanceWarning> {
        let mut sorted: Vec<&Interval> = work.iter().collect();
        sorted.sort_by_key(|i| i.start);

        let mut accumulated = 0.0;
        let mut previous: Option<&Interval> = None;
        for interval in sorted {
            if let Some(prev) = previous {
                let gap_minutes = (interval.start - prev.end).num_milliseconds() as f64 / 60_000.0;
                if gap_minutes >= self.prefs.min_break_minutes {
                    accumulated = 0.0;
                }
            }
            accumulated += interval.duration_hours();

            if accumulated >= self.prefs.max_consecutive_work_hours {
                return Some(BalanceWarning::MeetingOverload {
                    consecutive_hours: accumulated,
                    interval_id: interval.id.clone(),
                });
            }
            previous = Some(interval);
        }
        None
    }

    pub fn too_many_meetings(&self, work: &[Interval]) -> Option<BalanceWarning> {
        let count = work.len();
        (count > self.prefs.max_events_per_day as usize).then(|| BalanceWarning::TooManyMeetings {
            count,
            limit: self.prefs.max_events_per_day,
        })
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new(BalancePreferences::default())
    }
}

/// Every (work, protected) pair whose ranges intersect, in input order.
pub fn boundary_violations(work: &[Interval], protected: &[Interval]) -> Vec<BalanceWarning> {
    work.iter()
        .flat_map(|w| {
            protected
                .iter()
                .filter(move |p| w.overlaps(p))
                .map(move |p| BalanceWarning::BoundaryViolation {
                    work_id: w.id.clone(),
                    work_title: w.title.clone(),
                    protected_id: p.id.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::IntervalDraft;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, h, m, 0).unwrap()
    }

    fn block(id: &str, category: IntervalCategory, start: DateTime<Utc>, end: DateTime<Utc>) -> Interval {
        Interval::with_id(
            id,
            IntervalDraft {
                title: format!("{id} title"),
                start,
                end,
                category,
            },
        )
        .unwrap()
    }

    fn work(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Interval {
        block(id, IntervalCategory::Work, start, end)
    }

    fn detector(max_hours: f64, max_events: u32, min_break: f64) -> ConflictDetector {
        ConflictDetector::new(BalancePreferences {
            max_consecutive_work_hours: max_hours,
            max_events_per_day: max_events,
            min_break_minutes: min_break,
            ..Default::default()
        })
    }

    #[test]
    fn gap_equal_to_min_break_resets() {
        let d = detector(3.0, 10, 15.0);
        let events = [work("a", at(9, 0), at(11, 0)), work("b", at(11, 15), at(12, 30))];
        assert!(d.consecutive_overload(&events).is_none());
    }

    #[test]
    fn gap_just_below_min_break_does_not_reset() {
        let d = detector(3.0, 10, 15.0);
        let events = [work("a", at(9, 0), at(11, 0)), work("b", at(11, 14), at(12, 14))];
        let warning = d.consecutive_overload(&events).unwrap();
        assert_eq!(
            warning,
            BalanceWarning::MeetingOverload {
                consecutive_hours: 3.0,
                interval_id: "b".to_string()
            }
        );
    }

    #[test]
    fn back_to_back_counts_as_consecutive() {
        let d = detector(2.0, 10, 15.0);
        let events = [work("a", at(9, 0), at(10, 0)), work("b", at(10, 0), at(11, 0))];
        assert!(matches!(
            d.consecutive_overload(&events),
            Some(BalanceWarning::MeetingOverload { .. })
        ));
    }

    #[test]
    fn zero_min_break_resets_on_adjacent_intervals() {
        let d = detector(2.0, 10, 0.0);
        let events = [work("a", at(9, 0), at(10, 0)), work("b", at(10, 0), at(11, 0))];
        assert!(d.consecutive_overload(&events).is_none());
    }

    #[test]
    fn scan_sorts_input_and_stops_at_first_violation() {
        let d = detector(1.0, 10, 15.0);
        let events = [
            work("late", at(15, 0), at(17, 0)),
            work("early", at(9, 0), at(10, 30)),
        ];
        let warnings = d.detect(&events, &[]);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            BalanceWarning::MeetingOverload { interval_id, .. } if interval_id == "early"
        ));
    }

    #[test]
    fn too_many_meetings_only_above_limit() {
        let d = detector(10.0, 2, 15.0);
        let two = [work("a", at(9, 0), at(9, 30)), work("b", at(10, 0), at(10, 30))];
        assert!(d.too_many_meetings(&two).is_none());

        let three = [
            work("a", at(9, 0), at(9, 30)),
            work("b", at(10, 0), at(10, 30)),
            work("c", at(11, 0), at(11, 30)),
        ];
        assert_eq!(
            d.too_many_meetings(&three),
            Some(BalanceWarning::TooManyMeetings { count: 3, limit: 2 })
        );
    }

    #[test]
    fn boundary_violation_per_overlapping_pair() {
        let lunch = block("lunch", IntervalCategory::Protected, at(12, 0), at(13, 0));
        let evening = block("evening", IntervalCategory::Protected, at(18, 0), at(21, 0));
        let events = [
            work("touching", at(11, 0), at(12, 0)),
            work("inside", at(12, 15), at(12, 45)),
            work("spanning", at(11, 30), at(19, 0)),
        ];
        let warnings = boundary_violations(&events, &[lunch, evening]);
        let pairs: Vec<(&str, &str)> = warnings
            .iter()
            .map(|w| match w {
                BalanceWarning::BoundaryViolation {
                    work_id,
                    protected_id,
                    ..
                } => (work_id.as_str(), protected_id.as_str()),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            pairs,
            vec![("inside", "lunch"), ("spanning", "lunch"), ("spanning", "evening")]
        );
        assert!(warnings.iter().all(|w| w.severity() == Severity::Alert));
    }

    #[test]
    fn check_schedule_ignores_personal_blocks() {
        let d = detector(1.0, 1, 15.0);
        let intervals = [
            block("family", IntervalCategory::Personal, at(12, 0), at(14, 0)),
            work("call", at(9, 0), at(9, 30)),
        ];
        assert!(d.check_schedule(&intervals).is_empty());
    }

    #[test]
    fn check_days_counts_meetings_per_day() {
        let d = detector(3.0, 5, 15.0);
        let day = |n: u32, h: u32| Utc.with_ymd_and_hms(2026, 10, 19 + n, h, 0, 0).unwrap();
        let mut spread = Vec::new();
        for n in 0..3 {
            spread.push(work(&format!("am-{n}"), day(n, 9), day(n, 9) + chrono::Duration::minutes(30)));
            spread.push(work(&format!("pm-{n}"), day(n, 14), day(n, 14) + chrono::Duration::minutes(30)));
        }
        assert!(d.check_days(&spread).is_empty());

        let packed: Vec<Interval> = (0..6)
            .map(|h| work(&format!("m{h}"), day(0, 9 + h), day(0, 9 + h) + chrono::Duration::minutes(30)))
            .collect();
        assert_eq!(
            d.check_days(&packed),
            vec![BalanceWarning::TooManyMeetings { count: 6, limit: 5 }]
        );
    }

    #[test]
    fn check_days_runs_overload_separately_per_day() {
        let d = detector(3.0, 10, 15.0);
        let late = work("late", at(22, 0), at(23, 59));
        let next_morning = work(
            "early",
            Utc.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 20, 2, 0, 0).unwrap(),
        );
        assert!(d.check_days(&[late.clone(), next_morning.clone()]).is_empty());
        assert_eq!(d.check_schedule(&[late, next_morning]).len(), 1);
    }

    #[test]
    fn check_days_reports_days_in_order_then_boundaries() {
        let d = detector(2.0, 1, 15.0);
        let tue = |h: u32| Utc.with_ymd_and_hms(2026, 10, 20, h, 0, 0).unwrap();
        let intervals = [
            work("tue-a", tue(9), tue(10)),
            work("tue-b", tue(10), tue(11)),
            work("mon", at(12, 0), at(12, 30)),
            block("lunch", IntervalCategory::Protected, at(12, 0), at(13, 0)),
        ];
        let kinds: Vec<&str> = d
            .check_days(&intervals)
            .iter()
            .map(|w| match w {
                BalanceWarning::MeetingOverload { .. } => "overload",
                BalanceWarning::TooManyMeetings { .. } => "too-many",
                BalanceWarning::BoundaryViolation { .. } => "boundary",
            })
            .collect();
        assert_eq!(kinds, vec!["overload", "too-many", "boundary"]);
    }

    #[test]
    fn warnings_serialize_with_kebab_case_kind() {
        let json = serde_json::to_value(BalanceWarning::TooManyMeetings { count: 6, limit: 5 }).unwrap();
        assert_eq!(json["kind"], "too-many-meetings");
    }

    #[test]
    fn messages_match_notifications() {
        let overload = BalanceWarning::MeetingOverload {
            consecutive_hours: 3.6,
            interval_id: "x".into(),
        };
        assert_eq!(
            overload.message(),
            "You will be in meetings for 4 hours straight. Consider taking a break!"
        );
    }
}
