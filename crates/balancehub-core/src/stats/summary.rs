use serde::{Deserialize, Serialize};

use super::round_to;
use crate::schedule::{Interval, IntervalCategory};

/// Headline numbers for a set of intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    /// Total work hours, one decimal.
    pub work_hours: f64,
    /// Total personal hours, one decimal.
    pub personal_hours: f64,
    pub meeting_count: usize,
    /// Work hours per personal hour, one decimal. `None` with no personal time.
    pub work_life_ratio: Option<f64>,
}

impl DaySummary {
    pub fn from_intervals(intervals: &[Interval]) -> Self {
        let (work_hours, personal_hours, meeting_count) = totals(intervals);
        Self {
            work_hours: round_to(work_hours, 1),
            personal_hours: round_to(personal_hours, 1),
            meeting_count,
            work_life_ratio: (personal_hours > 0.0).then(|| round_to(work_hours / personal_hours, 1)),
        }
    }
}

/// Raw (work hours, personal hours, work count). Protected blocks are not counted.
pub(crate) fn totals(intervals: &[Interval]) -> (f64, f64, usize) {
    intervals
        .iter()
        .fold((0.0, 0.0, 0), |(work, personal, count), i| match i.category {
            IntervalCategory::Work => (work + i.duration_hours(), personal, count + 1),
            IntervalCategory::Personal => (work, personal + i.duration_hours(), count),
            IntervalCategory::Protected => (work, personal, count),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::IntervalDraft;
    use chrono::{TimeZone, Utc};

    fn block(category: IntervalCategory, (h1, m1): (u32, u32), (h2, m2): (u32, u32)) -> Interval {
        Interval::new(IntervalDraft {
            title: "block".into(),
            start: Utc.with_ymd_and_hms(2026, 10, 19, h1, m1, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 10, 19, h2, m2, 0).unwrap(),
            category,
        })
        .unwrap()
    }

    #[test]
    fn summarizes_mock_day() {
        let day = [
            block(IntervalCategory::Work, (10, 0), (11, 0)),
            block(IntervalCategory::Work, (11, 30), (12, 30)),
            block(IntervalCategory::Work, (14, 0), (16, 0)),
            block(IntervalCategory::Personal, (18, 0), (20, 0)),
            block(IntervalCategory::Protected, (12, 0), (13, 0)),
        ];
        let summary = DaySummary::from_intervals(&day);
        assert_eq!(summary.work_hours, 4.0);
        assert_eq!(summary.personal_hours, 2.0);
        assert_eq!(summary.meeting_count, 3);
        assert_eq!(summary.work_life_ratio, Some(2.0));
    }

    #[test]
    fn ratio_absent_without_personal_time() {
        let day = [block(IntervalCategory::Work, (9, 0), (9, 20))];
        let summary = DaySummary::from_intervals(&day);
        assert_eq!(summary.work_hours, 0.3);
        assert_eq!(summary.work_life_ratio, None);
    }
}
