use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::round_to;
use super::summary::totals;
use crate::balance::boundary_violations;
use crate::schedule::Interval;

/// One row of the weekly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub work_hours: f64,
    pub personal_hours: f64,
    pub meeting_count: usize,
    /// Work/protected overlaps among intervals starting this day.
    pub no_zone_conflicts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTotals {
    pub work_hours: f64,
    pub personal_hours: f64,
    pub meeting_count: usize,
    pub no_zone_conflicts: usize,
    /// Two decimals; `None` with no personal time.
    pub work_life_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub days: Vec<DailyStats>,
    pub totals: WeeklyTotals,
}

impl WeeklyReport {
    /// Build a seven day report starting at `first_day`.
    ///
    /// Intervals are assigned to the UTC date they start on.
    pub fn build(intervals: &[Interval], first_day: NaiveDate) -> Self {
        let days: Vec<DailyStats> = (0..7)
            .map(|offset| daily(intervals, first_day + Duration::days(offset)))
            .collect();

        let work_hours: f64 = days.iter().map(|d| d.work_hours).sum();
        let personal_hours: f64 = days.iter().map(|d| d.personal_hours).sum();
        let totals = WeeklyTotals {
            work_hours: round_to(work_hours, 2),
            personal_hours: round_to(personal_hours, 2),
            meeting_count: days.iter().map(|d| d.meeting_count).sum(),
            no_zone_conflicts: days.iter().map(|d| d.no_zone_conflicts).sum(),
            work_life_ratio: (personal_hours > 0.0)
                .then(|| round_to(work_hours / personal_hours, 2)),
        };

        Self { days, totals }
    }
}

fn daily(intervals: &[Interval], date: NaiveDate) -> DailyStats {
    let on_day: Vec<Interval> = intervals
        .iter()
        .filter(|i| i.start.date_naive() == date)
        .cloned()
        .collect();
    let (work_hours, personal_hours, meeting_count) = totals(&on_day);

    let work: Vec<Interval> = on_day.iter().filter(|i| i.is_work()).cloned().collect();
    let protected: Vec<Interval> = on_day.iter().filter(|i| i.is_protected()).cloned().collect();

    DailyStats {
        date,
        work_hours: round_to(work_hours, 2),
        personal_hours: round_to(personal_hours, 2),
        meeting_count,
        no_zone_conflicts: boundary_violations(&work, &protected).len(),
    }
}
