//! Schedule statistics computed from real intervals.
//!
//! - [`DaySummary`]: hours per category and the work-life ratio
//! - [`WeeklyReport`]: seven daily rows plus totals, including no-zone conflicts

mod summary;
mod weekly;

pub use summary::DaySummary;
pub use weekly::{DailyStats, WeeklyReport, WeeklyTotals};

/// Round to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
