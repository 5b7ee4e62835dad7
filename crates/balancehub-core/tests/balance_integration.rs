//! Integration tests for the balance scheduler heuristics.

use balancehub_core::balance::{BalancePreferences, BalanceWarning, ConflictDetector};
use balancehub_core::schedule::{Interval, IntervalCategory, IntervalDraft, ProtectedTimeRule};
use balancehub_core::{Config, SessionContext};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use proptest::prelude::*;

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, h, m, 0).unwrap()
}

fn work(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Interval {
    Interval::with_id(
        id,
        IntervalDraft {
            title: id.to_string(),
            start,
            end,
            category: IntervalCategory::Work,
        },
    )
    .unwrap()
}

fn prefs(max_hours: f64, max_events: u32, min_break: f64) -> BalancePreferences {
    BalancePreferences {
        max_consecutive_work_hours: max_hours,
        max_events_per_day: max_events,
        min_break_minutes: min_break,
        ..Default::default()
    }
}

#[test]
fn back_to_back_morning_trips_overload() {
    // 09-11, 11-13, 13:05-14:00 with a 3h limit and 15 min breaks.
    // Nothing resets the run: 2h, then 4h, so the second block trips it.
    let detector = ConflictDetector::new(prefs(3.0, 5, 15.0));
    let day = [
        work("first", at(9, 0), at(11, 0)),
        work("second", at(11, 0), at(13, 0)),
        work("third", at(13, 5), at(14, 0)),
    ];
    let warnings = detector.detect(&day, &[]);

    assert_eq!(warnings.len(), 1);
    match &warnings[0] {
        BalanceWarning::MeetingOverload {
            consecutive_hours,
            interval_id,
        } => {
            assert!(*consecutive_hours >= 3.0);
            assert_eq!(interval_id, "second");
        }
        other => panic!("expected overload, got {other:?}"),
    }
}

#[test]
fn short_gaps_keep_the_run_going() {
    let detector = ConflictDetector::new(prefs(3.0, 5, 15.0));
    let day = [
        work("a", at(9, 0), at(10, 0)),
        work("b", at(10, 0), at(12, 0)),
        work("c", at(12, 5), at(13, 0)),
    ];
    match detector.consecutive_overload(&day) {
        Some(BalanceWarning::MeetingOverload {
            consecutive_hours,
            interval_id,
        }) => {
            assert_eq!(interval_id, "b");
            assert_eq!(consecutive_hours, 3.0);
        }
        other => panic!("expected overload, got {other:?}"),
    }

    let spaced = [
        work("a", at(9, 0), at(10, 0)),
        work("b", at(10, 0), at(11, 30)),
        work("c", at(11, 35), at(12, 30)),
    ];
    match detector.consecutive_overload(&spaced) {
        Some(BalanceWarning::MeetingOverload {
            consecutive_hours,
            interval_id,
        }) => {
            assert_eq!(interval_id, "c");
            assert!((consecutive_hours - (1.0 + 1.5 + 55.0 / 60.0)).abs() < 1e-9);
        }
        other => panic!("expected overload, got {other:?}"),
    }
}

#[test]
fn full_check_reports_all_three_kinds_in_order() {
    let detector = ConflictDetector::new(prefs(2.0, 2, 15.0));
    let lunch = ProtectedTimeRule::with_id(
        "lunch",
        1,
        NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
        false,
    )
    .unwrap();
    let protected: Vec<Interval> = lunch
        .expand(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(), 8)
        .collect();
    let day = [
        work("a", at(9, 0), at(10, 0)),
        work("b", at(10, 0), at(11, 0)),
        work("c", at(12, 30), at(13, 30)),
    ];

    let kinds: Vec<&str> = detector
        .detect(&day, &protected)
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
fn session_week_report_counts_conflicts() {
    let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let mut session = SessionContext::from_config(&Config::default(), sunday);
    session
        .add_interval(IntervalDraft {
            title: "Lunch demo".into(),
            start: at(12, 30),
            end: at(13, 30),
            category: IntervalCategory::Work,
        })
        .unwrap();

    let report = session.weekly_report();
    assert_eq!(report.days[1].no_zone_conflicts, 1);
    assert_eq!(report.totals.meeting_count, 1);
    assert!(!session.check_health().is_empty());
}

prop_compose! {
    fn interval_bounds()(start in 0i64..10_000, len in 1i64..600) -> (i64, i64) {
        (start, start + len)
    }
}

fn minutes(offset: i64) -> DateTime<Utc> {
    at(0, 0) + Duration::minutes(offset)
}

proptest! {
    #[test]
    fn overlap_matches_shared_instant((a0, a1) in interval_bounds(), (b0, b1) in interval_bounds()) {
        let a = work("a", minutes(a0), minutes(a1));
        let b = work("b", minutes(b0), minutes(b1));
        let shares_minute = (a0..a1).any(|m| (b0..b1).contains(&m));
        prop_assert_eq!(a.overlaps(&b), shares_minute);
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn accumulator_resets_exactly_at_min_break(gap in 0i64..60, min_break in 1u32..60) {
        // Two 90 minute blocks against a 3h limit: overload iff no reset.
        let detector = ConflictDetector::new(prefs(3.0, 10, f64::from(min_break)));
        let first = work("a", minutes(0), minutes(90));
        let second = work("b", minutes(90 + gap), minutes(180 + gap));
        let overloaded = detector.consecutive_overload(&[first, second]).is_some();
        prop_assert_eq!(overloaded, gap < i64::from(min_break));
    }
}
