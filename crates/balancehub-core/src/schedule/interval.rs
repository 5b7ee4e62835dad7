//! Time-bounded calendar entries.
//!
//! An [`Interval`] is a work meeting, a personal block, or a protected
//! "no-zone" block. Construction and edits both enforce `start < end`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Category of a calendar interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalCategory {
    Work,
    Personal,
    /// No-zone time the user wants kept free of work.
    #[serde(alias = "no-zone", alias = "no_zone")]
    Protected,
}

/// Where a generated protected interval came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOrigin {
    pub rule_id: String,
    pub week_offset: u32,
}

/// A calendar entry with a half-open `[start, end)` range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub category: IntervalCategory,
    /// Set only on intervals expanded from a protected-time rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<RuleOrigin>,
}

/// Fields supplied by the user when creating an interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalDraft {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub category: IntervalCategory,
}

/// Partial update applied by [`Interval::edit`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntervalEdit {
    pub title: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub category: Option<IntervalCategory>,
}

fn validate(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingField("title"));
    }
    if end <= start {
        return Err(ValidationError::InvalidTimeRange { start, end });
    }
    Ok(())
}

impl Interval {
    /// Create a validated interval with a fresh id.
    pub fn new(draft: IntervalDraft) -> Result<Self, ValidationError> {
        Self::with_id(uuid::Uuid::new_v4().to_string(), draft)
    }

    /// Create a validated interval with a caller-chosen id.
    pub fn with_id(id: impl Into<String>, draft: IntervalDraft) -> Result<Self, ValidationError> {
        validate(&draft.title, draft.start, draft.end)?;
        Ok(Self {
            id: id.into(),
            title: draft.title.trim().to_string(),
            start: draft.start,
            end: draft.end,
            category: draft.category,
            origin: None,
        })
    }

    /// Apply an edit. On validation failure `self` is left unchanged.
    pub fn edit(&mut self, edit: IntervalEdit) -> Result<(), ValidationError> {
        let title = edit.title.unwrap_or_else(|| self.title.clone());
        let start = edit.start.unwrap_or(self.start);
        let end = edit.end.unwrap_or(self.end);
        validate(&title, start, end)?;

        self.title = title.trim().to_string();
        self.start = start;
        self.end = end;
        if let Some(category) = edit.category {
            self.category = category;
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Duration in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 3_600_000.0
    }

    /// Half-open overlap test.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.overlaps_range(other.start, other.end)
    }

    pub fn overlaps_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && self.end > start
    }

    pub fn is_work(&self) -> bool {
        self.category == IntervalCategory::Work
    }

    pub fn is_protected(&self) -> bool {
        self.category == IntervalCategory::Protected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, h, m, 0).unwrap()
    }

    fn draft(start: DateTime<Utc>, end: DateTime<Utc>) -> IntervalDraft {
        IntervalDraft {
            title: "Standup".to_string(),
            start,
            end,
            category: IntervalCategory::Work,
        }
    }

    #[test]
    fn new_rejects_zero_duration() {
        let err = Interval::new(draft(at(9, 0), at(9, 0))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimeRange { .. }));
    }

    #[test]
    fn new_rejects_blank_title() {
        let mut d = draft(at(9, 0), at(10, 0));
        d.title = "   ".to_string();
        assert_eq!(
            Interval::new(d).unwrap_err(),
            ValidationError::MissingField("title")
        );
    }

    #[test]
    fn failed_edit_leaves_interval_untouched() {
        let mut interval = Interval::with_id("a", draft(at(9, 0), at(10, 0))).unwrap();
        let before = interval.clone();
        let result = interval.edit(IntervalEdit {
            end: Some(at(8, 0)),
            title: Some("Moved".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(interval, before);
    }

    #[test]
    fn edit_updates_fields() {
        let mut interval = Interval::with_id("a", draft(at(9, 0), at(10, 0))).unwrap();
        interval
            .edit(IntervalEdit {
                end: Some(at(10, 30)),
                category: Some(IntervalCategory::Personal),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(interval.end, at(10, 30));
        assert_eq!(interval.category, IntervalCategory::Personal);
        assert!((interval.duration_hours() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn overlap_is_half_open() {
        let a = Interval::with_id("a", draft(at(9, 0), at(10, 0))).unwrap();
        let touching = Interval::with_id("b", draft(at(10, 0), at(11, 0))).unwrap();
        let disjoint = Interval::with_id("c", draft(at(11, 0), at(12, 0))).unwrap();
        let nested = Interval::with_id("d", draft(at(9, 15), at(9, 45))).unwrap();

        assert!(!a.overlaps(&touching));
        assert!(!touching.overlaps(&a));
        assert!(!a.overlaps(&disjoint));
        assert!(a.overlaps(&nested));
        assert!(nested.overlaps(&a));
    }

    #[test]
    fn category_accepts_no_zone_alias() {
        let parsed: IntervalCategory = serde_json::from_str("\"no-zone\"").unwrap();
        assert_eq!(parsed, IntervalCategory::Protected);
    }
}
