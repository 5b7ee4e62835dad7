//! In-memory session state.
//!
//! [`SessionContext`] is the single owner of everything a user builds up
//! while using the dashboards: calendar intervals, protected-time rules and
//! the instances generated from them, the mentoring directory, the career
//! and networking dashboards, preferences and the signed-in identity. Detector and matcher are called with
//! references into this state; nothing is cached between calls.

use chrono::{Datelike, Duration, NaiveDate};

use crate::balance::{BalancePreferences, BalanceWarning, ConflictDetector};
use crate::career::CareerTracker;
use crate::error::{CoreError, Result, ValidationError};
use crate::identity::{Identity, IdentitySource};
use crate::mentoring::{sample_directory, Match, MentorMatcher, Profile, ProfileDraft};
use crate::networking::NetworkingHub;
use crate::schedule::{
    expand_rules, week_start_of, Interval, IntervalCategory, IntervalDraft, IntervalEdit,
    ProtectedTimeRule, DEFAULT_HORIZON_WEEKS,
};
use crate::stats::{DaySummary, WeeklyReport};
use crate::storage::Config;

/// Name given to profiles registered while signed out.
pub const ANONYMOUS_NAME: &str = "Current User";

#[derive(Debug, Clone)]
pub struct SessionContext {
    preferences: BalancePreferences,
    horizon_weeks: u32,
    week_start: NaiveDate,
    intervals: Vec<Interval>,
    rules: Vec<ProtectedTimeRule>,
    protected: Vec<Interval>,
    profiles: Vec<Profile>,
    matcher: MentorMatcher,
    career: CareerTracker,
    networking: NetworkingHub,
    identity: Option<Identity>,
}

impl SessionContext {
    /// Empty session anchored on `week_start` (the Sunday of week 0).
    pub fn new(week_start: NaiveDate) -> Self {
        Self {
            preferences: BalancePreferences::default(),
            horizon_weeks: DEFAULT_HORIZON_WEEKS,
            week_start,
            intervals: Vec::new(),
            rules: Vec::new(),
            protected: Vec::new(),
            profiles: Vec::new(),
            matcher: MentorMatcher::new(),
            career: CareerTracker::new(),
            networking: NetworkingHub::new(),
            identity: None,
        }
    }

    /// Session seeded from configuration and the starter mentoring directory,
    /// career dashboard and networking feed.
    pub fn from_config(config: &Config, week_start: NaiveDate) -> Self {
        let mut session = Self::new(week_start);
        session.preferences = config.balance.clone();
        session.horizon_weeks = config.protection.horizon_weeks;
        session.rules = config.protection.rules.clone();
        session.matcher = MentorMatcher::new().with_max_matches(config.matching.max_matches);
        session.profiles = sample_directory();
        session.career = CareerTracker::sample();
        session.networking = NetworkingHub::sample();
        session.regenerate_protected();
        session
    }

    /// Replace the career dashboard, e.g. with saved state.
    pub fn with_career(mut self, career: CareerTracker) -> Self {
        self.career = career;
        self
    }

    /// Replace the networking feed, e.g. with saved state.
    pub fn with_networking(mut self, networking: NetworkingHub) -> Self {
        self.networking = networking;
        self
    }

    // ── Preferences and anchor ───────────────────────────────────────

    pub fn preferences(&self) -> &BalancePreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: BalancePreferences) -> Result<()> {
        preferences.validate()?;
        self.preferences = preferences;
        Ok(())
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn horizon_weeks(&self) -> u32 {
        self.horizon_weeks
    }

    /// Move the expansion window and regenerate protected instances.
    pub fn set_week_start(&mut self, week_start: NaiveDate) {
        self.week_start = week_start;
        self.regenerate_protected();
    }

    // ── Identity ─────────────────────────────────────────────────────

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn sign_in(&mut self, identity: Identity) {
        tracing::info!(uid = %identity.uid, "signed in");
        self.identity = Some(identity);
    }

    pub fn sign_out(&mut self) {
        self.identity = None;
    }

    /// Pull the current identity from the provider.
    pub fn sync_identity(&mut self, source: &dyn IdentitySource) {
        self.identity = source.current();
    }

    // ── Intervals ────────────────────────────────────────────────────

    /// User intervals followed by generated protected intervals.
    pub fn intervals(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter().chain(self.protected.iter())
    }

    /// Intervals starting on `date` (UTC).
    pub fn intervals_on(&self, date: NaiveDate) -> Vec<Interval> {
        self.intervals()
            .filter(|i| i.start.date_naive() == date)
            .cloned()
            .collect()
    }

    pub fn interval(&self, id: &str) -> Option<&Interval> {
        self.intervals().find(|i| i.id == id)
    }

    pub fn add_interval(&mut self, draft: IntervalDraft) -> Result<&Interval> {
        let interval = Interval::new(draft)?;
        tracing::info!(id = %interval.id, category = ?interval.category, "interval added");
        self.intervals.push(interval);
        Ok(&self.intervals[self.intervals.len() - 1])
    }

    /// Edit an interval. Editing a generated protected instance rewrites
    /// its rule from the edited times and regenerates every instance; the
    /// edited instance must stay within its own week and on a single day.
    pub fn edit_interval(&mut self, id: &str, edit: IntervalEdit) -> Result<&Interval> {
        if let Some(pos) = self.intervals.iter().position(|i| i.id == id) {
            self.intervals[pos].edit(edit)?;
            return Ok(&self.intervals[pos]);
        }

        let instance = self
            .protected
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("interval", id))?;
        if edit.category.is_some_and(|c| c != IntervalCategory::Protected) {
            return Err(ValidationError::InvalidValue {
                field: "category".to_string(),
                message: "generated no-zone blocks stay protected".to_string(),
            }
            .into());
        }

        let mut edited = instance.clone();
        edited.edit(edit)?;
        let Some(origin) = instance.origin else {
            return Err(CoreError::not_found("interval", id));
        };
        let own_week = self.week_start + Duration::weeks(i64::from(origin.week_offset));
        if week_start_of(edited.start.date_naive()) != own_week {
            return Err(ValidationError::InvalidValue {
                field: "start".to_string(),
                message: format!("no-zone instances can only move within the week of {own_week}"),
            }
            .into());
        }
        if edited.end.date_naive() != edited.start.date_naive() {
            return Err(ValidationError::InvalidValue {
                field: "end".to_string(),
                message: "no-zone instances must end on the day they start".to_string(),
            }
            .into());
        }

        let rule_pos = self
            .rules
            .iter()
            .position(|r| r.id == origin.rule_id)
            .ok_or_else(|| CoreError::not_found("protected rule", origin.rule_id.clone()))?;
        let mut rule = self.rules[rule_pos].clone();
        rule.day_of_week = edited.start.weekday().num_days_from_sunday() as u8;
        rule.start = edited.start.time();
        rule.end = edited.end.time();
        rule.validate()?;

        tracing::info!(rule = %rule.id, "protected rule updated from edited instance");
        self.rules[rule_pos] = rule;
        self.regenerate_protected();
        self.interval(id)
            .ok_or_else(|| CoreError::not_found("interval", id))
    }

    /// Delete an interval. Deleting a generated protected instance removes
    /// its rule and every instance of it.
    pub fn delete_interval(&mut self, id: &str) -> Result<Interval> {
        if let Some(pos) = self.intervals.iter().position(|i| i.id == id) {
            tracing::info!(id, "interval deleted");
            return Ok(self.intervals.remove(pos));
        }

        let instance = self
            .protected
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("interval", id))?;
        if let Some(origin) = &instance.origin {
            self.remove_protected_rule(&origin.rule_id)?;
        }
        Ok(instance)
    }

    // ── Protected rules ──────────────────────────────────────────────

    pub fn rules(&self) -> &[ProtectedTimeRule] {
        &self.rules
    }

    pub fn protected_intervals(&self) -> &[Interval] {
        &self.protected
    }

    pub fn add_protected_rule(&mut self, rule: ProtectedTimeRule) -> Result<&ProtectedTimeRule> {
        rule.validate()?;
        tracing::info!(rule = %rule.id, day = rule.day_of_week, "protected rule added");
        self.rules.push(rule);
        self.regenerate_protected();
        Ok(&self.rules[self.rules.len() - 1])
    }

    pub fn remove_protected_rule(&mut self, rule_id: &str) -> Result<ProtectedTimeRule> {
        let pos = self
            .rules
            .iter()
            .position(|r| r.id == rule_id)
            .ok_or_else(|| CoreError::not_found("protected rule", rule_id))?;
        let rule = self.rules.remove(pos);
        tracing::info!(rule = %rule.id, "protected rule removed");
        self.regenerate_protected();
        Ok(rule)
    }

    fn regenerate_protected(&mut self) {
        self.protected = expand_rules(&self.rules, self.week_start, self.horizon_weeks);
        tracing::debug!(
            rules = self.rules.len(),
            instances = self.protected.len(),
            "protected intervals regenerated"
        );
    }

    // ── Balance checks and stats ─────────────────────────────────────

    fn detector(&self) -> ConflictDetector {
        ConflictDetector::new(self.preferences.clone())
    }

    /// Check every interval in the session, one day at a time.
    pub fn check_health(&self) -> Vec<BalanceWarning> {
        let all: Vec<Interval> = self.intervals().cloned().collect();
        self.detector().check_days(&all)
    }

    /// Check only the intervals that start on `date`.
    pub fn check_day(&self, date: NaiveDate) -> Vec<BalanceWarning> {
        self.detector().check_schedule(&self.intervals_on(date))
    }

    pub fn daily_summary(&self, date: NaiveDate) -> DaySummary {
        DaySummary::from_intervals(&self.intervals_on(date))
    }

    /// Seven days from the anchored week start.
    pub fn weekly_report(&self) -> WeeklyReport {
        let all: Vec<Interval> = self.intervals().cloned().collect();
        WeeklyReport::build(&all, self.week_start)
    }

    // ── Mentoring ────────────────────────────────────────────────────

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Add a profile from form input, named after the signed-in user.
    pub fn register_profile(&mut self, draft: &ProfileDraft) -> Result<&Profile> {
        let id = format!("user-{}", self.profiles.len() + 1);
        let name = self
            .identity
            .as_ref()
            .and_then(|i| i.display_name.clone())
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string());
        let profile = Profile::from_draft(id, name, draft)?;
        tracing::info!(id = %profile.id, role = ?profile.role(), "profile registered");
        self.profiles.push(profile);
        Ok(&self.profiles[self.profiles.len() - 1])
    }

    /// Ranked mentors for the profile with `profile_id`.
    pub fn find_matches(&self, profile_id: &str) -> Result<Vec<Match<'_>>> {
        let mentee = self
            .profile(profile_id)
            .ok_or_else(|| CoreError::not_found("profile", profile_id))?;
        Ok(self.matcher.rank(mentee, &self.profiles))
    }

    // ── Career and networking ────────────────────────────────────────

    pub fn career(&self) -> &CareerTracker {
        &self.career
    }

    pub fn career_mut(&mut self) -> &mut CareerTracker {
        &mut self.career
    }

    pub fn networking(&self) -> &NetworkingHub {
        &self.networking
    }

    pub fn networking_mut(&mut self) -> &mut NetworkingHub {
        &mut self.networking
    }
}
