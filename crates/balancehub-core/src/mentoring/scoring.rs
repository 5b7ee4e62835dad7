//! Mentor compatibility scoring.
//!
//! | Term | Points |
//! |------|--------|
//! | Skill overlap (shared / larger set) | up to 30 |
//! | Goal overlap (shared / larger set) | up to 30 |
//! | Junior mentee with senior or mid-level mentor | 40 |

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::profile::{Profile, Role};

pub const SKILL_WEIGHT: f64 = 30.0;
pub const GOAL_WEIGHT: f64 = 30.0;
pub const LIFE_STAGE_BONUS: f64 = 40.0;
pub const DEFAULT_MAX_MATCHES: usize = 4;

/// Per-term contributions behind a compatibility score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityBreakdown {
    /// 0.0 to 1.0
    pub skill_overlap: f64,
    /// 0.0 to 1.0
    pub goal_overlap: f64,
    /// 0 or [`LIFE_STAGE_BONUS`]
    pub life_stage_bonus: f64,
    /// Rounded total, 0 to 100
    pub score: u8,
}

/// Score `mentor` for `mentee`.
pub fn compatibility(mentee: &Profile, mentor: &Profile) -> CompatibilityBreakdown {
    let skill_overlap = overlap_ratio(&mentee.skills, &mentor.skills);
    let goal_overlap = overlap_ratio(&mentee.goals, &mentor.goals);
    let life_stage_bonus = if life_stage_fits(&mentee.life_stage, &mentor.life_stage) {
        LIFE_STAGE_BONUS
    } else {
        0.0
    };

    let raw = skill_overlap * SKILL_WEIGHT + goal_overlap * GOAL_WEIGHT + life_stage_bonus;
    CompatibilityBreakdown {
        skill_overlap,
        goal_overlap,
        life_stage_bonus,
        score: raw.round().clamp(0.0, 100.0) as u8,
    }
}

/// Case-insensitive set intersection over the larger set's size.
/// Two empty sets give 0.
pub fn overlap_ratio(a: &[String], b: &[String]) -> f64 {
    let a = normalized(a);
    let b = normalized(b);
    let larger = a.len().max(b.len());
    if larger == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / larger as f64
}

fn normalized(labels: &[String]) -> BTreeSet<String> {
    labels
        .iter()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect()
}

fn life_stage_fits(mentee: &str, mentor: &str) -> bool {
    let mentee = mentee.to_lowercase();
    let mentor = mentor.to_lowercase();
    mentee.contains("junior") && (mentor.contains("senior") || mentor.contains("mid-level"))
}

/// A ranked mentor for a mentee.
#[derive(Debug, Clone, Serialize)]
pub struct Match<'a> {
    pub mentor: &'a Profile,
    pub mentee: &'a Profile,
    pub score: u8,
    pub breakdown: CompatibilityBreakdown,
}

/// Ranks candidate mentors for a mentee.
#[derive(Debug, Clone)]
pub struct MentorMatcher {
    max_matches: usize,
}

impl MentorMatcher {
    pub fn new() -> Self {
        Self {
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }

    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    /// Score every mentor in `candidates` other than the mentee itself.
    ///
    /// Keeps scores above zero, sorted descending with ties in candidate
    /// order, truncated to the match limit. A mentee profile whose role is
    /// not [`Role::Mentee`] gets no matches.
    pub fn rank<'a>(&self, mentee: &'a Profile, candidates: &'a [Profile]) -> Vec<Match<'a>> {
        if mentee.role() != Role::Mentee {
            return Vec::new();
        }

        let mut matches: Vec<Match<'a>> = candidates
            .iter()
            .filter(|c| c.role() == Role::Mentor && c.id != mentee.id)
            .map(|mentor| {
                let breakdown = compatibility(mentee, mentor);
                Match {
                    mentor,
                    mentee,
                    score: breakdown.score,
                    breakdown,
                }
            })
            .filter(|m| m.score > 0)
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(self.max_matches);

        tracing::debug!(
            mentee = %mentee.id,
            candidates = candidates.len(),
            matched = matches.len(),
            "ranked mentors"
        );
        matches
    }
}

impl Default for MentorMatcher {
    fn default() -> Self {
        Self::new()
    }
}
