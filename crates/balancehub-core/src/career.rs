//! Career growth dashboard.
//!
//! Three lists the user curates by hand: skills with a 0-100 level,
//! certifications and goals that can be ticked off. [`CareerTracker::progress`]
//! rolls them up into the overview shown at the top of the dashboard.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationError};

pub const MAX_SKILL_LEVEL: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub description: String,
    pub completed: bool,
}

/// Rolled-up numbers for the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressOverview {
    /// Mean skill level rounded to the nearest integer; 0 with no skills.
    pub average_skill_level: u8,
    pub completed_certifications: usize,
    pub total_certifications: usize,
    pub completed_goals: usize,
    pub total_goals: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerTracker {
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    certifications: Vec<Certification>,
    #[serde(default)]
    goals: Vec<Goal>,
}

fn required(text: &str, field: &'static str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingField(field).into());
    }
    Ok(text.to_string())
}

fn check_level(level: u8) -> Result<u8> {
    if level > MAX_SKILL_LEVEL {
        return Err(ValidationError::InvalidValue {
            field: "level".to_string(),
            message: format!("must be between 0 and {MAX_SKILL_LEVEL}, got {level}"),
        }
        .into());
    }
    Ok(level)
}

/// `{prefix}-{len+1}`, bumped past any id still in use.
fn next_id<'a>(prefix: &str, taken: impl Iterator<Item = &'a str> + Clone) -> String {
    let mut n = taken.clone().count() + 1;
    loop {
        let id = format!("{prefix}-{n}");
        if !taken.clone().any(|t| t == id) {
            return id;
        }
        n += 1;
    }
}

impl CareerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The starter dashboard a new user sees.
    pub fn sample() -> Self {
        let skill = |id: &str, name: &str, level| Skill {
            id: id.into(),
            name: name.into(),
            level,
        };
        let cert = |id: &str, name: &str, completed| Certification {
            id: id.into(),
            name: name.into(),
            completed,
        };
        let goal = |id: &str, description: &str, completed| Goal {
            id: id.into(),
            description: description.into(),
            completed,
        };
        Self {
            skills: vec![
                skill("skill-1", "Python", 60),
                skill("skill-2", "SQL", 40),
                skill("skill-3", "JavaScript", 75),
            ],
            certifications: vec![
                cert("cert-1", "AWS Certified Developer", false),
                cert("cert-2", "Google UX Design Certificate", true),
                cert("cert-3", "Microsoft Azure Fundamentals", false),
            ],
            goals: vec![
                goal("goal-1", "Complete a Python project by end of month", false),
                goal("goal-2", "Learn React basics in 2 weeks", true),
                goal("goal-3", "Attend a tech conference this quarter", false),
            ],
        }
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn certifications(&self) -> &[Certification] {
        &self.certifications
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    // ── Skills ───────────────────────────────────────────────────────

    pub fn add_skill(&mut self, name: &str, level: u8) -> Result<&Skill> {
        let name = required(name, "name")?;
        let level = check_level(level)?;
        let id = next_id("skill", self.skills.iter().map(|s| s.id.as_str()));
        tracing::info!(%id, level, "skill added");
        self.skills.push(Skill { id, name, level });
        Ok(&self.skills[self.skills.len() - 1])
    }

    /// Replace a skill's name and level.
    pub fn edit_skill(&mut self, id: &str, name: &str, level: u8) -> Result<&Skill> {
        let name = required(name, "name")?;
        let level = check_level(level)?;
        let skill = self
            .skills
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::not_found("skill", id))?;
        skill.name = name;
        skill.level = level;
        Ok(&*skill)
    }

    pub fn delete_skill(&mut self, id: &str) -> Result<Skill> {
        let pos = self
            .skills
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::not_found("skill", id))?;
        Ok(self.skills.remove(pos))
    }

    // ── Certifications ───────────────────────────────────────────────

    pub fn add_certification(&mut self, name: &str) -> Result<&Certification> {
        let name = required(name, "name")?;
        let id = next_id("cert", self.certifications.iter().map(|c| c.id.as_str()));
        tracing::info!(%id, "certification added");
        self.certifications.push(Certification {
            id,
            name,
            completed: false,
        });
        Ok(&self.certifications[self.certifications.len() - 1])
    }

    pub fn rename_certification(&mut self, id: &str, name: &str) -> Result<&Certification> {
        let name = required(name, "name")?;
        let cert = self.certification_mut(id)?;
        cert.name = name;
        Ok(&*cert)
    }

    /// Flip the completed flag; returns the new state.
    pub fn toggle_certification(&mut self, id: &str) -> Result<bool> {
        let cert = self.certification_mut(id)?;
        cert.completed = !cert.completed;
        Ok(cert.completed)
    }

    pub fn delete_certification(&mut self, id: &str) -> Result<Certification> {
        let pos = self
            .certifications
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::not_found("certification", id))?;
        Ok(self.certifications.remove(pos))
    }

    fn certification_mut(&mut self, id: &str) -> Result<&mut Certification> {
        self.certifications
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::not_found("certification", id))
    }

    // ── Goals ────────────────────────────────────────────────────────

    pub fn add_goal(&mut self, description: &str) -> Result<&Goal> {
        let description = required(description, "description")?;
        let id = next_id("goal", self.goals.iter().map(|g| g.id.as_str()));
        tracing::info!(%id, "goal added");
        self.goals.push(Goal {
            id,
            description,
            completed: false,
        });
        Ok(&self.goals[self.goals.len() - 1])
    }

    pub fn rename_goal(&mut self, id: &str, description: &str) -> Result<&Goal> {
        let description = required(description, "description")?;
        let goal = self.goal_mut(id)?;
        goal.description = description;
        Ok(&*goal)
    }

    /// Flip the completed flag; returns the new state.
    pub fn toggle_goal(&mut self, id: &str) -> Result<bool> {
        let goal = self.goal_mut(id)?;
        goal.completed = !goal.completed;
        Ok(goal.completed)
    }

    pub fn delete_goal(&mut self, id: &str) -> Result<Goal> {
        let pos = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| CoreError::not_found("goal", id))?;
        Ok(self.goals.remove(pos))
    }

    fn goal_mut(&mut self, id: &str) -> Result<&mut Goal> {
        self.goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| CoreError::not_found("goal", id))
    }

    // ── Overview ─────────────────────────────────────────────────────

    pub fn progress(&self) -> ProgressOverview {
        let average_skill_level = if self.skills.is_empty() {
            0
        } else {
            let sum: u32 = self.skills.iter().map(|s| u32::from(s.level)).sum();
            (f64::from(sum) / self.skills.len() as f64).round() as u8
        };
        ProgressOverview {
            average_skill_level,
            completed_certifications: self.certifications.iter().filter(|c| c.completed).count(),
            total_certifications: self.certifications.len(),
            completed_goals: self.goals.iter().filter(|g| g.completed).count(),
            total_goals: self.goals.len(),
        }
    }
}
