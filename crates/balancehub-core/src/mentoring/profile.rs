//! Mentoring profiles and the form input they are built from.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
}

impl std::str::FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mentor" => Ok(Role::Mentor),
            "mentee" => Ok(Role::Mentee),
            other => Err(ValidationError::InvalidValue {
                field: "role".to_string(),
                message: format!("expected 'mentor' or 'mentee', got '{other}'"),
            }),
        }
    }
}

/// A free-form availability window, e.g. `Monday` / `10:00 AM - 12:00 PM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: String,
    pub time: String,
}

impl AvailabilitySlot {
    pub fn new(day: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            time: time.into(),
        }
    }
}

/// A mentoring participant.
///
/// The role is fixed at construction; re-registering with another role
/// produces a new profile with a new id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    role: Role,
    pub skills: Vec<String>,
    pub goals: Vec<String>,
    pub life_stage: String,
    pub availability: Vec<AvailabilitySlot>,
}

impl Profile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        skills: Vec<String>,
        goals: Vec<String>,
        life_stage: impl Into<String>,
        availability: Vec<AvailabilitySlot>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            skills,
            goals,
            life_stage: life_stage.into(),
            availability,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Build a profile from raw form input.
    pub fn from_draft(
        id: impl Into<String>,
        name: impl Into<String>,
        draft: &ProfileDraft,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            role: draft.role,
            skills: parse_labels(&draft.skills),
            goals: parse_labels(&draft.goals),
            life_stage: draft.life_stage.trim().to_string(),
            availability: draft.availability.clone(),
        })
    }
}

/// Raw profile form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub role: Role,
    /// Comma-separated skill labels.
    pub skills: String,
    /// Comma-separated goal labels.
    pub goals: String,
    pub life_stage: String,
    pub availability: Vec<AvailabilitySlot>,
}

impl ProfileDraft {
    /// All fields are required, and at least one availability slot.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if parse_labels(&self.skills).is_empty() {
            return Err(ValidationError::MissingField("skills"));
        }
        if parse_labels(&self.goals).is_empty() {
            return Err(ValidationError::MissingField("goals"));
        }
        if self.life_stage.trim().is_empty() {
            return Err(ValidationError::MissingField("life_stage"));
        }
        let has_slot = self
            .availability
            .iter()
            .any(|s| !s.day.trim().is_empty() && !s.time.trim().is_empty());
        if !has_slot {
            return Err(ValidationError::MissingField("availability"));
        }
        Ok(())
    }
}

/// Split comma-separated input into normalised labels ("Career growth").
pub fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProfileDraft {
        ProfileDraft {
            role: Role::Mentee,
            skills: " python, SQL ,,".to_string(),
            goals: "career GROWTH".to_string(),
            life_stage: "Junior developer".to_string(),
            availability: vec![AvailabilitySlot::new("Monday", "10:00 AM - 12:00 PM")],
        }
    }

    #[test]
    fn labels_are_trimmed_and_capitalized() {
        assert_eq!(parse_labels(" python, SQL ,,"), vec!["Python", "Sql"]);
        assert_eq!(parse_labels("career GROWTH"), vec!["Career growth"]);
        assert!(parse_labels(" , ").is_empty());
    }

    #[test]
    fn from_draft_builds_profile() {
        let profile = Profile::from_draft("user-6", "Current User", &draft()).unwrap();
        assert_eq!(profile.role(), Role::Mentee);
        assert_eq!(profile.skills, vec!["Python", "Sql"]);
        assert_eq!(profile.goals, vec!["Career growth"]);
    }

    #[test]
    fn draft_requires_every_field() {
        let mut d = draft();
        d.skills = " ".into();
        assert_eq!(d.validate(), Err(ValidationError::MissingField("skills")));

        let mut d = draft();
        d.life_stage = String::new();
        assert_eq!(d.validate(), Err(ValidationError::MissingField("life_stage")));

        let mut d = draft();
        d.availability = vec![AvailabilitySlot::new("", "")];
        assert_eq!(d.validate(), Err(ValidationError::MissingField("availability")));
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Mentor".parse::<Role>().unwrap(), Role::Mentor);
        assert!("coach".parse::<Role>().is_err());
    }
}
