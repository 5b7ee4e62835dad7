use balancehub_core::schedule::week_start_of;
use balancehub_core::storage::{load_state, reset_state, save_state, state_path, CAREER_FILE};
use balancehub_core::{CareerTracker, Config, SessionContext};
use chrono::Utc;
use clap::{Subcommand, ValueEnum};

#[derive(Clone, Copy, ValueEnum)]
pub enum Item {
    Skill,
    Cert,
    Goal,
}

#[derive(Subcommand)]
pub enum CareerAction {
    /// Show skills, certifications, goals and the progress overview
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a skill, certification or goal
    Add {
        #[arg(value_enum)]
        item: Item,
        /// Name or goal description
        text: String,
        /// Skill level, 0-100
        #[arg(long, default_value_t = 0)]
        level: u8,
    },
    /// Rename an item (and set a skill's level)
    Edit {
        #[arg(value_enum)]
        item: Item,
        id: String,
        text: String,
        /// New skill level; keeps the current one when omitted
        #[arg(long)]
        level: Option<u8>,
    },
    /// Mark a certification or goal done, or undo it
    Toggle {
        #[arg(value_enum)]
        item: Item,
        id: String,
    },
    /// Delete an item
    Delete {
        #[arg(value_enum)]
        item: Item,
        id: String,
    },
    /// Discard saved changes and start from the starter dashboard
    Reset,
}

fn session() -> Result<SessionContext, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let career = load_state(&state_path(CAREER_FILE)?, CareerTracker::sample)?;
    Ok(SessionContext::from_config(&config, week_start_of(Utc::now().date_naive()))
        .with_career(career))
}

fn print(tracker: &CareerTracker) {
    let progress = tracker.progress();
    println!(
        "Average skill level: {}% | Certifications: {}/{} | Goals: {}/{}",
        progress.average_skill_level,
        progress.completed_certifications,
        progress.total_certifications,
        progress.completed_goals,
        progress.total_goals
    );
    println!("\nSkills");
    for skill in tracker.skills() {
        println!("  {:<9} {:<20} {:>3}%", skill.id, skill.name, skill.level);
    }
    println!("\nCertifications");
    for cert in tracker.certifications() {
        let mark = if cert.completed { "x" } else { " " };
        println!("  {:<9} [{mark}] {}", cert.id, cert.name);
    }
    println!("\nGoals");
    for goal in tracker.goals() {
        let mark = if goal.completed { "x" } else { " " };
        println!("  {:<9} [{mark}] {}", goal.id, goal.description);
    }
}

pub fn run(action: CareerAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = state_path(CAREER_FILE)?;
    if let CareerAction::Reset = action {
        reset_state(&path)?;
        println!("career dashboard reset");
        return Ok(());
    }

    let mut session = session()?;
    let career = session.career_mut();
    match action {
        CareerAction::Show { json } => {
            if json {
                let out = serde_json::json!({
                    "progress": career.progress(),
                    "dashboard": &*career,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print(career);
            }
            return Ok(());
        }
        CareerAction::Add { item, text, level } => {
            let id = match item {
                Item::Skill => career.add_skill(&text, level)?.id.clone(),
                Item::Cert => career.add_certification(&text)?.id.clone(),
                Item::Goal => career.add_goal(&text)?.id.clone(),
            };
            println!("{id}");
        }
        CareerAction::Edit {
            item,
            id,
            text,
            level,
        } => match item {
            Item::Skill => {
                let current = career
                    .skills()
                    .iter()
                    .find(|s| s.id == id)
                    .map(|s| s.level)
                    .ok_or_else(|| format!("skill not found: {id}"))?;
                career.edit_skill(&id, &text, level.unwrap_or(current))?;
            }
            Item::Cert => {
                career.rename_certification(&id, &text)?;
            }
            Item::Goal => {
                career.rename_goal(&id, &text)?;
            }
        },
        CareerAction::Toggle { item, id } => {
            let done = match item {
                Item::Skill => return Err("skills have a level, not a completed flag".into()),
                Item::Cert => career.toggle_certification(&id)?,
                Item::Goal => career.toggle_goal(&id)?,
            };
            println!("{id} {}", if done { "completed" } else { "not completed" });
        }
        CareerAction::Delete { item, id } => match item {
            Item::Skill => {
                career.delete_skill(&id)?;
            }
            Item::Cert => {
                career.delete_certification(&id)?;
            }
            Item::Goal => {
                career.delete_goal(&id)?;
            }
        },
        CareerAction::Reset => {}
    }

    save_state(&path, session.career())?;
    Ok(())
}
