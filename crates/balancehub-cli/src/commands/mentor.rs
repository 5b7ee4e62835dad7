use balancehub_core::mentoring::AvailabilitySlot;
use balancehub_core::schedule::week_start_of;
use balancehub_core::{Config, Identity, ProfileDraft, Role, SessionContext, StaticIdentity};
use chrono::Utc;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum MentorAction {
    /// List the mentoring directory
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank mentors for a mentee profile
    Match {
        /// Comma-separated skills (e.g. "Python, SQL")
        #[arg(long)]
        skills: String,
        /// Comma-separated goals
        #[arg(long)]
        goals: String,
        /// Life stage (e.g. "Junior developer")
        #[arg(long)]
        life_stage: String,
        /// Availability day
        #[arg(long, default_value = "Flexible")]
        day: String,
        /// Availability time
        #[arg(long, default_value = "Any time")]
        time: String,
        /// Display name for the new profile
        #[arg(long)]
        name: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn session() -> Result<SessionContext, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    Ok(SessionContext::from_config(&config, week_start_of(Utc::now().date_naive())))
}

pub fn run(action: MentorAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MentorAction::List { json } => {
            let session = session()?;
            if json {
                println!("{}", serde_json::to_string_pretty(session.profiles())?);
                return Ok(());
            }
            for profile in session.profiles() {
                let role = match profile.role() {
                    Role::Mentor => "mentor",
                    Role::Mentee => "mentee",
                };
                println!(
                    "{:<8} {:<14} {:<7} {} | {}",
                    profile.id,
                    profile.name,
                    role,
                    profile.life_stage,
                    profile.skills.join(", ")
                );
            }
        }
        MentorAction::Match {
            skills,
            goals,
            life_stage,
            day,
            time,
            name,
            json,
        } => {
            let mut session = session()?;
            let identity = StaticIdentity(name.map(|n| Identity::new("cli", Some(n))));
            session.sync_identity(&identity);

            let draft = ProfileDraft {
                role: Role::Mentee,
                skills,
                goals,
                life_stage,
                availability: vec![AvailabilitySlot::new(day, time)],
            };
            let id = session.register_profile(&draft)?.id.clone();
            let matches = session.find_matches(&id)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else if matches.is_empty() {
                println!("no compatible mentors found");
            } else {
                for m in &matches {
                    println!("{:>3}  {} ({})", m.score, m.mentor.name, m.mentor.life_stage);
                    for slot in &m.mentor.availability {
                        println!("       {} {}", slot.day, slot.time);
                    }
                }
            }
        }
    }
    Ok(())
}
