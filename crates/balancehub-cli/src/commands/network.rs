use balancehub_core::schedule::week_start_of;
use balancehub_core::storage::{load_state, reset_state, save_state, state_path, NETWORKING_FILE};
use balancehub_core::{Config, NetworkingHub, SessionContext};
use chrono::Utc;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum NetworkAction {
    /// List flexible opportunities
    Opportunities {
        #[arg(long)]
        json: bool,
    },
    /// Apply to an opportunity
    Apply { id: u32 },
    /// List coffee chats
    Chats {
        #[arg(long)]
        json: bool,
    },
    /// Book a coffee chat
    Schedule { id: u32 },
    /// Cancel a booked coffee chat
    Cancel { id: u32 },
    /// Show forum posts and their replies
    Posts {
        #[arg(long)]
        json: bool,
    },
    /// Reply to a forum post
    Reply {
        post: u32,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Like a reply
    Like { post: u32, reply: u32 },
    /// Discard saved changes and start from the starter feed
    Reset,
}

fn session() -> Result<SessionContext, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let networking = load_state(&state_path(NETWORKING_FILE)?, NetworkingHub::sample)?;
    Ok(SessionContext::from_config(&config, week_start_of(Utc::now().date_naive()))
        .with_networking(networking))
}

pub fn run(action: NetworkAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = state_path(NETWORKING_FILE)?;
    let mut session = session()?;
    let hub = session.networking_mut();

    match action {
        NetworkAction::Opportunities { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(hub.opportunities())?);
            } else {
                for o in hub.opportunities() {
                    let status = if hub.has_applied(o.id) { "applied" } else { "open" };
                    println!("{:>2}  {:<26} {:<24} [{}] {status}", o.id, o.title, o.commitment, o.tag);
                }
            }
            return Ok(());
        }
        NetworkAction::Chats { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(hub.chats())?);
            } else {
                for c in hub.chats() {
                    let status = if hub.is_scheduled(c.id) { "scheduled" } else { "available" };
                    println!("{:>2}  {:<34} {:<26} {status}", c.id, c.title, c.when);
                }
            }
            return Ok(());
        }
        NetworkAction::Posts { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(hub.posts())?);
            } else {
                for post in hub.posts() {
                    println!("{:>2}  {} (by {})", post.id, post.title, post.author);
                    for r in &post.replies {
                        println!("      {}. {}: {} ({} likes)", r.id, r.author, r.text, r.likes);
                    }
                }
            }
            return Ok(());
        }
        NetworkAction::Apply { id } => {
            if hub.apply(id)? {
                println!("applied to opportunity {id}");
            } else {
                println!("already applied to opportunity {id}");
            }
        }
        NetworkAction::Schedule { id } => {
            if hub.schedule_chat(id)? {
                println!("coffee chat {id} scheduled");
            } else {
                println!("coffee chat {id} was already scheduled");
            }
        }
        NetworkAction::Cancel { id } => {
            if hub.cancel_chat(id)? {
                println!("coffee chat {id} cancelled");
            } else {
                println!("coffee chat {id} was not scheduled");
            }
        }
        NetworkAction::Reply { post, text } => match hub.reply(post, &text.join(" "))? {
            Some(reply) => println!("reply {} added to post {post}", reply.id),
            None => return Err("reply is empty".into()),
        },
        NetworkAction::Like { post, reply } => {
            let likes = hub.like_reply(post, reply)?;
            println!("{likes} likes");
        }
        NetworkAction::Reset => {
            reset_state(&path)?;
            println!("networking feed reset");
            return Ok(());
        }
    }

    save_state(&path, session.networking())?;
    Ok(())
}
