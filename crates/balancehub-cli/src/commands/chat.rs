use balancehub_core::{BalanceBuddy, Config};
use clap::Args;

#[derive(Args)]
pub struct ChatArgs {
    /// What's on your mind
    #[arg(required = true, num_args = 1..)]
    message: Vec<String>,
    /// Seed for the closing nudge (overrides `chatbot.seed`)
    #[arg(long)]
    seed: Option<u64>,
    /// Print the whole conversation as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ChatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let seed = match args.seed {
        Some(seed) => Some(seed),
        None => Config::load()?.chatbot.seed,
    };
    let mut buddy = seed.map_or_else(BalanceBuddy::new, BalanceBuddy::with_seed);

    let message = args.message.join(" ");
    let reply = buddy.send(&message).ok_or("message is empty")?.text.clone();

    if args.json {
        println!("{}", serde_json::to_string_pretty(buddy.messages())?);
    } else {
        println!("{reply}");
    }
    Ok(())
}
