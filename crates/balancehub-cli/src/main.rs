use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "balancehub", version, about = "BalanceHub CLI")]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Balance scheduler checks and stats
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Mentor directory and matching
    Mentor {
        #[command(subcommand)]
        action: commands::mentor::MentorAction,
    },
    /// Career growth dashboard
    Career {
        #[command(subcommand)]
        action: commands::career::CareerAction,
    },
    /// Opportunities, coffee chats and the community forum
    Network {
        #[command(subcommand)]
        action: commands::network::NetworkAction,
    },
    /// Talk to the wellbeing chatbot
    Chat(commands::chat::ChatArgs),
    /// Run a one-minute relaxation exercise
    Relax(commands::relax::RelaxArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Mentor { action } => commands::mentor::run(action),
        Commands::Career { action } => commands::career::run(action),
        Commands::Network { action } => commands::network::run(action),
        Commands::Chat(args) => commands::chat::run(args),
        Commands::Relax(args) => commands::relax::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "balancehub",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
