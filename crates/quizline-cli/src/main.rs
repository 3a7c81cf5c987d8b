//! quizline CLI — terminal trivia quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "quizline", version, about = "Terminal trivia quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play trivia rounds in the terminal
    Play {
        /// Questions per round
        #[arg(long)]
        amount: Option<u32>,

        /// Trivia API endpoint
        #[arg(long)]
        api_url: Option<String>,

        /// Countdown length in seconds (max 600)
        #[arg(long)]
        time_limit: Option<u32>,

        /// Seconds the final score is shown before the game resets
        #[arg(long)]
        end_delay: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fetch a batch of questions and print them
    Fetch {
        /// Number of questions
        #[arg(long)]
        amount: Option<u32>,

        /// Trivia API endpoint
        #[arg(long)]
        api_url: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizline=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            amount,
            api_url,
            time_limit,
            end_delay,
            config,
        } => commands::play::execute(amount, api_url, time_limit, end_delay, config).await,
        Commands::Fetch {
            amount,
            api_url,
            format,
            config,
        } => commands::fetch::execute(amount, api_url, format, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
