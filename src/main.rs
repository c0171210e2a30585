//! quiz: terminal client for the wedding quiz party game

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use wedding_quiz::client::HttpTransport;
use wedding_quiz::commands::{
    handle_moderator_command, handle_play_command, handle_supporter_command, handle_watch_command,
};
use wedding_quiz::core::resolve_config;
use wedding_quiz::session::{ModeratorSession, SupporterSession, SyncClient};
use wedding_quiz::telemetry;

#[derive(Parser)]
#[command(name = "quiz")]
#[command(about = "Play, support or moderate the wedding quiz", long_about = None)]
#[command(version)]
struct Cli {
    /// API base URL (overrides QUIZ_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Path to a config.toml (default: <config dir>/wedding-quiz/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register and play
    Play {
        /// Continue as an already registered player
        #[arg(long)]
        player_id: Option<u64>,
    },
    /// Predict results after elimination and rejoin with a correct guess
    Supporter {
        /// Your player id from registration
        #[arg(long)]
        player_id: u64,
    },
    /// Open the moderator control panel
    Moderator,
    /// Show the live game overview
    Watch {
        /// Print the current state once and exit
        #[arg(long)]
        once: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let config = resolve_config(cli.api_url.as_deref(), cli.config.as_deref())?;
    debug!(base_url = %config.base_url, "using API");

    let transport = HttpTransport::new(&config.base_url, config.request_timeout())
        .context("Failed to build HTTP client")?;
    let client = Arc::new(SyncClient::new(transport));

    match cli.command {
        Commands::Play { player_id } => handle_play_command(client, &config, player_id).await,
        Commands::Supporter { player_id } => {
            let supporter = Arc::new(SupporterSession::new(client));
            handle_supporter_command(supporter, &config, player_id).await
        }
        Commands::Moderator => {
            let moderator = Arc::new(ModeratorSession::new(client));
            handle_moderator_command(moderator, &config).await
        }
        Commands::Watch { once } => handle_watch_command(client, &config, once).await,
    }
}
