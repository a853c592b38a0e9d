//! r2skill CLI — the main entry point.
//!
//! Commands:
//! - `serve`   — Start the HTTP skill endpoint
//! - `invoke`  — Run one request envelope through the skill locally
//! - `state`   — Inspect or reset a user's stored playback state
//! - `config`  — Show, locate, validate, or create the config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "r2skill",
    about = "r2skill — R2 D2 voice skill backend",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP skill endpoint
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Send one request to the skill and print the response envelope
    Invoke {
        /// Request envelope JSON file ("-" for stdin)
        #[arg(conflicts_with_all = ["launch", "intent"])]
        file: Option<PathBuf>,

        /// Send a LaunchRequest
        #[arg(long, conflicts_with = "intent")]
        launch: bool,

        /// Send an IntentRequest with this intent name
        #[arg(short, long)]
        intent: Option<String>,

        /// User id for synthesized requests
        #[arg(short, long, env = "R2SKILL_USER", default_value = "local-user")]
        user: String,

        /// Seed clip selection for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Inspect or reset stored playback state
    State {
        #[command(subcommand)]
        action: StateAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum StateAction {
    /// Print a user's stored attributes
    Show {
        #[arg(short, long, env = "R2SKILL_USER", default_value = "local-user")]
        user: String,
    },

    /// Delete a user's stored attributes
    Reset {
        #[arg(short, long, env = "R2SKILL_USER", default_value = "local-user")]
        user: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Validate the configuration
    Validate,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Invoke {
            file,
            launch,
            intent,
            user,
            seed,
        } => {
            let source = commands::invoke::Source::from_args(file, launch, intent);
            commands::invoke::run(source, user, seed).await?
        }
        Commands::State { action } => match action {
            StateAction::Show { user } => commands::state::show(&user).await?,
            StateAction::Reset { user } => commands::state::reset(&user).await?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Init { force } => commands::config_cmd::init(force).await?,
        },
    }

    Ok(())
}
