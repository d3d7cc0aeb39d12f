//! wordmatch CLI: play the bilingual memory-matching game in a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(
    name = "wordmatch",
    version,
    about = "Match English words to their Spanish translations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game in the terminal
    Play {
        /// Level to start at
        #[arg(long, default_value = "1")]
        level: u32,

        /// Provider name from the config file
        #[arg(long)]
        provider: Option<String>,

        /// Model to generate words with
        #[arg(long)]
        model: Option<String>,

        /// Seed for the card shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Use the built-in word list instead of a provider
        #[arg(long)]
        offline: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate one set of word pairs and print it
    Words {
        /// Difficulty level
        #[arg(long, default_value = "1")]
        level: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Provider name from the config file
        #[arg(long)]
        provider: Option<String>,

        /// Model to generate words with
        #[arg(long)]
        model: Option<String>,

        /// Use the built-in word list instead of a provider
        #[arg(long)]
        offline: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wordmatch=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            level,
            provider,
            model,
            seed,
            offline,
            config,
        } => {
            let source = commands::SourceOptions {
                provider,
                model,
                offline,
                config,
            };
            commands::play::execute(source, level, seed).await
        }
        Commands::Words {
            level,
            json,
            provider,
            model,
            offline,
            config,
        } => {
            let source = commands::SourceOptions {
                provider,
                model,
                offline,
                config,
            };
            commands::words::execute(source, level, json).await
        }
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
