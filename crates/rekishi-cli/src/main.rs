//! rekishi CLI: play and inspect history quizzes from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rekishi", version, about = "History quiz over a CSV dataset")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the quiz, reading commands from stdin
    Play {
        /// Dataset file path or http(s) URL (overrides config)
        #[arg(long)]
        dataset: Option<String>,

        /// Eras to quiz on (repeatable or comma-separated; default: all)
        #[arg(long = "era", value_delimiter = ',')]
        eras: Vec<String>,

        /// Seed for reproducible questions
        #[arg(long)]
        seed: Option<u64>,

        /// Skip malformed rows instead of failing the load
        #[arg(long)]
        skip_malformed: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check that a dataset parses
    Validate {
        /// Dataset file path or http(s) URL (overrides config)
        #[arg(long)]
        dataset: Option<String>,

        /// Skip malformed rows instead of failing the load
        #[arg(long)]
        skip_malformed: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the eras in a dataset with their record counts
    Eras {
        /// Dataset file path or http(s) URL (overrides config)
        #[arg(long)]
        dataset: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample dataset
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,rekishi_loader=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            dataset,
            eras,
            seed,
            skip_malformed,
            config,
        } => commands::play::execute(dataset, eras, seed, skip_malformed, config).await,
        Commands::Validate {
            dataset,
            skip_malformed,
            config,
        } => commands::validate::execute(dataset, skip_malformed, config).await,
        Commands::Eras {
            dataset,
            format,
            config,
        } => commands::eras::execute(dataset, format, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
