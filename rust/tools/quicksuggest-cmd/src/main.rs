use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quicksuggest-cmd")]
#[command(about = "Command-line utility for building and querying suggestion indexes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from a seed file and print suggestions for each query
    Suggest {
        /// Path to the JSON seed file with (phrase, score) entries
        #[arg(short, long)]
        seed: String,

        /// Path to a JSON suggester configuration
        #[arg(short, long)]
        config: Option<String>,

        /// Maximum number of suggestions per query (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the full JSON response instead of one suggestion per line
        #[arg(long)]
        json: bool,

        /// Queries to complete (an empty string is allowed)
        #[arg(required = true)]
        queries: Vec<String>,
    },

    /// Build an index from a seed file and display summary information
    Inspect {
        /// Increase verbosity (-v lists the indexed phrases)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,

        /// Path to the JSON seed file with (phrase, score) entries
        seed: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest {
            seed,
            config,
            limit,
            json,
            queries,
        } => commands::suggest::run(seed, config, limit, json, queries),
        Commands::Inspect { verbose, seed } => commands::inspect::run(verbose, seed),
    }
}
