use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "moyu")]
#[command(about = "moyu - personal time and earnings tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start tracking; Ctrl-C stops and commits the session
    Track {
        /// Monthly salary; falls back to the configured default
        #[arg(long)]
        salary: Option<f64>,
        /// Daily goal in hours; falls back to the configured default
        #[arg(long)]
        goal: Option<f64>,
    },
    /// Show today/week/month totals and goal progress
    Stats,
    /// List committed sessions
    History,
    /// Delete one committed session by its number in `history`
    Delete {
        /// 1-based record number as printed by `moyu history`
        index: usize,
    },
    /// Show or update stored defaults
    Config {
        /// Default monthly salary
        #[arg(long)]
        salary: Option<f64>,
        /// Default daily goal in hours
        #[arg(long)]
        goal: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Track { salary, goal } => commands::track::run(salary, goal).await,
        Commands::Stats => commands::stats::run().await,
        Commands::History => commands::history::run().await,
        Commands::Delete { index } => commands::history::delete(index).await,
        Commands::Config { salary, goal } => commands::config::run(salary, goal),
    }
}
