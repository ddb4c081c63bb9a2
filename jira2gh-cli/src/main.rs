//! jira2gh CLI - import a JIRA XML export into a GitHub repository
//!
//! Steps:
//! 1. create milestones
//! 2. create labels
//! 3. create each issue with its comments
//! 4. patch the issue reference placeholders in all comments

mod commands;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::ImportArgs;

/// Reads the XML export of JIRA and imports the issues it contains into GitHub
#[derive(Parser, Debug)]
#[command(name = "jira2gh")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    import: ImportArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    cli.import.execute().await
}
