//! Gopher CLI
//!
//! Command-line front end for the Gopher live-search API.
//!
//! Configuration comes from the environment (`GOPHER_API`, `MAX_RESULTS`,
//! `GOPHER_BASE_URL`) and can be overridden with flags. Logs go to stderr so
//! that `--json` output on stdout stays machine-readable.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::{Config, Overrides};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gopher")]
#[command(about = "Gopher live-search CLI", long_about = None)]
struct Cli {
    /// Service base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Maximum number of results to request
    #[arg(long, global = true)]
    max_results: Option<u32>,

    /// Number of result requests before giving up
    #[arg(long, global = true)]
    max_attempts: Option<u32>,

    /// Seconds to wait between result requests
    #[arg(long, global = true)]
    poll_interval: Option<u64>,

    /// Abort the whole operation after this many seconds
    #[arg(long, global = true)]
    deadline: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gopher_cli=info,gopher_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load(Overrides {
        base_url: cli.base_url,
        max_results: cli.max_results,
        max_attempts: cli.max_attempts,
        poll_interval: cli.poll_interval,
        deadline: cli.deadline,
    })?;

    handle_command(cli.command, &config).await
}
